//! Disk-backed cache generations.
//!
//! One generation is a directory under the cache root, holding one body
//! file plus a JSON metadata sidecar per entry. File names derive from the
//! SHA-256 of the canonical request identity, so keys never touch the
//! filesystem namespace directly.

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::WavecrestResult;

/// A stored (request identity, response) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

#[derive(Serialize, Deserialize)]
struct EntryMeta {
    key: String,
    status: u16,
    headers: Vec<(String, String)>,
}

/// Root of all cache generations on disk.
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Open (creating if absent) a cache store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> WavecrestResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Handle to the named generation. The directory is not created until
    /// the first write.
    pub fn generation(&self, tag: &str) -> Generation {
        Generation {
            dir: self.root.join(tag),
        }
    }

    /// Names of every generation currently on disk, sorted.
    pub fn list_generations(&self) -> WavecrestResult<Vec<String>> {
        let mut names = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if dir_entry.file_type()?.is_dir() {
                names.push(dir_entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn remove_generation(&self, tag: &str) -> WavecrestResult<()> {
        let dir = self.root.join(tag);
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }

    /// Delete every generation except `keep`, returning the removed names.
    pub fn remove_all_except(&self, keep: &str) -> WavecrestResult<Vec<String>> {
        let mut removed = Vec::new();
        for name in self.list_generations()? {
            if name != keep {
                self.remove_generation(&name)?;
                removed.push(name);
            }
        }
        Ok(removed)
    }
}

/// One named generation of cache entries.
pub struct Generation {
    dir: PathBuf,
}

impl Generation {
    pub fn create(&self) -> WavecrestResult<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.meta_path(key).is_file() && self.body_path(key).is_file()
    }

    /// Read the entry stored under `key`, if any.
    pub fn get(&self, key: &str) -> WavecrestResult<Option<CacheEntry>> {
        if !self.contains(key) {
            return Ok(None);
        }
        let meta: EntryMeta = serde_json::from_slice(&fs::read(self.meta_path(key))?)?;
        let body = Bytes::from(fs::read(self.body_path(key))?);
        Ok(Some(CacheEntry {
            key: meta.key,
            status: meta.status,
            headers: meta.headers,
            body,
        }))
    }

    /// Store an entry. The first write wins; returns `false` when an entry
    /// for this key already existed.
    pub fn put(&self, entry: &CacheEntry) -> WavecrestResult<bool> {
        if self.contains(&entry.key) {
            return Ok(false);
        }
        self.create()?;
        // Body first: `contains` requires the metadata sidecar, so a crash
        // between the two writes leaves the entry invisible.
        fs::write(self.body_path(&entry.key), &entry.body)?;
        let meta = EntryMeta {
            key: entry.key.clone(),
            status: entry.status,
            headers: entry.headers.clone(),
        };
        fs::write(self.meta_path(&entry.key), serde_json::to_vec_pretty(&meta)?)?;
        Ok(true)
    }

    /// Number of complete entries in this generation.
    pub fn len(&self) -> WavecrestResult<usize> {
        if !self.exists() {
            return Ok(0);
        }
        let mut count = 0;
        for dir_entry in fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> WavecrestResult<bool> {
        Ok(self.len()? == 0)
    }

    fn file_stem(key: &str) -> String {
        let digest = Sha256::digest(key.as_bytes());
        let mut stem = String::with_capacity(digest.len() * 2);
        for byte in digest {
            stem.push_str(&format!("{:02x}", byte));
        }
        stem
    }

    fn body_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.bin", Self::file_stem(key)))
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", Self::file_stem(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, body: &[u8]) -> CacheEntry {
        CacheEntry {
            key: key.to_string(),
            status: 200,
            headers: vec![("content-type".to_string(), "text/css".to_string())],
            body: Bytes::copy_from_slice(body),
        }
    }

    #[test]
    fn test_put_and_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let generation = store.generation("gen-a");

        let stored = entry("GET /css/base.css", b"body { margin: 0 }");
        assert!(generation.put(&stored).unwrap());

        let read_back = generation.get("GET /css/base.css").unwrap().unwrap();
        assert_eq!(read_back, stored);
        assert_eq!(generation.len().unwrap(), 1);
    }

    #[test]
    fn test_first_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let generation = store.generation("gen-a");

        assert!(generation.put(&entry("GET /a", b"first")).unwrap());
        assert!(!generation.put(&entry("GET /a", b"second")).unwrap());

        let read_back = generation.get("GET /a").unwrap().unwrap();
        assert_eq!(read_back.body, Bytes::from_static(b"first"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let generation = store.generation("gen-a");
        assert!(generation.get("GET /nope").unwrap().is_none());
    }

    #[test]
    fn test_distinct_keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let generation = store.generation("gen-a");

        generation.put(&entry("GET /a", b"aaa")).unwrap();
        generation.put(&entry("GET /b", b"bbb")).unwrap();

        assert_eq!(
            generation.get("GET /a").unwrap().unwrap().body,
            Bytes::from_static(b"aaa")
        );
        assert_eq!(
            generation.get("GET /b").unwrap().unwrap().body,
            Bytes::from_static(b"bbb")
        );
        assert_eq!(generation.len().unwrap(), 2);
    }

    #[test]
    fn test_remove_all_except_keeps_current() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();

        store.generation("gen-old-1").create().unwrap();
        store.generation("gen-old-2").create().unwrap();
        let current = store.generation("gen-current");
        current.put(&entry("GET /a", b"keep me")).unwrap();

        let removed = store.remove_all_except("gen-current").unwrap();
        assert_eq!(removed, vec!["gen-old-1", "gen-old-2"]);
        assert_eq!(store.list_generations().unwrap(), vec!["gen-current"]);
        assert!(current.get("GET /a").unwrap().is_some());
    }
}
