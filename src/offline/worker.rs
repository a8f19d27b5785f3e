//! Offline cache worker lifecycle and fetch policy.
//!
//! The worker is passive infrastructure: the hosting service drives
//! `install` and `activate`, and routes every intercepted resource request
//! through `handle_fetch`. It never transitions phases on its own.

use bytes::Bytes;

use crate::error::{WavecrestError, WavecrestResult};
use crate::offline::fetcher::{FetchRequest, NetworkFetcher, NetworkResponse};
use crate::offline::manifest::AssetManifest;
use crate::offline::policy;
use crate::offline::store::{CacheEntry, CacheStore};

/// Lifecycle phases, in order. `Installed` means ready to take over
/// immediately; there is no waiting period for existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    Uninstalled,
    Installing,
    Installed,
    Activating,
    Activated,
}

impl WorkerPhase {
    fn name(&self) -> &'static str {
        match self {
            WorkerPhase::Uninstalled => "uninstalled",
            WorkerPhase::Installing => "installing",
            WorkerPhase::Installed => "installed",
            WorkerPhase::Activating => "activating",
            WorkerPhase::Activated => "activated",
        }
    }
}

/// Where the bytes of a served response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// Stored entry in the current generation; no network access occurred.
    Cache,
    /// Fresh network response (cached afterwards only if admissible).
    Network,
    /// Bypass-class request; the service did not consult the cache at all.
    Passthrough,
}

/// A response ready to hand back across the interception boundary.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub source: FetchSource,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl FetchOutcome {
    fn from_network(source: FetchSource, response: NetworkResponse) -> Self {
        Self {
            source,
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }

    fn from_entry(entry: CacheEntry) -> Self {
        Self {
            source: FetchSource::Cache,
            status: entry.status,
            headers: entry.headers,
            body: entry.body,
        }
    }
}

/// The offline cache worker: one current generation, one manifest, one
/// upstream fetcher.
pub struct OfflineWorker<F: NetworkFetcher> {
    phase: WorkerPhase,
    store: CacheStore,
    manifest: AssetManifest,
    fetcher: F,
}

impl<F: NetworkFetcher> OfflineWorker<F> {
    pub fn new(store: CacheStore, manifest: AssetManifest, fetcher: F) -> Self {
        Self {
            phase: WorkerPhase::Uninstalled,
            store,
            manifest,
            fetcher,
        }
    }

    pub fn phase(&self) -> WorkerPhase {
        self.phase
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    fn require_phase(&self, expected: WorkerPhase) -> WavecrestResult<()> {
        if self.phase != expected {
            return Err(WavecrestError::PhaseError {
                expected: expected.name().to_string(),
                actual: self.phase.name().to_string(),
            });
        }
        Ok(())
    }

    /// Populate the current generation with every manifest asset.
    ///
    /// All-or-nothing: any asset that cannot be fetched and admitted fails
    /// the whole step, the partial generation is removed, and the worker
    /// stays uninstalled so the host retries on next load.
    pub async fn install(&mut self) -> WavecrestResult<()> {
        self.require_phase(WorkerPhase::Uninstalled)?;
        self.phase = WorkerPhase::Installing;
        log::info!(
            "[OfflineWorker] installing generation {} ({} assets)",
            self.manifest.tag(),
            self.manifest.len()
        );

        let generation = self.store.generation(self.manifest.tag());
        if let Err(err) = generation.create() {
            self.phase = WorkerPhase::Uninstalled;
            return Err(err);
        }

        for asset in self.manifest.assets() {
            let request = FetchRequest::get(asset);
            let failure = match self.fetcher.fetch(&request).await {
                Ok(response) if policy::is_cacheable(response.status, response.same_origin) => {
                    let entry = CacheEntry {
                        key: policy::request_key(&request.method, &request.url),
                        status: response.status,
                        headers: response.headers,
                        body: response.body,
                    };
                    match generation.put(&entry) {
                        Ok(_) => None,
                        Err(err) => Some(err.to_string()),
                    }
                }
                Ok(response) => Some(format!(
                    "status {}{}",
                    response.status,
                    if response.same_origin { "" } else { " (cross-origin)" }
                )),
                Err(err) => Some(err.to_string()),
            };

            if let Some(reason) = failure {
                log::error!("[OfflineWorker] install failed on {}: {}", asset, reason);
                if let Err(cleanup_err) = self.store.remove_generation(self.manifest.tag()) {
                    log::warn!(
                        "[OfflineWorker] could not remove partial generation {}: {}",
                        self.manifest.tag(),
                        cleanup_err
                    );
                }
                self.phase = WorkerPhase::Uninstalled;
                return Err(WavecrestError::InstallError {
                    asset: asset.clone(),
                    reason,
                });
            }
        }

        self.phase = WorkerPhase::Installed;
        log::info!(
            "[OfflineWorker] generation {} installed, ready to take over",
            self.manifest.tag()
        );
        Ok(())
    }

    /// Delete every generation whose name differs from the current tag,
    /// then claim any already-open clients for this worker.
    pub async fn activate(&mut self) -> WavecrestResult<()> {
        self.require_phase(WorkerPhase::Installed)?;
        self.phase = WorkerPhase::Activating;

        let removed = self.store.remove_all_except(self.manifest.tag())?;
        for name in &removed {
            log::info!("[OfflineWorker] removed stale generation {}", name);
        }

        self.phase = WorkerPhase::Activated;
        log::info!(
            "[OfflineWorker] generation {} activated, claiming open clients",
            self.manifest.tag()
        );
        Ok(())
    }

    /// Decide one intercepted request: bypass, cache hit, or network fetch
    /// with admission-gated store.
    pub async fn handle_fetch(&self, request: &FetchRequest) -> WavecrestResult<FetchOutcome> {
        if policy::is_bypass(&request.url) {
            log::debug!("[OfflineWorker] bypass: {}", request.url);
            let response = self.fetcher.fetch(request).await?;
            return Ok(FetchOutcome::from_network(FetchSource::Passthrough, response));
        }

        let key = policy::request_key(&request.method, &request.url);
        let generation = self.store.generation(self.manifest.tag());

        if let Some(entry) = generation.get(&key)? {
            log::debug!("[OfflineWorker] cache hit: {}", request.url);
            return Ok(FetchOutcome::from_entry(entry));
        }

        log::debug!("[OfflineWorker] network: {}", request.url);
        let response = self.fetcher.fetch(request).await.map_err(|err| {
            log::error!("[OfflineWorker] fetch failed for {}: {}", request.url, err);
            err
        })?;

        if !policy::is_cacheable(response.status, response.same_origin) {
            return Ok(FetchOutcome::from_network(FetchSource::Network, response));
        }

        // The upstream body is a single-consumption resource; materialize
        // independent copies for the store and the caller before either is
        // used.
        let entry = CacheEntry {
            key,
            status: response.status,
            headers: response.headers.clone(),
            body: response.body.clone(),
        };
        generation.put(&entry)?;

        Ok(FetchOutcome::from_network(FetchSource::Network, response))
    }
}
