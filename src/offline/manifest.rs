//! Static asset manifest for the offline cache.

/// Name of the cache generation this build writes and reads. Bumping it is
/// the only supported way to invalidate previously cached assets; stale
/// generations are deleted on activation.
pub const CACHE_GENERATION: &str = "wavecrest-assets-v1";

/// Every static resource the player UI needs to run offline. Must stay in
/// sync with the files shipped under `dist/`; there is no automated check.
pub const STATIC_ASSETS: &[&str] = &[
    "/",
    "/index.html",
    // Per-feature stylesheets
    "/css/base.css",
    "/css/deck.css",
    "/css/controls.css",
    "/css/playlist.css",
    "/css/modals.css",
    // Script bundle
    "/js/player.js",
    "/manifest.webmanifest",
    // Images
    "/assets/img/logo.png",
    "/assets/img/logo-dark.png",
    "/assets/img/favicon.png",
    // Icon font
    "/assets/icons/wavecrest-icons.css",
    "/assets/icons/wavecrest-icons.woff2",
    "/assets/icons/wavecrest-icons.ttf",
];

/// A fixed, versioned list of resource paths that must all be fetchable at
/// install time.
#[derive(Debug, Clone)]
pub struct AssetManifest {
    tag: String,
    assets: Vec<String>,
}

impl AssetManifest {
    /// The manifest baked into this build.
    pub fn current() -> Self {
        Self::new(
            CACHE_GENERATION,
            STATIC_ASSETS.iter().map(|asset| asset.to_string()).collect(),
        )
    }

    pub fn new(tag: impl Into<String>, assets: Vec<String>) -> Self {
        Self {
            tag: tag.into(),
            assets,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
