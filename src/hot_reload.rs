//! # Hot Reload
//!
//! Long-running consumers can keep a [`SharedClient`] and swap in a freshly
//! built [`Client`] whenever the API description changes. Readers never block:
//! [`SharedClient::load`] returns the current snapshot and a reload replaces it
//! atomically.
//!
//! A description that fails to load is logged and ignored; the previous client
//! stays in place.
//!
//! ```rust,ignore
//! use martian::hot_reload::{watch_spec, SharedClient};
//! use std::sync::Arc;
//!
//! let shared = Arc::new(SharedClient::new(client));
//! let _watcher = watch_spec("openapi.yaml", Arc::clone(&shared), |client| {
//!     println!("reloaded {} routes", client.registry().len());
//! })?;
//! ```

use crate::client::Client;
use crate::error::BootstrapError;
use anyhow::Context;
use arc_swap::ArcSwap;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// A [`Client`] that can be replaced while it is being used.
#[derive(Debug)]
pub struct SharedClient {
    current: ArcSwap<Client>,
}

impl SharedClient {
    pub fn new(client: Client) -> Self {
        Self {
            current: ArcSwap::from_pointee(client),
        }
    }

    /// Snapshot of the current client.
    #[must_use]
    pub fn load(&self) -> Arc<Client> {
        self.current.load_full()
    }

    pub fn store(&self, client: Client) {
        self.current.store(Arc::new(client));
    }

    /// Rebuild from new description text, keeping the current root and options.
    ///
    /// # Errors
    ///
    /// Returns the bootstrap error and leaves the current client untouched.
    pub fn reload(&self, raw_description: &str) -> Result<Arc<Client>, BootstrapError> {
        let current = self.load();
        let next = Arc::new(Client::new(
            current.api_root(),
            raw_description,
            current.options().clone(),
        )?);
        self.current.store(Arc::clone(&next));
        info!(
            routes_count = next.registry().len(),
            base_path = %next.effective_root(),
            "Client reloaded"
        );
        Ok(next)
    }

    /// Read a description file and [`reload`](Self::reload) from it.
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> anyhow::Result<Arc<Client>> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read API description {}", path.display()))?;
        self.reload(&raw)
            .with_context(|| format!("failed to reload API description {}", path.display()))
    }
}

/// Watch a description file and reload `shared` when it changes.
///
/// `on_reload` runs after each successful swap. The returned watcher stops
/// watching when dropped.
pub fn watch_spec<P, F>(
    spec_path: P,
    shared: Arc<SharedClient>,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&Client) + Send + 'static,
{
    let path: PathBuf = spec_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    match shared.reload_from_path(&watch_path) {
                        Ok(client) => on_reload(&client),
                        Err(e) => warn!(
                            path = %watch_path.display(),
                            error = %format_args!("{e:#}"),
                            "hot-reload: keeping previous client"
                        ),
                    }
                }
            }
            Err(e) => warn!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
