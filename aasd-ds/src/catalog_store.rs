//! Shared product catalog with file-stamp cache
//!
//! Every request asks the store for the catalog. The parsed table is reused
//! while the file's modification time and length are both unchanged. An
//! edited file is read again on the next request, and a vanished or broken
//! file is reported as a load failure, exactly as if the file were re-read
//! every time.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use aasd_common::{Catalog, Error, Result};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Identity of one on-disk version of the catalog file
///
/// The length catches edits made within one timestamp tick on filesystems
/// with coarse modification times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    len: u64,
}

struct CachedCatalog {
    stamp: FileStamp,
    catalog: Arc<Catalog>,
}

/// Catalog source shared across HTTP handlers
pub struct CatalogStore {
    path: PathBuf,
    cache: Mutex<Option<CachedCatalog>>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current catalog, loading or reloading the file when needed
    pub async fn get(&self) -> Result<Arc<Catalog>> {
        let mut cache = self.cache.lock().await;

        let stamp = match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta.modified().ok().map(|modified| FileStamp {
                modified,
                len: meta.len(),
            }),
            Err(e) => {
                *cache = None;
                warn!("Catalog unavailable: {}: {}", self.path.display(), e);
                return Err(Error::catalog_load(&self.path, e));
            }
        };

        if let (Some(cached), Some(stamp)) = (cache.as_ref(), stamp) {
            if cached.stamp == stamp {
                debug!("Catalog cache hit: {}", self.path.display());
                return Ok(Arc::clone(&cached.catalog));
            }
        }

        let path = self.path.clone();
        let loaded = tokio::task::spawn_blocking(move || Catalog::load(path))
            .await
            .map_err(|e| Error::catalog_load(&self.path, e))?;

        match loaded {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                *cache = stamp.map(|stamp| CachedCatalog {
                    stamp,
                    catalog: Arc::clone(&catalog),
                });
                Ok(catalog)
            }
            Err(e) => {
                *cache = None;
                warn!("Catalog unavailable: {}", e);
                Err(e)
            }
        }
    }
}
