//! Load-once holder for a model bundle shared by concurrent callers.

use crate::config::AssetConfig;
use crate::error::{Result, SpamSiftError};
use crate::model::ModelBundle;
use log::info;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

type Loader = Box<dyn Fn() -> Result<ModelBundle> + Send + Sync>;

/// A model bundle that is loaded on first use, at most once.
///
/// Concurrent first callers block while a single loader runs. A failed load
/// is returned to the caller that ran it and the next caller tries again;
/// nothing is cached until a load succeeds.
pub struct SharedBundle {
    cell: OnceCell<Arc<ModelBundle>>,
    loader: Option<Loader>,
}

impl SharedBundle {
    /// Creates a holder around `loader`.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<ModelBundle> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            loader: Some(Box::new(loader)),
        }
    }

    /// Creates a holder that loads the artifacts named in `assets`.
    pub fn from_config(assets: AssetConfig) -> Self {
        Self::new(move || ModelBundle::load(&assets))
    }

    /// Wraps an already loaded bundle.
    pub fn preloaded(bundle: Arc<ModelBundle>) -> Self {
        Self {
            cell: OnceCell::with_value(bundle),
            loader: None,
        }
    }

    /// Returns the bundle, loading it if no load has succeeded yet.
    pub fn get_or_load(&self) -> Result<Arc<ModelBundle>> {
        self.cell
            .get_or_try_init(|| {
                let loader = self.loader.as_ref().ok_or_else(|| {
                    SpamSiftError::Config("shared bundle has no loader".to_string())
                })?;
                info!("Loading shared model bundle");
                loader().map(Arc::new)
            })
            .map(Arc::clone)
    }

    /// Returns the bundle if it has been loaded.
    pub fn get(&self) -> Option<Arc<ModelBundle>> {
        self.cell.get().cloned()
    }

    /// Returns true once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl fmt::Debug for SharedBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBundle")
            .field("bundle", &self.cell.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CountVectorizer, LinearModel, SupportSelector};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn tiny_bundle() -> Result<ModelBundle> {
        ModelBundle::new(
            Box::new(CountVectorizer::from_terms(["free", "prize"])?),
            Box::new(SupportSelector::new(2, vec![0, 1])?),
            Box::new(LinearModel::new([0, 1], vec![1.0, 1.0], -0.5)),
        )
    }

    #[test]
    fn test_loader_runs_once_across_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let shared = Arc::new(SharedBundle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(20));
            tiny_bundle()
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || shared.get_or_load().unwrap())
            })
            .collect();
        let bundles: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(bundles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert!(shared.is_loaded());
    }

    #[test]
    fn test_failed_load_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let shared = SharedBundle::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(SpamSiftError::asset_unavailable("classifier.json", "not yet"))
            } else {
                tiny_bundle()
            }
        });

        assert!(shared.get_or_load().is_err());
        assert!(!shared.is_loaded());
        assert!(shared.get().is_none());
        assert!(shared.get_or_load().is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_preloaded() {
        let bundle = Arc::new(tiny_bundle().unwrap());
        let shared = SharedBundle::preloaded(Arc::clone(&bundle));
        assert!(shared.is_loaded());
        assert!(shared.loader.is_none());

        let first = shared.get_or_load().unwrap();
        let second = shared.get_or_load().unwrap();
        assert!(Arc::ptr_eq(&first, &bundle));
        assert!(Arc::ptr_eq(&second, &bundle));
        assert_eq!(first.summary().vocabulary_size, 2);
    }
}
