//! Durable view-model cache port
//!
//! The dashboard persists its last good view model so a restart can show
//! stale-but-real data before the network answers. Loading is synchronous
//! and infallible from the caller's perspective: a missing or corrupt
//! cache simply yields nothing.

use domain::entities::ViewModel;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the single-slot durable view-model cache
#[cfg_attr(test, automock)]
pub trait BundleCachePort: Send + Sync {
    /// Load the cached view model, if a readable one exists
    fn load(&self) -> Option<ViewModel>;

    /// Persist the view model, replacing any previous slot contents
    fn store(&self, view: &ViewModel) -> Result<(), ApplicationError>;
}
