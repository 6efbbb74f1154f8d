//! Cache invalidation contract
//!
//! The scheduling app keeps query caches for views that depend on calendar
//! sync state. After every settled toggle request, success or failure, both
//! regions are invalidated so those views refetch.

use log::debug;

/// Named cache regions dependent views read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheRegion {
    Integrations,
    ConnectedCalendars,
}

impl CacheRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheRegion::Integrations => "integrations",
            CacheRegion::ConnectedCalendars => "connected_calendars",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait QueryCache: Send + Sync {
    fn invalidate(&self, region: CacheRegion);
}

/// Invalidate every region a settled toggle may have made stale.
pub fn invalidate_after_settle(cache: &dyn QueryCache) {
    cache.invalidate(CacheRegion::Integrations);
    cache.invalidate(CacheRegion::ConnectedCalendars);
}

/// Log-backed default for hosts without a query cache layer.
#[derive(Debug, Default)]
pub struct LogCache;

impl QueryCache for LogCache {
    fn invalidate(&self, region: CacheRegion) {
        debug!("[Cache] invalidate region '{}'", region.as_str());
    }
}
