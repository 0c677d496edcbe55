//! Navigation location, the source tenant ids are read from.

use std::sync::Arc;

use arc_swap::ArcSwap;
use url::Url;

/// Read-only view of the current navigation path, consulted on every request.
pub trait LocationSource: Send + Sync {
    /// Current path, e.g. `/42/messages`.
    fn pathname(&self) -> String;
}

/// Shared, lock-free current location.
///
/// Clones share the same slot: a [`navigate`](Self::navigate) through any
/// clone is seen by every client holding another.
#[derive(Debug, Clone)]
pub struct Navigator {
    path: Arc<ArcSwap<String>>,
}

impl Navigator {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: Arc::new(ArcSwap::from_pointee(path.into())) }
    }

    pub fn navigate(&self, path: impl Into<String>) {
        let path = path.into();
        tracing::trace!(%path, "navigate");
        self.path.store(Arc::new(path));
    }

    /// Navigate to the path component of `url`; query and fragment are dropped.
    pub fn navigate_url(&self, url: &Url) {
        self.navigate(url.path());
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl LocationSource for Navigator {
    fn pathname(&self) -> String {
        String::clone(&self.path.load())
    }
}

/// Tenant-scoped dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Messages,
    Groups,
    Contacts,
    Settings,
}

impl Route {
    pub fn segment(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Messages => "messages",
            Self::Groups => "groups",
            Self::Contacts => "contacts",
            Self::Settings => "settings",
        }
    }

    pub fn path(self, tenant: &str) -> String {
        format!("/{tenant}/{}", self.segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_location() {
        let nav = Navigator::new("/3/home");
        let other = nav.clone();
        other.navigate("/7/home");
        assert_eq!(nav.pathname(), "/7/home");
    }

    #[test]
    fn test_navigate_url_drops_query() {
        let nav = Navigator::default();
        assert_eq!(nav.pathname(), "/");
        let url = Url::parse("https://dash.example.com/42/contacts?page=2#top").unwrap();
        nav.navigate_url(&url);
        assert_eq!(nav.pathname(), "/42/contacts");
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.path("42"), "/42/home");
        assert_eq!(Route::Settings.path("acme"), "/acme/settings");
    }
}
