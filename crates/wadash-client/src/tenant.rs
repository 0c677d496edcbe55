//! Tenant resolution from the navigation path.
//!
//! The tenant id is the first segment of the path: `/42/home` belongs to
//! tenant `42`. Resolution never fails; it yields `None` when there is no
//! usable segment and the caller sends the request untagged.

use std::fmt;

use crate::location::LocationSource;

/// Header carrying the tenant id. Sent title-cased (`X-Tenant-Id`) on HTTP/1.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Opaque tenant identifier, exactly as it appeared in the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element 1 of `path.split('/')`, if present and non-empty.
///
/// No trimming, decoding or case folding is applied.
pub fn tenant_segment(path: &str) -> Option<&str> {
    path.split('/').nth(1).filter(|segment| !segment.is_empty())
}

/// Maps a path to a tenant id, optionally refusing reserved route names.
#[derive(Debug, Clone, Default)]
pub struct TenantResolver {
    reserved: Vec<String>,
}

impl TenantResolver {
    /// `reserved` segments (e.g. `login`) resolve to no tenant at all.
    pub fn with_reserved<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { reserved: reserved.into_iter().map(Into::into).collect() }
    }

    pub fn resolve(&self, path: &str) -> Option<TenantId> {
        let segment = tenant_segment(path)?;
        if self.reserved.iter().any(|r| r == segment) {
            return None;
        }
        Some(TenantId(segment.to_owned()))
    }
}

/// Tenant identity of one outgoing request, captured at send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: Option<TenantId>,
}

impl TenantContext {
    pub fn capture(resolver: &TenantResolver, location: &dyn LocationSource) -> Self {
        Self { tenant_id: resolver.resolve(&location.pathname()) }
    }

    pub fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }
}
