//! Request interceptors: hooks run on every outgoing request before it is
//! handed to the transport.

use std::sync::Arc;

use reqwest::Request;
use reqwest::header::{HeaderName, HeaderValue};

use crate::location::LocationSource;
use crate::tenant::{TENANT_HEADER, TenantContext, TenantResolver};

/// Mutates a prepared request in place. Must not block or perform I/O.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: &mut Request);
}

/// Tags requests with the tenant of the current navigation path.
pub struct TenantInterceptor {
    resolver: TenantResolver,
    location: Arc<dyn LocationSource>,
}

impl TenantInterceptor {
    pub fn new(resolver: TenantResolver, location: Arc<dyn LocationSource>) -> Self {
        Self { resolver, location }
    }

    pub fn context(&self) -> TenantContext {
        TenantContext::capture(&self.resolver, self.location.as_ref())
    }
}

impl RequestInterceptor for TenantInterceptor {
    fn intercept(&self, request: &mut Request) {
        let ctx = self.context();
        let Some(tenant) = ctx.tenant_id() else {
            tracing::debug!(url = %request.url(), "no tenant in path; sending untagged");
            return;
        };

        match HeaderValue::from_str(tenant.as_str()) {
            Ok(value) => {
                tracing::debug!(%tenant, url = %request.url(), "tagging request");
                request
                    .headers_mut()
                    .insert(HeaderName::from_static(TENANT_HEADER), value);
            }
            Err(_) => {
                tracing::warn!(
                    %tenant,
                    url = %request.url(),
                    "tenant id is not a valid header value; sending untagged"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Navigator;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use reqwest::{Method, Url};

    fn interceptor(path: &str) -> (TenantInterceptor, Navigator) {
        let nav = Navigator::new(path);
        (TenantInterceptor::new(TenantResolver::default(), Arc::new(nav.clone())), nav)
    }

    fn request() -> Request {
        Request::new(
            Method::GET,
            Url::parse("http://localhost:8000/group_details/get_groups").unwrap(),
        )
    }

    fn tenant_header(request: &Request) -> Option<&str> {
        request.headers().get(TENANT_HEADER).map(|v| v.to_str().unwrap())
    }

    #[test]
    fn test_sets_header_from_path() {
        let (ic, _) = interceptor("/42/messages");
        let mut req = request();
        ic.intercept(&mut req);
        assert_eq!(tenant_header(&req), Some("42"));
    }

    #[test]
    fn test_root_path_leaves_headers_alone() {
        let (ic, _) = interceptor("/");
        let mut req = request();
        ic.intercept(&mut req);
        assert!(req.headers().is_empty());
    }

    #[test]
    fn test_login_path_is_sent_as_tenant() {
        let (ic, _) = interceptor("/login");
        let mut req = request();
        ic.intercept(&mut req);
        assert_eq!(tenant_header(&req), Some("login"));
    }

    #[test]
    fn test_does_not_touch_method_body_or_other_headers() {
        let (ic, _) = interceptor("/42/contacts");
        let mut req = Request::new(
            Method::PUT,
            Url::parse("http://localhost:8000/contact/update-rating").unwrap(),
        );
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        req.headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        *req.body_mut() = Some(r#"{"rating":4}"#.into());

        ic.intercept(&mut req);

        assert_eq!(req.method(), &Method::PUT);
        assert_eq!(req.url().path(), "/contact/update-rating");
        assert_eq!(req.headers().len(), 3);
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer abc");
        assert_eq!(
            req.body().and_then(|b| b.as_bytes()),
            Some(br#"{"rating":4}"#.as_slice())
        );
        assert_eq!(tenant_header(&req), Some("42"));
    }

    #[test]
    fn test_replaces_stale_tenant_header() {
        let (ic, _) = interceptor("/7/home");
        let mut req = request();
        req.headers_mut()
            .insert(TENANT_HEADER, HeaderValue::from_static("3"));
        ic.intercept(&mut req);
        assert_eq!(req.headers().get_all(TENANT_HEADER).iter().count(), 1);
        assert_eq!(tenant_header(&req), Some("7"));
    }

    #[test]
    fn test_unrepresentable_tenant_degrades_to_untagged() {
        let (ic, _) = interceptor("/caf\u{e9}\n/home");
        let mut req = request();
        ic.intercept(&mut req);
        assert_eq!(tenant_header(&req), None);
    }

    #[test]
    fn test_same_path_same_header() {
        let (ic, _) = interceptor("/42/home");
        let mut a = request();
        let mut b = request();
        ic.intercept(&mut a);
        ic.intercept(&mut b);
        assert_eq!(tenant_header(&a), tenant_header(&b));
    }

    #[test]
    fn test_follows_navigation() {
        let (ic, nav) = interceptor("/3/home");
        let mut first = request();
        ic.intercept(&mut first);
        nav.navigate("/7/home");
        let mut second = request();
        ic.intercept(&mut second);
        assert_eq!(tenant_header(&first), Some("3"));
        assert_eq!(tenant_header(&second), Some("7"));
    }
}
