//! Tenant-scoped client for the WhatsApp bot admin backend.
//!
//! Every request issued through [`ApiClient`] is tagged with an `X-Tenant-Id`
//! header taken from the first segment of the current navigation path, read at
//! the moment the request is prepared.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wadash_client::{ApiClient, Navigator};
//!
//! #[tokio::main]
//! async fn main() -> wadash_client::Result<()> {
//!     let nav = Navigator::new("/42/groups");
//!     let client = ApiClient::builder("http://localhost:8000", Arc::new(nav.clone())).build()?;
//!
//!     // Sent with `X-Tenant-Id: 42`.
//!     let groups = client.get_groups().await?;
//!     println!("{} groups", groups.groups.len());
//!
//!     nav.navigate("/7/groups");
//!     // Sent with `X-Tenant-Id: 7`.
//!     client.get_groups().await?;
//!     Ok(())
//! }
//! ```

pub mod dashboard;
pub mod error;
pub mod interceptor;
pub mod location;
pub mod rest;
pub mod tenant;

pub use dashboard::DashboardService;
pub use error::{ClientError, Result};
pub use interceptor::{RequestInterceptor, TenantInterceptor};
pub use location::{LocationSource, Navigator, Route};
pub use rest::{ApiClient, ApiClientBuilder};
pub use tenant::{TENANT_HEADER, TenantContext, TenantId, TenantResolver};
pub use tokio_util::sync::CancellationToken;
pub use wadash_common::models;
