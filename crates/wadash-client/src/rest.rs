//! Async REST client for the bot backend.
//!
//! One [`ApiClient`] is built at startup and cloned into every view that talks
//! to the backend. Requests are assembled, run through the interceptor chain
//! (tenant tagging first), and only then handed to `reqwest`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Request, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use wadash_common::config::{ApiConfig, TenantConfig};
use wadash_common::models::{
    BotsResponse, ContactsSync, GroupAnalytics, GroupDetails, GroupMembers, GroupsResponse,
    LoginRequest, Member, NewMember, RatingUpdate, ScheduledMessage, SendMessage,
    UpdateGroupBotConfig, UserDetails,
};
use wadash_common::validation::{validate_group_name, validate_request};

use crate::error::{ClientError, Result};
use crate::interceptor::{RequestInterceptor, TenantInterceptor};
use crate::location::LocationSource;
use crate::tenant::{TenantContext, TenantResolver};

/// Tenant-scoped backend client.
///
/// Cloning is cheap; clones share the connection pool, interceptors and
/// location.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tenant: Arc<TenantInterceptor>,
    interceptors: Arc<[Arc<dyn RequestInterceptor>]>,
    cancel: Option<CancellationToken>,
}

pub struct ApiClientBuilder {
    base_url: String,
    location: Arc<dyn LocationSource>,
    reserved_segments: Vec<String>,
    timeout: Option<Duration>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl ApiClientBuilder {
    /// Route names that never count as a tenant (see [`TenantResolver::with_reserved`]).
    pub fn reserved_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_segments = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Extra interceptor, run after tenant tagging on every request.
    pub fn interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        // Fail on a bad base URL now rather than on the first request.
        Url::parse(&self.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("wadash/", env!("CARGO_PKG_VERSION")))
            .http1_title_case_headers();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        let tenant = Arc::new(TenantInterceptor::new(
            TenantResolver::with_reserved(self.reserved_segments),
            self.location,
        ));
        let interceptors: Vec<Arc<dyn RequestInterceptor>> =
            std::iter::once(tenant.clone() as Arc<dyn RequestInterceptor>)
                .chain(self.interceptors)
                .collect();

        Ok(ApiClient {
            http: http.build()?,
            base_url: self.base_url,
            tenant,
            interceptors: interceptors.into(),
            cancel: None,
        })
    }
}

impl ApiClient {
    /// Start building a client for `base_url` whose requests are tagged from
    /// `location`.
    pub fn builder(
        base_url: impl Into<String>,
        location: Arc<dyn LocationSource>,
    ) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            location,
            reserved_segments: Vec::new(),
            timeout: None,
            interceptors: Vec::new(),
        }
    }

    pub fn from_config(
        api: &ApiConfig,
        tenant: &TenantConfig,
        location: Arc<dyn LocationSource>,
    ) -> Result<Self> {
        let mut builder = Self::builder(api.base_url.clone(), location)
            .reserved_segments(tenant.reserved_segments.iter().cloned());
        if let Some(timeout) = api.timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// A clone whose requests fail with [`ClientError::Cancelled`] once `token`
    /// is cancelled, e.g. when the view that issued them goes away.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self { cancel: Some(token), ..self.clone() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The tenant a request issued right now would be tagged with.
    pub fn tenant_context(&self) -> TenantContext {
        self.tenant.context()
    }

    // ── Core ──────────────────────────────────────────────────────────────────

    /// Build the outgoing request and run every interceptor on it.
    pub fn prepare(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Request> {
        self.prepare_url(method, self.endpoint_url(path)?, body)
    }

    fn prepare_url(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Request> {
        let mut builder = self.http.request(method, url);
        if let Some(b) = body {
            builder = builder.json(b);
        }
        let mut request = builder.build()?;
        for interceptor in self.interceptors.iter() {
            interceptor.intercept(&mut request);
        }
        Ok(request)
    }

    /// Send a prepared request. Non-2xx responses become [`ClientError::Api`].
    pub async fn execute(&self, request: Request) -> Result<Response> {
        self.cancellable(self.send_checked(request)).await
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        let request = self.prepare(method, path, body)?;
        self.send(request).await
    }

    /// Send a prepared request and decode its JSON body, both under the
    /// cancellation token.
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        self.cancellable(async {
            let response = self.send_checked(request).await?;
            decode(response).await
        })
        .await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None).await
    }

    async fn send_checked(&self, request: Request) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        let response = self.http.execute(request).await?;
        let status = response.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "backend responded");
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ClientError::Api { status: status.as_u16(), body });
        }
        Ok(response)
    }

    async fn cancellable<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let Some(token) = &self.cancel else {
            return fut.await;
        };
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!("request cancelled");
                Err(ClientError::Cancelled)
            }
            result = fut => result,
        }
    }

    // ── Session ───────────────────────────────────────────────────────────────

    pub async fn login(&self, username: &str, password: &str) -> Result<UserDetails> {
        let body = serde_json::to_value(LoginRequest {
            username: username.to_owned(),
            password: password.to_owned(),
        })?;
        self.post("login/", &body).await
    }

    // ── Groups ────────────────────────────────────────────────────────────────

    pub async fn get_groups(&self) -> Result<GroupsResponse> {
        self.get("/group_details/get_groups").await
    }

    pub async fn get_group_details(&self, group_id: i64) -> Result<GroupDetails> {
        self.get(&format!("/group_details/get_group_details/{group_id}")).await
    }

    pub async fn get_group_members(&self, group_id: i64) -> Result<GroupMembers> {
        self.get(&format!("/group_details/get_group_members/{group_id}")).await
    }

    pub async fn delete_group(&self, name: &str) -> Result<Value> {
        validate_group_name(name)?;
        let url = self.segment_url("/group_details/delete_group", name)?;
        self.send(self.prepare_url(Method::DELETE, url, None)?).await
    }

    pub async fn add_member(&self, member: &NewMember) -> Result<Member> {
        validate_request(member)?;
        self.post("/group_details/add_member", &serde_json::to_value(member)?).await
    }

    pub async fn update_group_bot_config(&self, group_id: i64, botconfig_id: i64) -> Result<Value> {
        let body = serde_json::to_value(UpdateGroupBotConfig { botconfig_id })?;
        self.post(&format!("group_details/group_update_botconfig/{group_id}"), &body).await
    }

    // ── Bots ──────────────────────────────────────────────────────────────────

    pub async fn get_bot_configs(&self) -> Result<BotsResponse> {
        self.get("/bot_details/get_bot_config").await
    }

    // ── Contacts & messages ───────────────────────────────────────────────────

    pub async fn update_rating(&self, update: &RatingUpdate) -> Result<Value> {
        validate_request(update)?;
        self.put("/contact/update-rating", &serde_json::to_value(update)?).await
    }

    pub async fn send_message(&self, message: &SendMessage) -> Result<Value> {
        validate_request(message)?;
        self.post("/proxy/send", &serde_json::to_value(message)?).await
    }

    pub async fn schedule_message(&self, message: &ScheduledMessage) -> Result<Value> {
        validate_request(message)?;
        self.post("/messages/schedule", &serde_json::to_value(message)?).await
    }

    /// Ask the backend to resync contacts from WhatsApp.
    pub async fn sync_contacts(&self) -> Result<ContactsSync> {
        self.get("/contact/sync").await
    }

    // ── Analytics ─────────────────────────────────────────────────────────────

    pub async fn get_dashboard(&self) -> Result<Vec<GroupAnalytics>> {
        self.get("/dashboard").await
    }

    // ── URLs ──────────────────────────────────────────────────────────────────

    fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&join_url(&self.base_url, path))?)
    }

    /// `prefix` followed by `segment` as one percent-encoded path segment.
    fn segment_url(&self, prefix: &str, segment: &str) -> Result<Url> {
        let mut url = self.endpoint_url(prefix)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// `base` and `path` joined by exactly one `/`.
fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_owned();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// An empty 2xx body decodes as JSON `null`.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
