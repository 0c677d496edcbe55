//! Dashboard analytics, fetched once per tenant and served from memory.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Method;
use wadash_common::models::{DashboardData, GroupAnalytics, GroupDashboard};

use crate::error::{ClientError, Result};
use crate::rest::ApiClient;
use crate::tenant::TENANT_HEADER;

const DASHBOARD_PATH: &str = "/dashboard";

/// Cache key: the tenant header value the fetch was actually sent with.
type CacheKey = Option<String>;

/// Per-tenant cache over the backend's `/dashboard` endpoint.
pub struct DashboardService {
    client: ApiClient,
    cache: Mutex<HashMap<CacheKey, Arc<DashboardData>>>,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client, cache: Mutex::new(HashMap::new()) }
    }

    /// Dashboard data for the current tenant, fetched on first use.
    pub async fn fetch_all_data(&self) -> Result<Arc<DashboardData>> {
        let request = self.client.prepare(Method::GET, DASHBOARD_PATH, None)?;
        let key: CacheKey = request
            .headers()
            .get(TENANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let cached = self.lock().get(&key).cloned();
        if let Some(hit) = cached {
            return Ok(hit);
        }

        let raw: Vec<GroupAnalytics> = self.client.send(request).await.inspect_err(|e| {
            tracing::error!(tenant = ?key, error = %e, "failed to fetch dashboard data");
        })?;
        let data = Arc::new(DashboardData::from_groups(raw));
        self.lock().insert(key, data.clone());
        Ok(data)
    }

    pub async fn get_all_groups_dashboard_data(&self) -> Result<BTreeMap<String, GroupDashboard>> {
        Ok(self.fetch_all_data().await?.dashboard_data.clone())
    }

    pub async fn get_available_groups(&self) -> Result<Vec<String>> {
        Ok(self.fetch_all_data().await?.groups.clone())
    }

    pub async fn get_dashboard_data(&self, group: &str) -> Result<GroupDashboard> {
        self.fetch_all_data()
            .await?
            .dashboard_data
            .get(group)
            .cloned()
            .ok_or_else(|| ClientError::from(wadash_common::Error::not_found(format!("Group {group}"))))
    }

    /// Drop every cached tenant so the next call refetches.
    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Arc<DashboardData>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
