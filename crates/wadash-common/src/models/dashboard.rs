//! Per-group analytics shown on the dashboard charts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the raw `/dashboard` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAnalytics {
    pub name: String,
    #[serde(default)]
    pub sentiment_data: Value,
    #[serde(default)]
    pub engagement_data: Value,
    #[serde(default)]
    pub topics_data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDashboard {
    pub sentiment_data: Value,
    pub engagement_data: Value,
    pub topics_data: Value,
}

/// The `/dashboard` response indexed by group name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Group names in response order.
    pub groups: Vec<String>,
    pub dashboard_data: BTreeMap<String, GroupDashboard>,
}

impl DashboardData {
    /// A later entry with a repeated name replaces the earlier one's data.
    pub fn from_groups(raw: Vec<GroupAnalytics>) -> Self {
        let mut data = Self::default();
        for group in raw {
            data.groups.push(group.name.clone());
            data.dashboard_data.insert(
                group.name,
                GroupDashboard {
                    sentiment_data: group.sentiment_data,
                    engagement_data: group.engagement_data,
                    topics_data: group.topics_data,
                },
            );
        }
        data
    }
}
