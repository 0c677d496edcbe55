//! Login exchange.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// What the backend returns for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(rename = "tenantId", deserialize_with = "super::string_or_number")]
    pub tenant_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_tenant_id() {
        let user: UserDetails =
            serde_json::from_str(r#"{"tenantId": 42, "username": "ops"}"#).unwrap();
        assert_eq!(user.tenant_id, "42");

        let user: UserDetails = serde_json::from_str(r#"{"tenantId": "acme"}"#).unwrap();
        assert_eq!(user.tenant_id, "acme");
        assert_eq!(user.username, None);
    }
}
