//! WhatsApp groups and their members.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// A group as listed by `get_groups`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Group {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupsResponse {
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDetails {
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMembers {
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Assign a bot configuration to a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGroupBotConfig {
    pub botconfig_id: i64,
}

/// A contact added to a group by hand.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMember {
    #[validate(custom(function = "crate::validation::not_blank", message = "Member name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(rename = "groupId")]
    pub group_id: i64,
    #[serde(default = "NewMember::default_role")]
    pub role: String,
}

impl NewMember {
    fn default_role() -> String {
        "member".to_owned()
    }
}

/// Result of a contact resync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsSync {
    #[serde(rename = "lastSynced", default)]
    pub last_synced: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_response_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "groups": [{
                "id": 3,
                "name": "Family",
                "members": [{ "id": 9, "name": "Asha", "rating": 4, "phone": "+911234" }],
                "bot_id": 12
            }]
        });
        let resp: GroupsResponse = serde_json::from_value(raw).unwrap();
        let group = &resp.groups[0];
        assert_eq!(group.name, "Family");
        assert_eq!(group.description, None);
        assert_eq!(group.member_count(), 1);
        assert_eq!(group.members[0].extra["phone"], "+911234");
        assert_eq!(group.extra["bot_id"], 12);

        let back = serde_json::to_value(group).unwrap();
        assert_eq!(back["bot_id"], 12);
    }

    #[test]
    fn test_new_member_wire_shape() {
        let member: NewMember = serde_json::from_value(serde_json::json!({
            "name": "New Member",
            "email": "new.member@company.com",
            "groupId": 3
        }))
        .unwrap();
        assert_eq!(member.role, "member");
        assert!(member.validate().is_ok());

        let sent = serde_json::to_value(&member).unwrap();
        assert_eq!(sent["groupId"], 3);
        assert!(sent.get("group_id").is_none());
    }

    #[test]
    fn test_new_member_rejects_bad_input() {
        let member = NewMember {
            name: " ".into(),
            email: "not-an-email".into(),
            group_id: 3,
            role: "member".into(),
        };
        let errors = member.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_contacts_sync_timestamp() {
        let sync: ContactsSync =
            serde_json::from_str(r#"{"lastSynced":"2026-10-18T09:00:00Z","count":12}"#).unwrap();
        assert_eq!(sync.last_synced.as_deref(), Some("2026-10-18T09:00:00Z"));
        assert_eq!(sync.extra["count"], 12);
    }

    #[test]
    fn test_missing_groups_defaults_to_empty() {
        let resp: GroupsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.groups.is_empty());
    }
}
