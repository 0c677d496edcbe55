//! Payloads exchanged with the bot backend.
//!
//! The backend owns these schemas. Fields the dashboard does not read are kept
//! in `extra` so they pass through untouched.

pub mod bot;
pub mod dashboard;
pub mod group;
pub mod message;
pub mod user;

pub use bot::*;
pub use dashboard::*;
pub use group::*;
pub use message::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// Accepts `"42"` or `42` and yields `"42"`. The backend is inconsistent about
/// the type of tenant ids.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
