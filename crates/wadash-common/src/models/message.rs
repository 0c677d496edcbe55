//! Outbound messages, member ratings, and scheduled sends.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Send a direct message to a member through the WhatsApp proxy.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessage {
    #[validate(custom(function = "crate::validation::not_blank", message = "Recipient name is required"))]
    pub name: String,
    #[validate(custom(function = "crate::validation::not_blank", message = "Message cannot be empty"))]
    pub message: String,
}

/// Star rating for a group member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct RatingUpdate {
    pub group_id: i64,
    pub member_id: i64,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
}

/// A message handed to the backend scheduler for delivery at `schedule_time`
/// (local wall-clock time, as entered).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScheduledMessage {
    #[validate(custom(function = "crate::validation::not_blank", message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(custom(function = "crate::validation::not_blank", message = "Message cannot be empty"))]
    pub message: String,
    pub schedule_time: NaiveDateTime,
}
