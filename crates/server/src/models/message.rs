//! Contact message domain types.
//!
//! A `Message` is created from the public contact form and afterwards only
//! touched by staff: marking it read, changing its status, adding notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use harborview_core::{Email, MessageId, MessageStatus, ValidationErrors};

use super::form::{non_empty, optional_bool, optional_string, required_text};

const NAME_MIN: usize = 2;
const SUBJECT_MIN: usize = 2;
const MESSAGE_MIN: usize = 5;
const PHONE_MIN: usize = 7;
const PHONE_MAX: usize = 20;

/// A contact form submission as persisted in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Opaque unique ID.
    pub id: MessageId,
    /// Sender's name.
    pub name: String,
    /// Sender's email, if given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    /// Sender's phone number, if given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Staff workflow status.
    #[serde(default)]
    pub status: MessageStatus,
    /// Whether staff have opened the message.
    #[serde(default)]
    pub is_read: bool,
    /// When the message was submitted.
    pub created_at: DateTime<Utc>,
    /// When the message was last changed.
    pub updated_at: DateTime<Utc>,
    /// Internal staff notes.
    #[serde(default)]
    pub admin_notes: String,
    /// Fields this server does not manage, kept as found.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Message {
    /// Build a fresh, unread message from a validated submission.
    #[must_use]
    pub fn from_submission(new: NewMessage, now: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::generate(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            subject: new.subject,
            message: new.message,
            status: MessageStatus::New,
            is_read: false,
            created_at: now,
            updated_at: now,
            admin_notes: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Mark the message as read.
    pub fn mark_read(&mut self, now: DateTime<Utc>) {
        self.is_read = true;
        self.updated_at = now;
    }

    /// Merge a staff update onto the message.
    pub fn apply(&mut self, patch: MessagePatch, now: DateTime<Utc>) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.admin_notes {
            self.admin_notes = notes;
        }
        if let Some(is_read) = patch.is_read {
            self.is_read = is_read;
        }
        self.updated_at = now;
    }
}

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub name: String,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Raw contact form body.
///
/// Fields are loose JSON values so that missing or mistyped fields are
/// reported as validation errors alongside the others instead of failing
/// deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub subject: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl ContactForm {
    /// Validate the submission.
    ///
    /// Text fields are trimmed first. An empty email or phone counts as not
    /// given.
    ///
    /// # Errors
    ///
    /// Returns every failed field check at once.
    pub fn validate(self) -> Result<NewMessage, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(&mut errors, "name", self.name, NAME_MIN);
        let subject = required_text(&mut errors, "subject", self.subject, SUBJECT_MIN);
        let message = required_text(&mut errors, "message", self.message, MESSAGE_MIN);

        let email = match non_empty(optional_string(&mut errors, "email", self.email)) {
            Some(raw) => match Email::parse(&raw) {
                Ok(email) => Some(email),
                Err(_) => {
                    errors.add("email", "Invalid email");
                    None
                }
            },
            None => None,
        };

        let phone = non_empty(optional_string(&mut errors, "phone", self.phone));
        if let Some(phone) = &phone {
            errors.check_min_chars("phone", phone, PHONE_MIN);
            errors.check_max_chars("phone", phone, PHONE_MAX);
        }

        errors.finish(NewMessage {
            name,
            email,
            phone,
            subject,
            message,
        })
    }
}

/// A validated staff update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePatch {
    pub status: Option<MessageStatus>,
    pub admin_notes: Option<String>,
    pub is_read: Option<bool>,
}

/// Raw staff update body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePatchForm {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub admin_notes: Option<Value>,
    #[serde(default)]
    pub is_read: Option<Value>,
}

impl MessagePatchForm {
    /// Validate the update.
    ///
    /// # Errors
    ///
    /// Returns an error if `status` is not one of the known statuses or a
    /// field has the wrong JSON type.
    pub fn validate(self) -> Result<MessagePatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let status = match optional_string(&mut errors, "status", self.status) {
            Some(raw) => match raw.parse::<MessageStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    let expected = MessageStatus::ALL
                        .iter()
                        .map(|s| format!("'{s}'"))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    errors.add(
                        "status",
                        format!("Invalid enum value. Expected {expected}, received '{raw}'"),
                    );
                    None
                }
            },
            None => None,
        };

        let admin_notes = optional_string(&mut errors, "adminNotes", self.admin_notes);
        let is_read = optional_bool(&mut errors, "isRead", self.is_read);

        errors.finish(MessagePatch {
            status,
            admin_notes,
            is_read,
        })
    }
}

/// Inbox counters shown on the staff dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MessageStats {
    pub total: usize,
    pub unread: usize,
    pub replied: usize,
}

impl MessageStats {
    /// Count messages.
    #[must_use]
    pub fn from_messages(messages: &[Message]) -> Self {
        Self {
            total: messages.len(),
            unread: messages.iter().filter(|m| !m.is_read).count(),
            replied: messages
                .iter()
                .filter(|m| m.status == MessageStatus::Replied)
                .count(),
        }
    }
}

/// Sort newest first by `created_at`. Ties keep their stored order.
pub fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
