//! Status enums for stored entities.

use serde::{Deserialize, Serialize};

/// Workflow status of a contact message.
///
/// There are no enforced transitions: staff may set any status at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MessageStatus {
    /// Freshly submitted, not yet handled.
    #[default]
    New,
    InProgress,
    Replied,
    Archived,
}

impl MessageStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 4] = [Self::New, Self::InProgress, Self::Replied, Self::Archived];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in-progress",
            Self::Replied => "replied",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("invalid message status: {s}"))
    }
}
