use medfleet_store::Record;
use serde::{Deserialize, Serialize};

use super::media::Photo;

// ---------------------------------------------------------------------------
// InstallationStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of an installation.
///
/// ```text
/// Pending → In Progress → Completed
///                       → Cancelled
///         → Cancelled
/// ```
///
/// Transitions outside this graph are rejected by the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallationStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl InstallationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether the installation has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition(&self, next: InstallationStatus) -> bool {
        use InstallationStatus::*;
        matches!(
            (*self, next),
            (Pending, InProgress)
                | (Pending, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }
}

impl std::fmt::Display for InstallationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChecklistItem / Installation
// ---------------------------------------------------------------------------

/// One discrete task within an installation's completion tracking.
///
/// `completed_by`/`completed_at` are present iff `completed` — enforced by
/// `FleetService::complete_checklist_item`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub task: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,

    /// RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

/// A device installation job at a facility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    pub id: String,

    pub device_id: String,
    pub facility_id: String,
    pub engineer_id: String,

    /// Denormalized display field; `engineer_id` is the authoritative link.
    pub engineer_name: String,

    /// Calendar date, `YYYY-MM-DD`.
    pub installation_date: String,

    pub status: InstallationStatus,

    /// Ordered task sequence.
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    #[serde(default)]
    pub photos: Vec<Photo>,

    pub training_completed: bool,

    #[serde(default)]
    pub notes: String,
}

impl Installation {
    /// (completed, total) checklist counts.
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|i| i.completed).count();
        (done, self.checklist.len())
    }
}

impl Record for Installation {
    fn kind() -> &'static str {
        "fleet:installation:"
    }

    fn label() -> &'static str {
        "installation"
    }

    fn key(&self) -> String {
        self.id.clone()
    }

    fn before_create(&mut self) {
        if self.id.is_empty() {
            self.id = medfleet_core::new_id();
        }
    }
}

/// Conjunction of independent predicates; `None`/empty means no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstallationFilter {
    /// Case-insensitive substring match over engineer name and device id.
    #[serde(default)]
    pub q: String,

    #[serde(default)]
    pub status: Option<InstallationStatus>,
}

impl InstallationFilter {
    pub fn matches(&self, i: &Installation) -> bool {
        let q = self.q.trim().to_lowercase();
        let matches_search = q.is_empty()
            || i.engineer_name.to_lowercase().contains(&q)
            || i.device_id.to_lowercase().contains(&q);
        let matches_status = self.status.map_or(true, |s| i.status == s);
        matches_search && matches_status
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
