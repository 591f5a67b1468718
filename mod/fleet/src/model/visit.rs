use medfleet_store::Record;
use serde::{Deserialize, Serialize};

use super::media::{Attachment, Photo};

// ---------------------------------------------------------------------------
// VisitPurpose / VisitStatus
// ---------------------------------------------------------------------------

/// Why the engineer is on site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitPurpose {
    Preventive,
    Breakdown,
    Installation,
    Training,
}

impl VisitPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preventive => "Preventive",
            Self::Breakdown => "Breakdown",
            Self::Installation => "Installation",
            Self::Training => "Training",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Preventive" => Some(Self::Preventive),
            "Breakdown" => Some(Self::Breakdown),
            "Installation" => Some(Self::Installation),
            "Training" => Some(Self::Training),
            _ => None,
        }
    }
}

impl std::fmt::Display for VisitPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a service visit.
///
/// ```text
/// Scheduled → In Progress → Completed
///                         → Cancelled
///           → Cancelled
/// ```
///
/// Transitions outside this graph are rejected by the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl VisitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Scheduled" => Some(Self::Scheduled),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether the visit has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition(&self, next: VisitStatus) -> bool {
        use VisitStatus::*;
        matches!(
            (*self, next),
            (Scheduled, InProgress)
                | (Scheduled, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ServiceVisit
// ---------------------------------------------------------------------------

/// A service call against one device at one facility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceVisit {
    pub id: String,

    pub device_id: String,
    pub facility_id: String,
    pub engineer_id: String,

    /// Denormalized display field; `engineer_id` is the authoritative link.
    pub engineer_name: String,

    /// Calendar date, `YYYY-MM-DD`.
    pub visit_date: String,

    pub purpose: VisitPurpose,
    pub status: VisitStatus,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub photos: Vec<Photo>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// On-site time in minutes.
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
}

impl Record for ServiceVisit {
    fn kind() -> &'static str {
        "fleet:visit:"
    }

    fn label() -> &'static str {
        "service visit"
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
pub struct VisitFilter {
    /// Case-insensitive substring match over engineer name and device id.
    #[serde(default)]
    pub q: String,

    #[serde(default)]
    pub status: Option<VisitStatus>,

    #[serde(default)]
    pub purpose: Option<VisitPurpose>,
}

impl VisitFilter {
    pub fn matches(&self, v: &ServiceVisit) -> bool {
        let q = self.q.trim().to_lowercase();
        let matches_search = q.is_empty()
            || v.engineer_name.to_lowercase().contains(&q)
            || v.device_id.to_lowercase().contains(&q);
        let matches_status = self.status.map_or(true, |s| v.status == s);
        let matches_purpose = self.purpose.map_or(true, |p| v.purpose == p);
        matches_search && matches_status && matches_purpose
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn visit() -> ServiceVisit {
        ServiceVisit {
            id: "SV001".into(),
            device_id: "DEV001".into(),
            facility_id: "FAC001".into(),
            engineer_id: "ENG001".into(),
            engineer_name: "John Smith".into(),
            visit_date: "2024-01-15".into(),
            purpose: VisitPurpose::Preventive,
            status: VisitStatus::Completed,
            notes: "Routine maintenance completed successfully.".into(),
            photos: vec![],
            attachments: vec![],
            duration_minutes: 120,
        }
    }

    #[test]
    fn status_roundtrip() {
        for s in &[
            VisitStatus::Scheduled,
            VisitStatus::InProgress,
            VisitStatus::Completed,
            VisitStatus::Cancelled,
        ] {
            let json = serde_json::to_string(s).unwrap();
            let back: VisitStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*s, back);
            assert_eq!(VisitStatus::from_str(s.as_str()), Some(*s));
        }
    }

    #[test]
    fn transition_table_edges() {
        use VisitStatus::*;
        assert!(Scheduled.can_transition(InProgress));
        assert!(Scheduled.can_transition(Cancelled));
        assert!(InProgress.can_transition(Completed));
        assert!(InProgress.can_transition(Cancelled));

        assert!(!Scheduled.can_transition(Completed));
        assert!(!Completed.can_transition(Scheduled));
        assert!(!Cancelled.can_transition(InProgress));
        assert!(!InProgress.can_transition(Scheduled));
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        use VisitStatus::*;
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for next in [Scheduled, InProgress, Completed, Cancelled] {
                assert!(!terminal.can_transition(next));
            }
        }
    }

    #[test]
    fn visit_json_roundtrip() {
        let v = visit();
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"duration\":120"));
        assert!(json.contains("\"purpose\":\"Preventive\""));
        let back: ServiceVisit = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }

    #[test]
    fn filter_by_status_purpose_search() {
        let v = visit();
        assert!(VisitFilter::default().matches(&v));
        let f = VisitFilter { status: Some(VisitStatus::Scheduled), ..Default::default() };
        assert!(!f.matches(&v));
        let f = VisitFilter { purpose: Some(VisitPurpose::Preventive), ..Default::default() };
        assert!(f.matches(&v));
        let f = VisitFilter { q: "smith".into(), ..Default::default() };
        assert!(f.matches(&v));
    }
}
