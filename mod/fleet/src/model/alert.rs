use medfleet_store::Record;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AlertType / Severity
// ---------------------------------------------------------------------------

/// What condition raised the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "Battery Low")]
    BatteryLow,
    #[serde(rename = "Service Due")]
    ServiceDue,
    #[serde(rename = "Contract Expiring")]
    ContractExpiring,
    #[serde(rename = "Device Offline")]
    DeviceOffline,
    #[serde(rename = "Maintenance Required")]
    MaintenanceRequired,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BatteryLow => "Battery Low",
            Self::ServiceDue => "Service Due",
            Self::ContractExpiring => "Contract Expiring",
            Self::DeviceOffline => "Device Offline",
            Self::MaintenanceRequired => "Maintenance Required",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Battery Low" => Some(Self::BatteryLow),
            "Service Due" => Some(Self::ServiceDue),
            "Contract Expiring" => Some(Self::ContractExpiring),
            "Device Offline" => Some(Self::DeviceOffline),
            "Maintenance Required" => Some(Self::MaintenanceRequired),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert severity. Variant order is triage order: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

/// A condition raised against a device at a facility.
///
/// `resolved_at`/`resolved_by` are present iff `resolved` — enforced by
/// `FleetService::{resolve_alert, reopen_alert}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,

    #[serde(rename = "type")]
    pub alert_type: AlertType,

    pub severity: Severity,

    pub device_id: String,
    pub facility_id: String,

    pub message: String,

    /// RFC 3339.
    pub created_at: String,

    #[serde(default)]
    pub resolved: bool,

    /// RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
}

impl Record for Alert {
    fn kind() -> &'static str {
        "fleet:alert:"
    }

    fn label() -> &'static str {
        "alert"
    }

    fn key(&self) -> String {
        self.id.clone()
    }

    fn before_create(&mut self) {
        if self.id.is_empty() {
            self.id = medfleet_core::new_id();
        }
        if self.created_at.is_empty() {
            self.created_at = medfleet_core::now_rfc3339();
        }
    }
}

/// Conjunction of independent predicates; `None`/empty means no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFilter {
    /// Case-insensitive substring match over message and device id.
    #[serde(default)]
    pub q: String,

    #[serde(default)]
    pub severity: Option<Severity>,

    #[serde(default)]
    pub resolved: Option<bool>,
}

impl AlertFilter {
    pub fn matches(&self, a: &Alert) -> bool {
        let q = self.q.trim().to_lowercase();
        let matches_search = q.is_empty()
            || a.message.to_lowercase().contains(&q)
            || a.device_id.to_lowercase().contains(&q);
        let matches_severity = self.severity.map_or(true, |s| a.severity == s);
        let matches_resolved = self.resolved.map_or(true, |r| a.resolved == r);
        matches_search && matches_severity && matches_resolved
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
