use medfleet_store::Record;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ContractType / ContractStatus
// ---------------------------------------------------------------------------

/// Maintenance contract flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    /// Annual Maintenance Contract.
    AMC,
    /// Comprehensive Maintenance Contract.
    CMC,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AMC => "AMC",
            Self::CMC => "CMC",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "AMC" => Some(Self::AMC),
            "CMC" => Some(Self::CMC),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a maintenance contract.
///
/// Derived from the end date (see `lifecycle::contract_status`), never
/// transitioned by hand. The stored field is a snapshot that
/// `FleetService::refresh_contracts` brings up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    Expired,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::ExpiringSoon => "Expiring Soon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(Self::Active),
            "Expired" => Some(Self::Expired),
            "Expiring Soon" => Some(Self::ExpiringSoon),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// An AMC/CMC maintenance contract covering one device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,

    /// Covered device.
    pub device_id: String,

    #[serde(rename = "type")]
    pub contract_type: ContractType,

    /// Calendar dates, `YYYY-MM-DD`.
    pub start_date: String,
    pub end_date: String,

    pub status: ContractStatus,

    /// Contract value, whole currency units.
    pub cost: u32,

    pub vendor: String,
    pub terms: String,
}

impl Contract {
    /// Parsed end date, or None when the stored string is malformed.
    pub fn end_date_parsed(&self) -> Option<chrono::NaiveDate> {
        medfleet_core::parse_date(&self.end_date)
    }
}

impl Record for Contract {
    fn kind() -> &'static str {
        "fleet:contract:"
    }

    fn label() -> &'static str {
        "contract"
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

// ---------------------------------------------------------------------------
// ContractFilter
// ---------------------------------------------------------------------------

/// Conjunction of independent predicates; `None`/empty means no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractFilter {
    /// Case-insensitive substring match over vendor and device id.
    #[serde(default)]
    pub q: String,

    #[serde(rename = "type", default)]
    pub contract_type: Option<ContractType>,

    #[serde(default)]
    pub status: Option<ContractStatus>,
}

impl ContractFilter {
    pub fn matches(&self, c: &Contract) -> bool {
        let q = self.q.trim().to_lowercase();
        let matches_search = q.is_empty()
            || c.vendor.to_lowercase().contains(&q)
            || c.device_id.to_lowercase().contains(&q);
        let matches_type = self.contract_type.map_or(true, |t| c.contract_type == t);
        let matches_status = self.status.map_or(true, |s| c.status == s);
        matches_search && matches_type && matches_status
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
