use medfleet_store::Record;
use serde::{Deserialize, Serialize};

use super::contract::ContractStatus;

/// Operational condition of a device.
///
/// Externally observed (telemetry / manual update) — unlike installation and
/// visit statuses there is no transition table; any condition can follow any
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Online,
    Offline,
    Maintenance,
    Installation,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Maintenance => "Maintenance",
            Self::Installation => "Installation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Online" => Some(Self::Online),
            "Offline" => Some(Self::Offline),
            "Maintenance" => Some(Self::Maintenance),
            "Installation" => Some(Self::Installation),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single piece of medical equipment in the fleet.
///
/// `facility_name` and `engineer` are denormalized display fields; the
/// authoritative links are `facility_id` and the installation/visit records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,

    /// Equipment category, e.g. "Ventilator".
    #[serde(rename = "type")]
    pub device_type: String,

    pub model: String,
    pub serial_number: String,

    pub facility_id: String,
    pub facility_name: String,

    pub status: DeviceStatus,

    /// Charge percentage, 0–100.
    pub battery_level: u8,

    /// Calendar dates, `YYYY-MM-DD`.
    pub last_service_date: String,
    pub installation_date: String,

    /// Coverage labels mirrored from the owning AMC/CMC contracts.
    pub amc_status: ContractStatus,
    pub cmc_status: ContractStatus,

    /// Placement within the facility, e.g. "ICU Ward 2".
    pub location: String,

    /// Name of the responsible engineer.
    pub engineer: String,
}

impl Record for Device {
    fn kind() -> &'static str {
        "fleet:device:"
    }

    fn label() -> &'static str {
        "device"
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
#[serde(rename_all = "camelCase")]
pub struct DeviceFilter {
    /// Case-insensitive substring match over model, type, and facility name.
    #[serde(default)]
    pub q: String,

    #[serde(default)]
    pub status: Option<DeviceStatus>,

    /// Exact facility name, as shown in the facility dropdown.
    #[serde(default)]
    pub facility: String,

    /// Exact equipment category.
    #[serde(rename = "type", default)]
    pub device_type: String,
}

impl DeviceFilter {
    pub fn matches(&self, d: &Device) -> bool {
        let q = self.q.trim().to_lowercase();
        let matches_search = q.is_empty()
            || d.model.to_lowercase().contains(&q)
            || d.device_type.to_lowercase().contains(&q)
            || d.facility_name.to_lowercase().contains(&q);
        let matches_status = self.status.map_or(true, |s| d.status == s);
        let matches_facility = self.facility.is_empty() || d.facility_name == self.facility;
        let matches_type = self.device_type.is_empty() || d.device_type == self.device_type;
        matches_search && matches_status && matches_facility && matches_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> Device {
        Device {
            id: "DEV001".into(),
            device_type: "Ventilator".into(),
            model: "MediVent Pro 3000".into(),
            serial_number: "MV3000-001".into(),
            facility_id: "FAC001".into(),
            facility_name: "City General Hospital".into(),
            status: DeviceStatus::Online,
            battery_level: 85,
            last_service_date: "2024-01-15".into(),
            installation_date: "2023-06-01".into(),
            amc_status: ContractStatus::Active,
            cmc_status: ContractStatus::Active,
            location: "ICU Ward 2".into(),
            engineer: "John Smith".into(),
        }
    }

    #[test]
    fn status_roundtrip() {
        for s in &[
            DeviceStatus::Online,
            DeviceStatus::Offline,
            DeviceStatus::Maintenance,
            DeviceStatus::Installation,
        ] {
            let json = serde_json::to_string(s).unwrap();
            let back: DeviceStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*s, back);
            assert_eq!(DeviceStatus::from_str(s.as_str()), Some(*s));
        }
    }

    #[test]
    fn device_json_roundtrip() {
        let d = device();
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"type\":\"Ventilator\""));
        assert!(json.contains("\"serialNumber\":\"MV3000-001\""));
        assert!(json.contains("\"batteryLevel\":85"));
        let back: Device = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }

    #[test]
    fn empty_filter_is_identity() {
        assert!(DeviceFilter::default().matches(&device()));
    }

    #[test]
    fn search_matches_model_type_and_facility() {
        let d = device();
        for q in ["medivent", "VENTILATOR", "city general"] {
            let f = DeviceFilter { q: q.into(), ..Default::default() };
            assert!(f.matches(&d), "q={q}");
        }
        let f = DeviceFilter { q: "defibrillator".into(), ..Default::default() };
        assert!(!f.matches(&d));
    }

    #[test]
    fn dropdown_filters_are_exact() {
        let d = device();
        let f = DeviceFilter { status: Some(DeviceStatus::Offline), ..Default::default() };
        assert!(!f.matches(&d));
        let f = DeviceFilter { facility: "City General Hospital".into(), ..Default::default() };
        assert!(f.matches(&d));
        let f = DeviceFilter { device_type: "Ventilator".into(), ..Default::default() };
        assert!(f.matches(&d));
        let f = DeviceFilter { device_type: "ventilator".into(), ..Default::default() };
        assert!(!f.matches(&d)); // dropdown values are exact, unlike q
    }

    #[test]
    fn predicates_combine_with_and() {
        let d = device();
        let f = DeviceFilter {
            q: "medivent".into(),
            status: Some(DeviceStatus::Online),
            facility: "City General Hospital".into(),
            device_type: "Ventilator".into(),
        };
        assert!(f.matches(&d));
        let f = DeviceFilter { status: Some(DeviceStatus::Offline), q: "medivent".into(), ..Default::default() };
        assert!(!f.matches(&d));
    }
}
