use medfleet_store::Record;
use serde::{Deserialize, Serialize};

/// A physical site (hospital, clinic) housing devices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: String,
    pub name: String,

    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,

    pub contact_person: String,
    pub contact_phone: String,
    pub contact_email: String,

    /// Denormalized count of devices installed at this site.
    pub device_count: u32,
}

impl Record for Facility {
    fn kind() -> &'static str {
        "fleet:facility:"
    }

    fn label() -> &'static str {
        "facility"
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

/// Free-text search over name, city, and contact person.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacilityFilter {
    #[serde(default)]
    pub q: String,
}

impl FacilityFilter {
    pub fn matches(&self, f: &Facility) -> bool {
        let q = self.q.trim().to_lowercase();
        q.is_empty()
            || f.name.to_lowercase().contains(&q)
            || f.city.to_lowercase().contains(&q)
            || f.contact_person.to_lowercase().contains(&q)
    }
}
