use medfleet_store::Record;
use serde::{Deserialize, Serialize};

/// A field engineer performing installations and service visits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Engineer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Device categories this engineer is certified for.
    #[serde(default)]
    pub specialization: Vec<String>,

    /// Currently assigned installations/visits.
    pub active_assignments: u32,

    /// Average customer rating, 0.0–5.0.
    pub rating: f32,
}

impl Record for Engineer {
    fn kind() -> &'static str {
        "fleet:engineer:"
    }

    fn label() -> &'static str {
        "engineer"
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

/// Free-text search over name, email, and specializations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineerFilter {
    #[serde(default)]
    pub q: String,
}

impl EngineerFilter {
    pub fn matches(&self, e: &Engineer) -> bool {
        let q = self.q.trim().to_lowercase();
        q.is_empty()
            || e.name.to_lowercase().contains(&q)
            || e.email.to_lowercase().contains(&q)
            || e.specialization.iter().any(|s| s.to_lowercase().contains(&q))
    }
}
