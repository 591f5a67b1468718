use serde::{Deserialize, Serialize};

/// What a photo documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhotoCategory {
    Unboxing,
    Installation,
    Maintenance,
    Issue,
    Training,
}

impl PhotoCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unboxing => "Unboxing",
            Self::Installation => "Installation",
            Self::Maintenance => "Maintenance",
            Self::Issue => "Issue",
            Self::Training => "Training",
        }
    }
}

/// A photo attached to an installation or service visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub filename: String,
    pub url: String,
    /// RFC 3339.
    pub uploaded_at: String,
    pub uploaded_by: String,
    pub category: PhotoCategory,
}

/// A document attached to a service visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    pub url: String,
    /// MIME type, e.g. "application/pdf".
    #[serde(rename = "type")]
    pub content_type: String,
    /// RFC 3339.
    pub uploaded_at: String,
    pub uploaded_by: String,
}
