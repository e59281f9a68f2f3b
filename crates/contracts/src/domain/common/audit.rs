use serde::{Deserialize, Serialize};

/// Server-owned lifecycle fields present on every record.
///
/// Flattened into each DTO. The client never invents values for them and
/// tolerates their absence in responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl AuditFields {
    /// Most recent timestamp known for the record.
    pub fn last_modified(&self) -> Option<&str> {
        self.updated_at
            .as_deref()
            .or(self.created_at.as_deref())
    }
}

pub(crate) fn default_true() -> bool {
    true
}
