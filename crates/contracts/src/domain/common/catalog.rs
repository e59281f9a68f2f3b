use serde::{Deserialize, Serialize};

use super::audit::{default_true, AuditFields};
use super::entity_root::ErpEntity;
use crate::shared::validation;

pub const CATALOG_NAME_MAX: usize = 100;
pub const CATALOG_DESCRIPTION_MAX: usize = 250;

/// Fields shared by every flat HR/payroll catalog (areas, levels, shifts...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Default for CatalogBase {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            is_active: true,
            organization_id: None,
            audit: AuditFields::default(),
        }
    }
}

impl CatalogBase {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validation::required(&self.name, "El nombre")?;
        validation::max_len(&self.name, CATALOG_NAME_MAX, "El nombre")?;
        if let Some(description) = &self.description {
            validation::max_len(description, CATALOG_DESCRIPTION_MAX, "La descripción")?;
        }
        Ok(())
    }

    /// Trim text fields and drop an empty description before sending.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.description = self
            .description
            .take()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
    }
}

/// A catalog entity is an [`ErpEntity`] whose whole shape is [`CatalogBase`].
///
/// Lets one generic list/dialog serve every catalog.
pub trait CatalogEntity: ErpEntity + Default {
    fn base(&self) -> &CatalogBase;
    fn base_mut(&mut self) -> &mut CatalogBase;
    fn from_base(base: CatalogBase) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_shape() {
        let json = r#"{
            "id": 3,
            "name": "Producción",
            "description": null,
            "isActive": false,
            "organizationId": 1,
            "createdAt": "2024-05-01T10:00:00Z",
            "createdBy": "admin"
        }"#;
        let base: CatalogBase = serde_json::from_str(json).unwrap();
        assert_eq!(base.id, Some(3));
        assert!(!base.is_active);
        assert_eq!(base.organization_id, Some(1));
        assert_eq!(base.audit.created_by.as_deref(), Some("admin"));
        assert_eq!(base.audit.last_modified(), Some("2024-05-01T10:00:00Z"));
    }

    #[test]
    fn new_records_omit_server_fields() {
        let base = CatalogBase::new("Matutino", None);
        let value = serde_json::to_value(&base).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("createdAt").is_none());
        assert_eq!(value["isActive"], true);
        assert_eq!(value["name"], "Matutino");
    }

    #[test]
    fn missing_is_active_defaults_to_true() {
        let base: CatalogBase = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert!(base.is_active);
    }

    #[test]
    fn validation_and_normalization() {
        let mut base = CatalogBase::new("  Ventas  ", Some("   ".into()));
        base.normalize();
        assert_eq!(base.name, "Ventas");
        assert_eq!(base.description, None);
        assert!(base.validate().is_ok());

        assert!(CatalogBase::new(" ", None).validate().is_err());
        assert!(CatalogBase::new("x".repeat(101), None).validate().is_err());
    }
}
