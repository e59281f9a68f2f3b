use serde::{Deserialize, Serialize};

use crate::domain::common::{CatalogBase, CatalogEntity, ErpEntity};

/// Organizational area of the company (Producción, Almacén...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Area {
    #[serde(flatten)]
    pub base: CatalogBase,
}

impl ErpEntity for Area {
    fn id(&self) -> Option<i64> {
        self.base.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.base.id = id;
    }

    fn set_organization_id(&mut self, organization_id: Option<i64>) {
        self.base.organization_id = organization_id;
    }

    fn display_name(&self) -> String {
        self.base.name.clone()
    }

    fn is_active(&self) -> bool {
        self.base.is_active
    }

    fn validate(&self) -> Result<(), String> {
        self.base.validate()
    }

    fn entity_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "area"
    }

    fn base_path() -> &'static str {
        "/Areas"
    }

    fn element_name() -> &'static str {
        "Área"
    }

    fn list_name() -> &'static str {
        "Áreas"
    }
}

impl CatalogEntity for Area {
    fn base(&self) -> &CatalogBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CatalogBase {
        &mut self.base
    }

    fn from_base(base: CatalogBase) -> Self {
        Self { base }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_metadata() {
        assert_eq!(Area::full_name(), "a001_area");
        assert_eq!(Area::base_path(), "/Areas");
        assert_eq!(Area::detail_key(9), "a001_area_detail_9");
    }

    #[test]
    fn flattened_json_shape() {
        let area = Area::from_base(CatalogBase::new("Almacén", Some("Planta 1".into())));
        let value = serde_json::to_value(&area).unwrap();
        assert_eq!(value["name"], "Almacén");
        assert_eq!(value["description"], "Planta 1");
        assert!(value.get("base").is_none());

        let back: Area = serde_json::from_value(value).unwrap();
        assert_eq!(back, area);
    }
}
