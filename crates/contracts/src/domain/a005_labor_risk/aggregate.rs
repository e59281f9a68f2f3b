use serde::{Deserialize, Serialize};

use crate::domain::common::{CatalogBase, CatalogEntity, ErpEntity};

/// Labor risk class used for social-security contributions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaborRisk {
    #[serde(flatten)]
    pub base: CatalogBase,
}

impl ErpEntity for LaborRisk {
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
        "a005"
    }

    fn collection_name() -> &'static str {
        "labor_risk"
    }

    fn base_path() -> &'static str {
        "/LaborRisks"
    }

    fn element_name() -> &'static str {
        "Riesgo de trabajo"
    }

    fn list_name() -> &'static str {
        "Riesgos de trabajo"
    }
}

impl CatalogEntity for LaborRisk {
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
