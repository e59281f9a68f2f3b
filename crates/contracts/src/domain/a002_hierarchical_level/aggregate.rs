use serde::{Deserialize, Serialize};

use crate::domain::common::{CatalogBase, CatalogEntity, ErpEntity};

/// Rank of a job position inside the organization chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchicalLevel {
    #[serde(flatten)]
    pub base: CatalogBase,
}

impl ErpEntity for HierarchicalLevel {
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
        "a002"
    }

    fn collection_name() -> &'static str {
        "hierarchical_level"
    }

    fn base_path() -> &'static str {
        "/HierarchicalLevels"
    }

    fn element_name() -> &'static str {
        "Nivel jerárquico"
    }

    fn list_name() -> &'static str {
        "Niveles jerárquicos"
    }
}

impl CatalogEntity for HierarchicalLevel {
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
