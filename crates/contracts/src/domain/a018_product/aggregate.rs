use serde::{Deserialize, Serialize};

use crate::domain::common::audit::default_true;
use crate::domain::common::{AuditFields, ErpEntity};
use crate::shared::pricing::round2;
use crate::shared::validation;

pub const DEFAULT_UNIT: &str = "PZA";

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

/// Inventory product (served by `/Products`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub stock: f64,
    #[serde(default)]
    pub min_stock: f64,
    #[serde(default = "default_true")]
    pub applies_iva: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            sku: String::new(),
            name: String::new(),
            description: None,
            unit: default_unit(),
            unit_price: 0.0,
            cost: 0.0,
            stock: 0.0,
            min_stock: 0.0,
            applies_iva: true,
            is_active: true,
            organization_id: None,
            audit: AuditFields::default(),
        }
    }
}

impl Product {
    pub fn is_below_min_stock(&self) -> bool {
        self.min_stock > 0.0 && self.stock < self.min_stock
    }

    /// Gross margin over the sale price, in percent. `None` without a price.
    pub fn margin(&self) -> Option<f64> {
        if self.unit_price <= 0.0 {
            return None;
        }
        Some(round2((self.unit_price - self.cost) / self.unit_price * 100.0))
    }
}

impl ErpEntity for Product {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn set_organization_id(&mut self, organization_id: Option<i64>) {
        self.organization_id = organization_id;
    }

    fn display_name(&self) -> String {
        format!("{} - {}", self.sku, self.name)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn validate(&self) -> Result<(), String> {
        validation::required(&self.sku, "El SKU")?;
        validation::max_len(&self.sku, 50, "El SKU")?;
        validation::required(&self.name, "El nombre")?;
        validation::max_len(&self.name, 200, "El nombre")?;
        validation::required(&self.unit, "La unidad")?;
        validation::non_negative(self.unit_price, "El precio")?;
        validation::non_negative(self.cost, "El costo")?;
        validation::non_negative(self.min_stock, "El stock mínimo")?;
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a018"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn base_path() -> &'static str {
        "/Products"
    }

    fn element_name() -> &'static str {
        "Producto"
    }

    fn list_name() -> &'static str {
        "Productos"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            sku: "TOR-014".into(),
            name: "Tornillo 1/4".into(),
            unit_price: 2.5,
            cost: 1.6,
            stock: 40.0,
            min_stock: 50.0,
            ..Default::default()
        }
    }

    #[test]
    fn stock_alert_and_margin() {
        let mut p = product();
        assert!(p.is_below_min_stock());
        assert_eq!(p.margin(), Some(36.0));

        p.min_stock = 0.0;
        assert!(!p.is_below_min_stock());
        p.unit_price = 0.0;
        assert_eq!(p.margin(), None);
    }

    #[test]
    fn validation() {
        let mut p = product();
        assert!(p.validate().is_ok());
        p.sku = " ".into();
        assert!(p.validate().unwrap_err().contains("SKU"));
        p.sku = "X".into();
        p.cost = -3.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn defaults_from_sparse_json() {
        let p: Product = serde_json::from_str(r#"{"id":1,"sku":"A","name":"B"}"#).unwrap();
        assert_eq!(p.unit, DEFAULT_UNIT);
        assert!(p.applies_iva);
        assert_eq!(p.display_name(), "A - B");
    }
}
