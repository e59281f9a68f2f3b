use serde::{Deserialize, Serialize};

use crate::domain::common::audit::default_true;
use crate::domain::common::{AuditFields, ErpEntity};
use crate::shared::validation;

/// Product as known by a specific customer: its own SKU and an optional
/// negotiated price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub customer_id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub customer_sku: Option<String>,
    #[serde(default)]
    pub special_price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Default for CustomerProduct {
    fn default() -> Self {
        Self {
            id: None,
            customer_id: 0,
            product_id: 0,
            product_name: None,
            customer_sku: None,
            special_price: None,
            notes: None,
            is_active: true,
            organization_id: None,
            audit: AuditFields::default(),
        }
    }
}

impl CustomerProduct {
    pub fn for_customer(customer_id: i64) -> Self {
        Self {
            customer_id,
            ..Self::default()
        }
    }

    /// Price to quote this customer: the negotiated one when set.
    pub fn effective_price(&self, list_price: f64) -> f64 {
        self.special_price
            .filter(|p| p.is_finite() && *p >= 0.0)
            .unwrap_or(list_price)
    }
}

impl ErpEntity for CustomerProduct {
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
        let name = self
            .product_name
            .clone()
            .unwrap_or_else(|| format!("Producto #{}", self.product_id));
        match self.customer_sku.as_deref().map(str::trim) {
            Some(sku) if !sku.is_empty() => format!("{} [{}]", name, sku),
            _ => name,
        }
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn validate(&self) -> Result<(), String> {
        validation::reference(Some(self.customer_id), "un cliente")?;
        validation::reference(Some(self.product_id), "un producto")?;
        if let Some(price) = self.special_price {
            validation::non_negative(price, "El precio especial")?;
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a013"
    }

    fn collection_name() -> &'static str {
        "customer_product"
    }

    fn base_path() -> &'static str {
        "/CustomerProducts"
    }

    fn element_name() -> &'static str {
        "Producto del cliente"
    }

    fn list_name() -> &'static str {
        "Productos del cliente"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_price_overrides_list_price() {
        let mut cp = CustomerProduct::for_customer(1);
        cp.product_id = 2;
        assert_eq!(cp.effective_price(100.0), 100.0);
        cp.special_price = Some(85.5);
        assert_eq!(cp.effective_price(100.0), 85.5);
        cp.special_price = Some(-1.0);
        assert_eq!(cp.effective_price(100.0), 100.0);
        assert!(cp.validate().is_err());
    }

    #[test]
    fn display_with_customer_sku() {
        let cp = CustomerProduct {
            customer_id: 1,
            product_id: 2,
            product_name: Some("Tornillo 1/4".into()),
            customer_sku: Some("TX-9".into()),
            ..Default::default()
        };
        assert_eq!(cp.display_name(), "Tornillo 1/4 [TX-9]");
    }
}
