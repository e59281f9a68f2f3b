use serde::{Deserialize, Serialize};

use super::audit::default_true;
use super::entity_root::ErpEntity;
use crate::shared::pricing::{self, DiscountType, DocumentTotals, PricedLine};
use crate::shared::validation;

/// One line of a quotation, order or sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default = "default_true")]
    pub applies_iva: bool,
    #[serde(default)]
    pub line_total: f64,
}

impl Default for DocumentLine {
    fn default() -> Self {
        Self {
            id: None,
            product_id: 0,
            product_name: None,
            quantity: 1.0,
            unit_price: 0.0,
            discount: 0.0,
            discount_type: DiscountType::Percentage,
            applies_iva: true,
            line_total: 0.0,
        }
    }
}

impl DocumentLine {
    pub fn for_product(product_id: i64, product_name: impl Into<String>, unit_price: f64) -> Self {
        let mut line = Self {
            product_id,
            product_name: Some(product_name.into()),
            unit_price,
            ..Self::default()
        };
        line.recalculate();
        line
    }

    pub fn recalculate(&mut self) {
        self.line_total = pricing::line_total(&*self);
    }

    /// Copy for another document: keeps product and pricing, drops the line id.
    pub fn detached(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    pub fn validate(&self, position: usize) -> Result<(), String> {
        let label = |field: &str| format!("{} (partida {})", field, position);
        validation::reference(Some(self.product_id), &label("un producto"))?;
        validation::positive(self.quantity, &label("La cantidad"))?;
        validation::non_negative(self.unit_price, &label("El precio unitario"))?;
        validation::non_negative(self.discount, &label("El descuento"))?;
        if self.discount_type == DiscountType::Percentage && self.discount > 100.0 {
            return Err(format!(
                "El descuento no puede exceder 100% (partida {})",
                position
            ));
        }
        Ok(())
    }
}

impl PricedLine for DocumentLine {
    fn quantity(&self) -> f64 {
        self.quantity
    }

    fn unit_price(&self) -> f64 {
        self.unit_price
    }

    fn discount(&self) -> f64 {
        self.discount
    }

    fn discount_type(&self) -> DiscountType {
        self.discount_type
    }

    fn applies_iva(&self) -> bool {
        self.applies_iva
    }
}

/// Quotations, orders and sales: a customer, lines and derived totals.
pub trait CommercialDocument: ErpEntity {
    fn customer_id(&self) -> Option<i64>;
    fn folio(&self) -> &str;
    fn items(&self) -> &[DocumentLine];
    fn items_mut(&mut self) -> &mut Vec<DocumentLine>;
    fn totals(&self) -> DocumentTotals;
    fn set_totals(&mut self, totals: DocumentTotals);

    /// Refresh every line total and the header totals together.
    fn recalculate(&mut self, iva_rate: f64) {
        for line in self.items_mut().iter_mut() {
            line.recalculate();
        }
        let totals = pricing::compute_totals(self.items(), iva_rate);
        self.set_totals(totals);
    }

    /// Header and line checks shared by every document type.
    fn validate_document(&self) -> Result<(), String> {
        validation::reference(self.customer_id(), "un cliente")?;
        if self.items().is_empty() {
            return Err("Agregue al menos una partida".into());
        }
        for (i, line) in self.items().iter().enumerate() {
            line.validate(i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_wire_format() {
        let json = r#"{"productId":5,"quantity":2,"unitPrice":10.5,"discount":1,"discountType":"amount"}"#;
        let line: DocumentLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.product_id, 5);
        assert_eq!(line.discount_type, DiscountType::Amount);
        assert!(line.applies_iva);

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["unitPrice"], 10.5);
        assert!(value.get("id").is_none());
    }

    #[test]
    fn new_line_is_priced() {
        let line = DocumentLine::for_product(1, "Tornillo", 2.5);
        assert_eq!(line.quantity, 1.0);
        assert_eq!(line.line_total, 2.5);
    }

    #[test]
    fn line_validation() {
        let mut line = DocumentLine::for_product(1, "Tornillo", 2.5);
        assert!(line.validate(1).is_ok());

        line.quantity = 0.0;
        assert!(line.validate(1).unwrap_err().contains("partida 1"));

        line.quantity = 1.0;
        line.discount = 120.0;
        assert!(line.validate(2).is_err());

        line.discount_type = DiscountType::Amount;
        assert!(line.validate(2).is_ok());

        line.product_id = 0;
        assert!(line.validate(3).is_err());
    }
}
