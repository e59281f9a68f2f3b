use serde::{Deserialize, Serialize};

use crate::domain::a014_quotation::aggregate::Quotation;
use crate::domain::a016_sale::aggregate::Sale;
use crate::domain::common::audit::default_true;
use crate::domain::common::{AuditFields, CommercialDocument, DocumentLine, ErpEntity};
use crate::shared::dates::{ensure_not_before, parse_iso_date};
use crate::shared::pricing::DocumentTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Confirmed => "Confirmado",
            OrderStatus::Shipped => "Enviado",
            OrderStatus::Delivered => "Entregado",
            OrderStatus::Cancelled => "Cancelado",
        }
    }

    /// Lines may change until the order leaves the warehouse.
    pub fn is_editable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// Pedido
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub folio: String,
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub quotation_id: Option<i64>,
    pub date: String,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub delivery_address_id: Option<i64>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<DocumentLine>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub iva: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            id: None,
            folio: String::new(),
            customer_id: None,
            customer_name: None,
            quotation_id: None,
            date: String::new(),
            delivery_date: None,
            delivery_address_id: None,
            status: OrderStatus::Pending,
            notes: None,
            items: Vec::new(),
            subtotal: 0.0,
            discount: 0.0,
            iva: 0.0,
            total: 0.0,
            is_active: true,
            organization_id: None,
            audit: AuditFields::default(),
        }
    }
}

impl Order {
    /// New pending order for the quotation's customer and lines.
    /// The caller sets the order date.
    pub fn from_quotation(quotation: &Quotation, iva_rate: f64) -> Self {
        let mut order = Self {
            customer_id: quotation.customer_id,
            customer_name: quotation.customer_name.clone(),
            quotation_id: quotation.id,
            date: quotation.date.clone(),
            notes: quotation.notes.clone(),
            items: quotation.items.iter().map(DocumentLine::detached).collect(),
            organization_id: quotation.organization_id,
            ..Self::default()
        };
        order.recalculate(iva_rate);
        order
    }

    /// Live order created from `quotation_id`, if any.
    pub fn for_quotation(orders: &[Order], quotation_id: i64) -> Option<&Order> {
        orders.iter().find(|o| {
            o.quotation_id == Some(quotation_id)
                && o.is_active
                && o.status != OrderStatus::Cancelled
        })
    }

    /// A stored, non-cancelled order with lines and no live sale among
    /// `sales` may become a sale.
    pub fn can_convert_to_sale(&self, sales: &[Sale]) -> bool {
        let Some(id) = self.id else {
            return false;
        };
        !self.items.is_empty()
            && self.status != OrderStatus::Cancelled
            && Sale::for_order(sales, id).is_none()
    }
}

impl ErpEntity for Order {
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
        if self.folio.is_empty() {
            format!("Pedido {}", self.date)
        } else {
            format!("Pedido {}", self.folio)
        }
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn validate(&self) -> Result<(), String> {
        if self.date.trim().is_empty() {
            return Err("La fecha es obligatoria".into());
        }
        if parse_iso_date(&self.date).is_none() {
            return Err("La fecha no es válida".into());
        }
        ensure_not_before(
            &self.date,
            self.delivery_date.as_deref(),
            "La fecha de entrega no puede ser anterior a la fecha del pedido",
        )?;
        self.validate_document()
    }

    fn entity_index() -> &'static str {
        "a015"
    }

    fn collection_name() -> &'static str {
        "order"
    }

    fn base_path() -> &'static str {
        "/Order"
    }

    fn element_name() -> &'static str {
        "Pedido"
    }

    fn list_name() -> &'static str {
        "Pedidos"
    }
}

impl CommercialDocument for Order {
    fn customer_id(&self) -> Option<i64> {
        self.customer_id
    }

    fn folio(&self) -> &str {
        &self.folio
    }

    fn items(&self) -> &[DocumentLine] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut Vec<DocumentLine> {
        &mut self.items
    }

    fn totals(&self) -> DocumentTotals {
        DocumentTotals {
            subtotal: self.subtotal,
            discount: self.discount,
            iva: self.iva,
            total: self.total,
        }
    }

    fn set_totals(&mut self, totals: DocumentTotals) {
        self.subtotal = totals.subtotal;
        self.discount = totals.discount;
        self.iva = totals.iva;
        self.total = totals.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a014_quotation::aggregate::QuotationStatus;
    use crate::domain::a016_sale::aggregate::SaleStatus;
    use crate::shared::pricing::DEFAULT_IVA_RATE;

    #[test]
    fn built_from_quotation() {
        let mut line = DocumentLine::for_product(5, "Taladro", 1500.0);
        line.id = Some(99);
        line.quantity = 2.0;
        line.discount = 10.0;
        let quotation = Quotation {
            id: Some(12),
            folio: "COT-0012".into(),
            customer_id: Some(4),
            date: "2024-07-01".into(),
            status: QuotationStatus::Accepted,
            items: vec![line],
            ..Default::default()
        };

        let order = Order::from_quotation(&quotation, DEFAULT_IVA_RATE);
        assert_eq!(order.id, None);
        assert_eq!(order.quotation_id, Some(12));
        assert_eq!(order.customer_id, Some(4));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].id, None);
        assert_eq!(order.items[0].line_total, 2700.0);
        assert_eq!(order.subtotal, 3000.0);
        assert_eq!(order.discount, 300.0);
        assert_eq!(order.iva, 432.0);
        assert_eq!(order.total, 3132.0);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn delivery_before_order_date_is_rejected() {
        let order = Order {
            customer_id: Some(1),
            date: "2024-07-10".into(),
            delivery_date: Some("2024-07-01".into()),
            items: vec![DocumentLine::for_product(1, "A", 1.0)],
            ..Default::default()
        };
        assert!(order.validate().unwrap_err().contains("entrega"));
    }

    #[test]
    fn delivery_on_the_same_day_as_a_datetime_order() {
        let order = Order {
            customer_id: Some(1),
            date: "2024-07-10T16:20:00".into(),
            delivery_date: Some("2024-07-10".into()),
            items: vec![DocumentLine::for_product(1, "A", 1.0)],
            ..Default::default()
        };
        assert!(order.validate().is_ok());
    }

    #[test]
    fn cancelled_orders_are_not_converted() {
        let mut order = Order {
            id: Some(1),
            items: vec![DocumentLine::for_product(1, "A", 1.0)],
            ..Default::default()
        };
        assert!(order.can_convert_to_sale(&[]));
        order.status = OrderStatus::Cancelled;
        assert!(!order.can_convert_to_sale(&[]));
        assert_eq!(OrderStatus::parse("Shipped").label(), "Enviado");
    }

    #[test]
    fn an_order_with_a_live_sale_is_not_converted_again() {
        let order = Order {
            id: Some(1),
            items: vec![DocumentLine::for_product(1, "A", 1.0)],
            ..Default::default()
        };
        let mut sale = Sale::from_order(&order, DEFAULT_IVA_RATE);
        sale.id = Some(50);
        let other = Sale {
            id: Some(51),
            order_id: Some(2),
            ..Default::default()
        };
        assert!(order.can_convert_to_sale(&[other.clone()]));
        assert!(!order.can_convert_to_sale(&[other, sale.clone()]));

        // A cancelled sale frees the order.
        sale.status = SaleStatus::Cancelled;
        assert!(order.can_convert_to_sale(&[sale]));
    }

    #[test]
    fn order_lookup_by_quotation() {
        let live = Order {
            id: Some(3),
            quotation_id: Some(9),
            ..Default::default()
        };
        let cancelled = Order {
            id: Some(2),
            quotation_id: Some(9),
            status: OrderStatus::Cancelled,
            ..Default::default()
        };
        let orders = vec![cancelled, live];
        assert_eq!(Order::for_quotation(&orders, 9).and_then(|o| o.id), Some(3));
        assert!(Order::for_quotation(&orders, 10).is_none());
    }

    #[test]
    fn lines_freeze_once_shipped() {
        assert!(OrderStatus::Confirmed.is_editable());
        assert!(!OrderStatus::Shipped.is_editable());
        assert!(!OrderStatus::Cancelled.is_editable());
    }
}
