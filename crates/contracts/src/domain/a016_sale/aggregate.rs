use chrono::Days;
use serde::{Deserialize, Serialize};

use crate::domain::a015_order::aggregate::Order;
use crate::domain::a017_payment::aggregate::{total_paid, Payment, PaymentMethod};
use crate::domain::common::audit::default_true;
use crate::domain::common::{AuditFields, CommercialDocument, DocumentLine, ErpEntity};
use crate::shared::dates::{format_iso_date, parse_iso_date};
use crate::shared::pricing::{round2, DocumentTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaleStatus {
    #[default]
    Pending,
    PartiallyPaid,
    Paid,
    Cancelled,
}

impl SaleStatus {
    pub const ALL: [SaleStatus; 4] = [
        SaleStatus::Pending,
        SaleStatus::PartiallyPaid,
        SaleStatus::Paid,
        SaleStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Pending => "Pending",
            SaleStatus::PartiallyPaid => "PartiallyPaid",
            SaleStatus::Paid => "Paid",
            SaleStatus::Cancelled => "Cancelled",
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
            SaleStatus::Pending => "Pendiente",
            SaleStatus::PartiallyPaid => "Pago parcial",
            SaleStatus::Paid => "Pagada",
            SaleStatus::Cancelled => "Cancelada",
        }
    }
}

/// Venta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub folio: String,
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub order_id: Option<i64>,
    pub date: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: SaleStatus,
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
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub balance: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Default for Sale {
    fn default() -> Self {
        Self {
            id: None,
            folio: String::new(),
            customer_id: None,
            customer_name: None,
            order_id: None,
            date: String::new(),
            payment_method: PaymentMethod::Cash,
            status: SaleStatus::Pending,
            notes: None,
            items: Vec::new(),
            subtotal: 0.0,
            discount: 0.0,
            iva: 0.0,
            total: 0.0,
            amount_paid: 0.0,
            balance: 0.0,
            is_active: true,
            organization_id: None,
            audit: AuditFields::default(),
        }
    }
}

impl Sale {
    /// New pending sale for the order's customer and lines, with the whole
    /// total outstanding. The caller sets the sale date.
    pub fn from_order(order: &Order, iva_rate: f64) -> Self {
        let mut sale = Self {
            customer_id: order.customer_id,
            customer_name: order.customer_name.clone(),
            order_id: order.id,
            date: order.date.clone(),
            notes: order.notes.clone(),
            items: order.items.iter().map(DocumentLine::detached).collect(),
            organization_id: order.organization_id,
            ..Self::default()
        };
        sale.recalculate(iva_rate);
        sale.balance = sale.total;
        sale
    }

    /// Live sale created from `order_id`, if any. Cancelled sales do not
    /// count.
    pub fn for_order(sales: &[Sale], order_id: i64) -> Option<&Sale> {
        sales.iter().find(|s| {
            s.order_id == Some(order_id) && s.is_active && s.status != SaleStatus::Cancelled
        })
    }

    /// Derive `amount_paid`, `balance` and the payment status from the
    /// payments registered for this sale. Cancelled sales keep their status.
    pub fn apply_payments(&mut self, payments: &[Payment]) {
        self.amount_paid = total_paid(payments);
        self.balance = round2((self.total - self.amount_paid).max(0.0));

        if self.status == SaleStatus::Cancelled {
            return;
        }
        self.status = if self.amount_paid > 0.0 && self.balance == 0.0 {
            SaleStatus::Paid
        } else if self.amount_paid > 0.0 {
            SaleStatus::PartiallyPaid
        } else {
            SaleStatus::Pending
        };
    }

    /// Lines are frozen once a payment is registered or the sale is cancelled.
    pub fn is_editable(&self) -> bool {
        self.amount_paid <= 0.0 && self.status != SaleStatus::Cancelled
    }

    pub fn accepts_payments(&self) -> bool {
        self.id.is_some()
            && self.balance > 0.0
            && !matches!(self.status, SaleStatus::Cancelled | SaleStatus::Paid)
    }

    /// Due date for a customer with `credit_days` of credit, as ISO date.
    pub fn due_date(&self, credit_days: u32) -> Option<String> {
        parse_iso_date(&self.date)?
            .checked_add_days(Days::new(u64::from(credit_days)))
            .map(format_iso_date)
    }
}

impl ErpEntity for Sale {
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
            format!("Venta {}", self.date)
        } else {
            format!("Venta {}", self.folio)
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
        self.validate_document()
    }

    fn entity_index() -> &'static str {
        "a016"
    }

    fn collection_name() -> &'static str {
        "sale"
    }

    fn base_path() -> &'static str {
        "/Sale"
    }

    fn element_name() -> &'static str {
        "Venta"
    }

    fn list_name() -> &'static str {
        "Ventas"
    }
}

impl CommercialDocument for Sale {
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
    use crate::shared::pricing::DEFAULT_IVA_RATE;

    fn order() -> Order {
        Order {
            id: Some(20),
            customer_id: Some(4),
            date: "2024-07-05".into(),
            items: vec![DocumentLine::for_product(5, "Taladro", 1000.0)],
            ..Default::default()
        }
    }

    #[test]
    fn built_from_order_with_full_balance() {
        let sale = Sale::from_order(&order(), DEFAULT_IVA_RATE);
        assert_eq!(sale.order_id, Some(20));
        assert_eq!(sale.customer_id, Some(4));
        assert_eq!(sale.status, SaleStatus::Pending);
        assert_eq!(sale.total, 1160.0);
        assert_eq!(sale.balance, 1160.0);
        assert_eq!(sale.amount_paid, 0.0);
    }

    #[test]
    fn payments_drive_status() {
        let mut sale = Sale::from_order(&order(), DEFAULT_IVA_RATE);
        sale.id = Some(1);

        sale.apply_payments(&[Payment::for_sale(1, "2024-07-06", 160.0)]);
        assert_eq!(sale.status, SaleStatus::PartiallyPaid);
        assert_eq!(sale.balance, 1000.0);
        assert!(sale.accepts_payments());

        sale.apply_payments(&[
            Payment::for_sale(1, "2024-07-06", 160.0),
            Payment::for_sale(1, "2024-07-07", 1000.0),
        ]);
        assert_eq!(sale.status, SaleStatus::Paid);
        assert_eq!(sale.balance, 0.0);
        assert!(!sale.accepts_payments());

        sale.apply_payments(&[]);
        assert_eq!(sale.status, SaleStatus::Pending);
    }

    #[test]
    fn overpayment_never_yields_negative_balance() {
        let mut sale = Sale::from_order(&order(), DEFAULT_IVA_RATE);
        sale.apply_payments(&[Payment::for_sale(1, "2024-07-06", 2000.0)]);
        assert_eq!(sale.balance, 0.0);
        assert_eq!(sale.amount_paid, 2000.0);
        assert_eq!(sale.status, SaleStatus::Paid);
    }

    #[test]
    fn cancelled_status_is_kept() {
        let mut sale = Sale::from_order(&order(), DEFAULT_IVA_RATE);
        sale.status = SaleStatus::Cancelled;
        sale.apply_payments(&[Payment::for_sale(1, "2024-07-06", 100.0)]);
        assert_eq!(sale.status, SaleStatus::Cancelled);
        assert_eq!(sale.balance, 1060.0);
    }

    #[test]
    fn first_payment_freezes_the_lines() {
        let mut sale = Sale::from_order(&order(), DEFAULT_IVA_RATE);
        assert!(sale.is_editable());
        sale.apply_payments(&[Payment::for_sale(1, "2024-07-06", 10.0)]);
        assert!(!sale.is_editable());
    }

    #[test]
    fn due_date_adds_credit_days() {
        let sale = Sale {
            date: "2024-01-20".into(),
            ..Default::default()
        };
        assert_eq!(sale.due_date(30).as_deref(), Some("2024-02-19"));
        assert_eq!(sale.due_date(0).as_deref(), Some("2024-01-20"));
        assert_eq!(Sale::default().due_date(30), None);
    }

    #[test]
    fn due_date_from_a_datetime_sale_date() {
        let sale = Sale {
            date: "2024-01-20T00:00:00".into(),
            ..Default::default()
        };
        assert_eq!(sale.due_date(30).as_deref(), Some("2024-02-19"));
    }
}
