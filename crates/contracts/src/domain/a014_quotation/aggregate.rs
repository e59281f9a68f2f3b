use serde::{Deserialize, Serialize};

use crate::domain::common::audit::default_true;
use crate::domain::common::{AuditFields, CommercialDocument, DocumentLine, ErpEntity};
use crate::shared::dates::{ensure_not_before, parse_iso_date};
use crate::shared::pricing::DocumentTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuotationStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl QuotationStatus {
    pub const ALL: [QuotationStatus; 5] = [
        QuotationStatus::Draft,
        QuotationStatus::Sent,
        QuotationStatus::Accepted,
        QuotationStatus::Rejected,
        QuotationStatus::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "Draft",
            QuotationStatus::Sent => "Sent",
            QuotationStatus::Accepted => "Accepted",
            QuotationStatus::Rejected => "Rejected",
            QuotationStatus::Expired => "Expired",
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
            QuotationStatus::Draft => "Borrador",
            QuotationStatus::Sent => "Enviada",
            QuotationStatus::Accepted => "Aceptada",
            QuotationStatus::Rejected => "Rechazada",
            QuotationStatus::Expired => "Vencida",
        }
    }

    /// Only drafts and sent quotations may still be edited.
    pub fn is_editable(&self) -> bool {
        matches!(self, QuotationStatus::Draft | QuotationStatus::Sent)
    }
}

/// Cotización
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub folio: String,
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    #[serde(default)]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub status: QuotationStatus,
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

impl Default for Quotation {
    fn default() -> Self {
        Self {
            id: None,
            folio: String::new(),
            customer_id: None,
            customer_name: None,
            date: String::new(),
            valid_until: None,
            status: QuotationStatus::Draft,
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

impl Quotation {
    /// Validity passed before `today` while the quotation is still open.
    /// Closed quotations (accepted, rejected...) never expire.
    pub fn is_expired(&self, today: &str) -> bool {
        let valid_until = self.valid_until.as_deref().and_then(parse_iso_date);
        match (valid_until, parse_iso_date(today)) {
            (Some(valid_until), Some(today)) => valid_until < today && self.status.is_editable(),
            _ => false,
        }
    }

    /// Only stored, still open quotations with lines become orders. An
    /// accepted quotation already has its order.
    pub fn can_convert_to_order(&self) -> bool {
        self.id.is_some() && !self.items.is_empty() && self.status.is_editable()
    }
}

impl ErpEntity for Quotation {
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
            format!("Cotización {}", self.date)
        } else {
            format!("Cotización {}", self.folio)
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
            self.valid_until.as_deref(),
            "La vigencia no puede ser anterior a la fecha",
        )?;
        self.validate_document()
    }

    fn entity_index() -> &'static str {
        "a014"
    }

    fn collection_name() -> &'static str {
        "quotation"
    }

    fn base_path() -> &'static str {
        "/Quotation"
    }

    fn element_name() -> &'static str {
        "Cotización"
    }

    fn list_name() -> &'static str {
        "Cotizaciones"
    }
}

impl CommercialDocument for Quotation {
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
    use crate::shared::pricing::{DiscountType, DEFAULT_IVA_RATE};

    fn quotation() -> Quotation {
        let mut q = Quotation {
            id: Some(1),
            folio: "COT-0001".into(),
            customer_id: Some(10),
            date: "2024-06-01".into(),
            valid_until: Some("2024-06-15".into()),
            items: vec![
                DocumentLine::for_product(1, "Tornillo", 10.0),
                DocumentLine {
                    product_id: 2,
                    quantity: 3.0,
                    unit_price: 100.0,
                    discount: 20.0,
                    discount_type: DiscountType::Amount,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        q.recalculate(DEFAULT_IVA_RATE);
        q
    }

    #[test]
    fn totals_follow_lines() {
        let mut q = quotation();
        assert_eq!(q.items[1].line_total, 280.0);
        assert_eq!(q.subtotal, 310.0);
        assert_eq!(q.discount, 20.0);
        assert_eq!(q.iva, 46.4);
        assert_eq!(q.total, 336.4);

        q.items.pop();
        q.recalculate(DEFAULT_IVA_RATE);
        assert_eq!(q.total, 11.6);
    }

    #[test]
    fn expiry() {
        let mut q = quotation();
        assert!(!q.is_expired("2024-06-15"));
        assert!(q.is_expired("2024-06-16"));
        q.status = QuotationStatus::Accepted;
        assert!(!q.is_expired("2024-06-16"));
        q.valid_until = None;
        assert!(!q.is_expired("2030-01-01"));
    }

    #[test]
    fn expiry_with_backend_datetimes() {
        let mut q = quotation();
        q.valid_until = Some("2024-06-15T00:00:00".into());
        assert!(!q.is_expired("2024-06-15"));
        assert!(q.is_expired("2024-06-16T08:00:00"));
        assert!(!q.is_expired("not a date"));
    }

    #[test]
    fn same_day_validity_against_datetime_date() {
        let mut q = quotation();
        q.date = "2024-06-01T00:00:00".into();
        q.valid_until = Some("2024-06-01".into());
        assert!(q.validate().is_ok());
        q.valid_until = Some("2024-05-31".into());
        assert!(q.validate().unwrap_err().contains("vigencia"));
        q.date = "01/06/2024".into();
        assert!(q.validate().unwrap_err().contains("fecha"));
    }

    #[test]
    fn accepted_quotations_are_not_converted_again() {
        let mut q = quotation();
        assert!(q.can_convert_to_order());
        q.status = QuotationStatus::Sent;
        assert!(q.can_convert_to_order());
        for closed in [
            QuotationStatus::Accepted,
            QuotationStatus::Rejected,
            QuotationStatus::Expired,
        ] {
            q.status = closed;
            assert!(!q.can_convert_to_order(), "{closed:?}");
        }
        let unsaved = Quotation { id: None, ..quotation() };
        assert!(!unsaved.can_convert_to_order());
    }

    #[test]
    fn validation() {
        let mut q = quotation();
        assert!(q.validate().is_ok());
        q.valid_until = Some("2024-05-01".into());
        assert!(q.validate().is_err());
        q.valid_until = None;
        q.items.clear();
        assert!(q.validate().is_err());
        q.customer_id = None;
        assert!(q.validate().unwrap_err().contains("cliente"));
    }

    #[test]
    fn status_wire_format() {
        assert_eq!(serde_json::to_string(&QuotationStatus::Sent).unwrap(), "\"Sent\"");
        assert_eq!(QuotationStatus::parse("Accepted"), QuotationStatus::Accepted);
        assert_eq!(QuotationStatus::parse("??"), QuotationStatus::Draft);
    }
}
