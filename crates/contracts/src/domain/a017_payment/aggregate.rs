use serde::{Deserialize, Serialize};

use crate::domain::common::audit::default_true;
use crate::domain::common::{AuditFields, ErpEntity};
use crate::shared::pricing::round2;
use crate::shared::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Card,
    Check,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::Card,
        PaymentMethod::Check,
        PaymentMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Card => "Card",
            PaymentMethod::Check => "Check",
            PaymentMethod::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Transfer => "Transferencia",
            PaymentMethod::Card => "Tarjeta",
            PaymentMethod::Check => "Cheque",
            PaymentMethod::Other => "Otro",
        }
    }

    /// Transfers and checks are traced by a bank reference.
    pub fn requires_reference(&self) -> bool {
        matches!(self, PaymentMethod::Transfer | PaymentMethod::Check)
    }
}

/// Payment received against a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub sale_id: i64,
    pub payment_date: String,
    pub amount: f64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Default for Payment {
    fn default() -> Self {
        Self {
            id: None,
            sale_id: 0,
            payment_date: String::new(),
            amount: 0.0,
            payment_method: PaymentMethod::Cash,
            reference: None,
            notes: None,
            is_active: true,
            organization_id: None,
            audit: AuditFields::default(),
        }
    }
}

impl Payment {
    pub fn for_sale(sale_id: i64, payment_date: impl Into<String>, amount: f64) -> Self {
        Self {
            sale_id,
            payment_date: payment_date.into(),
            amount,
            ..Self::default()
        }
    }

    /// Field checks plus the outstanding balance of the sale.
    pub fn validate_against_balance(&self, balance: f64) -> Result<(), String> {
        self.validate()?;
        if round2(self.amount) > round2(balance) {
            return Err("El monto excede el saldo pendiente de la venta".into());
        }
        Ok(())
    }
}

/// Sum of the active payments.
pub fn total_paid(payments: &[Payment]) -> f64 {
    round2(
        payments
            .iter()
            .filter(|p| p.is_active && p.amount.is_finite() && p.amount > 0.0)
            .map(|p| p.amount)
            .sum(),
    )
}

impl ErpEntity for Payment {
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
        format!("Pago {} {}", self.payment_method.label(), self.payment_date)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn validate(&self) -> Result<(), String> {
        validation::reference(Some(self.sale_id), "una venta")?;
        validation::required(&self.payment_date, "La fecha de pago")?;
        validation::positive(self.amount, "El monto")?;
        if self.payment_method.requires_reference() {
            validation::required(self.reference.as_deref().unwrap_or_default(), "La referencia")?;
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a017"
    }

    fn collection_name() -> &'static str {
        "payment"
    }

    fn base_path() -> &'static str {
        "/Payment"
    }

    fn element_name() -> &'static str {
        "Pago"
    }

    fn list_name() -> &'static str {
        "Pagos"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_must_be_positive_and_within_balance() {
        let mut payment = Payment::for_sale(3, "2024-08-01", 0.0);
        assert!(payment.validate().is_err());

        payment.amount = 500.0;
        assert!(payment.validate_against_balance(500.0).is_ok());
        assert!(payment.validate_against_balance(499.99).is_err());
    }

    #[test]
    fn transfer_requires_reference() {
        let mut payment = Payment::for_sale(3, "2024-08-01", 100.0);
        payment.payment_method = PaymentMethod::Transfer;
        assert!(payment.validate().unwrap_err().contains("referencia"));
        payment.reference = Some("SPEI 123".into());
        assert!(payment.validate().is_ok());
    }

    #[test]
    fn total_skips_inactive_payments() {
        let mut cancelled = Payment::for_sale(1, "2024-08-02", 50.0);
        cancelled.is_active = false;
        let payments = vec![
            Payment::for_sale(1, "2024-08-01", 100.10),
            Payment::for_sale(1, "2024-08-03", 0.2),
            cancelled,
        ];
        assert_eq!(total_paid(&payments), 100.3);
        assert_eq!(total_paid(&[]), 0.0);
    }

    #[test]
    fn wire_format() {
        let json = serde_json::to_value(Payment::for_sale(9, "2024-08-01", 10.0)).unwrap();
        assert_eq!(json["saleId"], 9);
        assert_eq!(json["paymentMethod"], "Cash");
        assert!(json.get("id").is_none());
    }
}
