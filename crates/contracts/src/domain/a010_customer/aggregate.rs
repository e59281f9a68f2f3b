use serde::{Deserialize, Serialize};

use crate::domain::common::audit::default_true;
use crate::domain::common::{AuditFields, ErpEntity};
use crate::shared::validation;

/// Sales customer (served by `/SalesCustomer`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub code: String,
    pub business_name: String,
    #[serde(default)]
    pub trade_name: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub credit_limit: f64,
    #[serde(default)]
    pub credit_days: i32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            id: None,
            code: String::new(),
            business_name: String::new(),
            trade_name: None,
            contact_name: None,
            email: None,
            phone: None,
            credit_limit: 0.0,
            credit_days: 0,
            notes: None,
            is_active: true,
            organization_id: None,
            audit: AuditFields::default(),
        }
    }
}

impl Customer {
    /// Trade name when there is one, business name otherwise.
    pub fn short_name(&self) -> &str {
        self.trade_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.business_name)
    }

    pub fn has_credit(&self) -> bool {
        self.credit_limit > 0.0 && self.credit_days > 0
    }
}

impl ErpEntity for Customer {
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
        if self.code.trim().is_empty() {
            self.short_name().to_string()
        } else {
            format!("{} - {}", self.code, self.short_name())
        }
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn validate(&self) -> Result<(), String> {
        validation::required(&self.business_name, "La razón social")?;
        validation::max_len(&self.business_name, 200, "La razón social")?;
        validation::optional_email(self.email.as_deref(), "El correo")?;
        validation::optional_phone(self.phone.as_deref(), "El teléfono")?;
        validation::non_negative(self.credit_limit, "El límite de crédito")?;
        if self.credit_days < 0 {
            return Err("Los días de crédito no pueden ser negativos".into());
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a010"
    }

    fn collection_name() -> &'static str {
        "customer"
    }

    fn base_path() -> &'static str {
        "/SalesCustomer"
    }

    fn element_name() -> &'static str {
        "Cliente"
    }

    fn list_name() -> &'static str {
        "Clientes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            code: "C-001".into(),
            business_name: "Distribuidora del Norte SA de CV".into(),
            trade_name: Some("DINOSA".into()),
            ..Default::default()
        }
    }

    #[test]
    fn names() {
        let mut c = customer();
        assert_eq!(c.display_name(), "C-001 - DINOSA");
        c.trade_name = Some(" ".into());
        assert_eq!(c.short_name(), "Distribuidora del Norte SA de CV");
        c.code.clear();
        assert_eq!(c.display_name(), "Distribuidora del Norte SA de CV");
    }

    #[test]
    fn contact_fields_are_checked_when_present() {
        let mut c = customer();
        assert!(c.validate().is_ok());
        c.email = Some("no-es-correo".into());
        assert!(c.validate().is_err());
        c.email = Some("compras@dinosa.mx".into());
        c.phone = Some("81-1234-567".into());
        assert!(c.validate().is_err());
        c.phone = Some("81 1234 5678".into());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn credit() {
        let mut c = customer();
        assert!(!c.has_credit());
        c.credit_limit = 50_000.0;
        c.credit_days = 30;
        assert!(c.has_credit());
    }
}
