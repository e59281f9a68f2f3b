use serde::{Deserialize, Serialize};

use crate::domain::common::audit::default_true;
use crate::domain::common::{AuditFields, ErpEntity};
use crate::shared::validation;

/// Invoicing data of a customer (at most one record per customer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFiscalData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub customer_id: i64,
    pub rfc: String,
    pub legal_name: String,
    /// SAT tax regime key, e.g. "601"
    #[serde(default)]
    pub tax_regime: Option<String>,
    /// CFDI usage key, e.g. "G03"
    #[serde(default)]
    pub cfdi_use: Option<String>,
    #[serde(default)]
    pub fiscal_zip_code: Option<String>,
    #[serde(default)]
    pub billing_email: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Default for CustomerFiscalData {
    fn default() -> Self {
        Self {
            id: None,
            customer_id: 0,
            rfc: String::new(),
            legal_name: String::new(),
            tax_regime: None,
            cfdi_use: None,
            fiscal_zip_code: None,
            billing_email: None,
            is_active: true,
            organization_id: None,
            audit: AuditFields::default(),
        }
    }
}

impl CustomerFiscalData {
    pub fn for_customer(customer_id: i64) -> Self {
        Self {
            customer_id,
            ..Self::default()
        }
    }

    /// RFC of a legal entity (persona moral) has 12 characters.
    pub fn is_legal_entity(&self) -> bool {
        self.rfc.trim().chars().count() == 12
    }

    pub fn normalize(&mut self) {
        self.rfc = self.rfc.trim().to_uppercase();
        self.legal_name = self.legal_name.trim().to_string();
    }
}

impl ErpEntity for CustomerFiscalData {
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
        format!("{} ({})", self.legal_name, self.rfc)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn validate(&self) -> Result<(), String> {
        validation::reference(Some(self.customer_id), "un cliente")?;
        validation::required(&self.rfc, "El RFC")?;
        if !validation::is_valid_rfc(&self.rfc) {
            return Err("El RFC no tiene un formato válido".into());
        }
        validation::required(&self.legal_name, "La razón social fiscal")?;
        validation::optional_zip_code(self.fiscal_zip_code.as_deref(), "El código postal fiscal")?;
        validation::optional_email(self.billing_email.as_deref(), "El correo de facturación")?;
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a012"
    }

    fn collection_name() -> &'static str {
        "customer_fiscal_data"
    }

    fn base_path() -> &'static str {
        "/CustomerFiscalData"
    }

    fn element_name() -> &'static str {
        "Datos fiscales"
    }

    fn list_name() -> &'static str {
        "Datos fiscales"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc_is_validated_after_normalizing() {
        let mut data = CustomerFiscalData {
            customer_id: 3,
            rfc: " dno010203ab1 ".into(),
            legal_name: "Distribuidora del Norte".into(),
            ..Default::default()
        };
        data.normalize();
        assert_eq!(data.rfc, "DNO010203AB1");
        assert!(data.is_legal_entity());
        assert!(data.validate().is_ok());

        data.rfc = "XYZ".into();
        assert!(data.validate().is_err());
    }

    #[test]
    fn billing_email_is_optional() {
        let mut data = CustomerFiscalData {
            customer_id: 3,
            rfc: "GODE561231GR8".into(),
            legal_name: "Eduardo Gómez".into(),
            ..Default::default()
        };
        assert!(!data.is_legal_entity());
        assert!(data.validate().is_ok());
        data.billing_email = Some("factura@".into());
        assert!(data.validate().is_err());
    }
}
