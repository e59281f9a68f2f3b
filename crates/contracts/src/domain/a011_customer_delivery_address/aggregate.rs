use serde::{Deserialize, Serialize};

use crate::domain::common::audit::default_true;
use crate::domain::common::{AuditFields, ErpEntity};
use crate::shared::validation;

pub const DEFAULT_COUNTRY: &str = "México";

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

/// Delivery address of a customer. Fetched per customer; a 404 means the
/// customer has no addresses yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDeliveryAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub customer_id: i64,
    #[serde(default)]
    pub alias: Option<String>,
    pub street: String,
    #[serde(default)]
    pub exterior_number: Option<String>,
    #[serde(default)]
    pub interior_number: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Default for CustomerDeliveryAddress {
    fn default() -> Self {
        Self {
            id: None,
            customer_id: 0,
            alias: None,
            street: String::new(),
            exterior_number: None,
            interior_number: None,
            neighborhood: None,
            city: String::new(),
            state: None,
            zip_code: None,
            country: default_country(),
            contact_phone: None,
            is_default: false,
            is_active: true,
            organization_id: None,
            audit: AuditFields::default(),
        }
    }
}

impl CustomerDeliveryAddress {
    pub fn for_customer(customer_id: i64) -> Self {
        Self {
            customer_id,
            ..Self::default()
        }
    }

    /// Single-line address: "Av. Juárez 100 Int. 3, Centro, Monterrey, NL, C.P. 64000"
    pub fn one_line(&self) -> String {
        let non_empty = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let mut street = self.street.trim().to_string();
        if let Some(ext) = non_empty(&self.exterior_number) {
            street = format!("{} {}", street, ext);
        }
        if let Some(int) = non_empty(&self.interior_number) {
            street = format!("{} Int. {}", street, int);
        }

        let mut parts = vec![street];
        parts.extend(non_empty(&self.neighborhood));
        parts.push(self.city.trim().to_string());
        parts.extend(non_empty(&self.state));
        if let Some(zip) = non_empty(&self.zip_code) {
            parts.push(format!("C.P. {}", zip));
        }
        parts.retain(|p| !p.is_empty());
        parts.join(", ")
    }
}

impl ErpEntity for CustomerDeliveryAddress {
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
        match self.alias.as_deref().map(str::trim) {
            Some(alias) if !alias.is_empty() => format!("{} ({})", alias, self.one_line()),
            _ => self.one_line(),
        }
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn validate(&self) -> Result<(), String> {
        validation::reference(Some(self.customer_id), "un cliente")?;
        validation::required(&self.street, "La calle")?;
        validation::required(&self.city, "La ciudad")?;
        validation::optional_zip_code(self.zip_code.as_deref(), "El código postal")?;
        validation::optional_phone(self.contact_phone.as_deref(), "El teléfono de contacto")?;
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a011"
    }

    fn collection_name() -> &'static str {
        "customer_delivery_address"
    }

    fn base_path() -> &'static str {
        "/CustomerDeliveryAddress"
    }

    fn element_name() -> &'static str {
        "Dirección de entrega"
    }

    fn list_name() -> &'static str {
        "Direcciones de entrega"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_one_line() {
        let address = CustomerDeliveryAddress {
            customer_id: 1,
            alias: Some("Bodega".into()),
            street: "Av. Juárez".into(),
            exterior_number: Some("100".into()),
            interior_number: Some("3".into()),
            neighborhood: Some("Centro".into()),
            city: "Monterrey".into(),
            state: Some("NL".into()),
            zip_code: Some("64000".into()),
            ..Default::default()
        };
        assert_eq!(
            address.one_line(),
            "Av. Juárez 100 Int. 3, Centro, Monterrey, NL, C.P. 64000"
        );
        assert!(address.display_name().starts_with("Bodega ("));
    }

    #[test]
    fn skips_empty_parts() {
        let address = CustomerDeliveryAddress {
            customer_id: 1,
            street: "Calle 5".into(),
            interior_number: Some("  ".into()),
            city: "Puebla".into(),
            ..Default::default()
        };
        assert_eq!(address.one_line(), "Calle 5, Puebla");
    }

    #[test]
    fn validation() {
        let mut address = CustomerDeliveryAddress::for_customer(7);
        assert!(address.validate().is_err());
        address.street = "Reforma 1".into();
        address.city = "CDMX".into();
        assert!(address.validate().is_ok());
        address.zip_code = Some("123".into());
        assert!(address.validate().is_err());
        assert_eq!(address.country, DEFAULT_COUNTRY);
    }
}
