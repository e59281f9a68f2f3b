use serde::{Deserialize, Serialize};

use crate::domain::common::audit::default_true;
use crate::domain::common::{AuditFields, ErpEntity};
use crate::shared::validation;

/// Puesto de trabajo: a position with its HR/payroll catalog references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,

    // Catalog references (a001..a008)
    #[serde(default)]
    pub area_id: Option<i64>,
    #[serde(default)]
    pub hierarchical_level_id: Option<i64>,
    #[serde(default)]
    pub contract_type_id: Option<i64>,
    #[serde(default)]
    pub work_shift_id: Option<i64>,
    #[serde(default)]
    pub labor_risk_id: Option<i64>,
    #[serde(default)]
    pub payment_period_id: Option<i64>,
    #[serde(default)]
    pub payment_unit_id: Option<i64>,

    #[serde(default)]
    pub base_salary: f64,
    #[serde(default)]
    pub vacancies: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Default for JobPosition {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            area_id: None,
            hierarchical_level_id: None,
            contract_type_id: None,
            work_shift_id: None,
            labor_risk_id: None,
            payment_period_id: None,
            payment_unit_id: None,
            base_salary: 0.0,
            vacancies: 0,
            is_active: true,
            organization_id: None,
            audit: AuditFields::default(),
        }
    }
}

impl ErpEntity for JobPosition {
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
        self.name.clone()
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn validate(&self) -> Result<(), String> {
        validation::required(&self.name, "El nombre del puesto")?;
        validation::max_len(&self.name, 100, "El nombre del puesto")?;
        validation::reference(self.area_id, "un área")?;
        validation::reference(self.hierarchical_level_id, "un nivel jerárquico")?;
        validation::non_negative(self.base_salary, "El salario base")?;
        if self.vacancies < 0 {
            return Err("Las vacantes no pueden ser negativas".into());
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a009"
    }

    fn collection_name() -> &'static str {
        "job_position"
    }

    fn base_path() -> &'static str {
        "/JobPositions"
    }

    fn element_name() -> &'static str {
        "Puesto"
    }

    fn list_name() -> &'static str {
        "Puestos"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_area_and_level() {
        let mut position = JobPosition {
            name: "Almacenista".into(),
            base_salary: 9500.0,
            ..Default::default()
        };
        assert!(position.validate().unwrap_err().contains("área"));

        position.area_id = Some(1);
        position.hierarchical_level_id = Some(2);
        assert!(position.validate().is_ok());

        position.base_salary = -1.0;
        assert!(position.validate().is_err());
    }

    #[test]
    fn camel_case_references() {
        let json = r#"{"id":4,"name":"Chofer","areaId":2,"hierarchicalLevelId":1,"paymentUnitId":3,"baseSalary":8000}"#;
        let position: JobPosition = serde_json::from_str(json).unwrap();
        assert_eq!(position.area_id, Some(2));
        assert_eq!(position.payment_unit_id, Some(3));
        assert_eq!(position.base_salary, 8000.0);
        assert!(position.is_active);
    }
}
