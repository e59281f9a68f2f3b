//! Form state of a job position.
//!
//! References to the HR catalogs are kept as the text value of their
//! `<select>` ("" = none) and salary/vacancies as typed text.

use contracts::domain::a009_job_position::aggregate::JobPosition;
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model;
use crate::domain::a009_job_position::api::JobPositionService;
use crate::shared::components::form::{
    amount_text, id_text, opt_text, parse_amount, parse_count, parse_id, text_of,
};
use crate::shared::toast::ToastService;

#[derive(Clone)]
pub struct JobPositionDetailsVm {
    service: JobPositionService,
    toast: ToastService,
    /// Last loaded record; keeps server-owned fields across a save.
    original: RwSignal<JobPosition>,

    pub id: RwSignal<Option<i64>>,
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub area_id: RwSignal<String>,
    pub hierarchical_level_id: RwSignal<String>,
    pub contract_type_id: RwSignal<String>,
    pub work_shift_id: RwSignal<String>,
    pub labor_risk_id: RwSignal<String>,
    pub payment_period_id: RwSignal<String>,
    pub payment_unit_id: RwSignal<String>,
    pub base_salary: RwSignal<String>,
    pub vacancies: RwSignal<String>,
    pub is_active: RwSignal<bool>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl JobPositionDetailsVm {
    pub fn new(service: JobPositionService, toast: ToastService) -> Self {
        let vm = Self {
            service,
            toast,
            original: RwSignal::new(JobPosition::default()),
            id: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            area_id: RwSignal::new(String::new()),
            hierarchical_level_id: RwSignal::new(String::new()),
            contract_type_id: RwSignal::new(String::new()),
            work_shift_id: RwSignal::new(String::new()),
            labor_risk_id: RwSignal::new(String::new()),
            payment_period_id: RwSignal::new(String::new()),
            payment_unit_id: RwSignal::new(String::new()),
            base_salary: RwSignal::new(String::new()),
            vacancies: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        };
        vm.from_aggregate(&JobPosition::default());
        vm
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let saving = self.saving;
        let loading = self.loading;
        let name = self.name;
        Signal::derive(move || saving.get() || loading.get() || name.get().trim().is_empty())
    }

    pub fn from_aggregate(&self, p: &JobPosition) {
        self.original.set(p.clone());
        self.id.set(p.id);
        self.name.set(p.name.clone());
        self.description.set(text_of(&p.description));
        self.area_id.set(id_text(p.area_id));
        self.hierarchical_level_id.set(id_text(p.hierarchical_level_id));
        self.contract_type_id.set(id_text(p.contract_type_id));
        self.work_shift_id.set(id_text(p.work_shift_id));
        self.labor_risk_id.set(id_text(p.labor_risk_id));
        self.payment_period_id.set(id_text(p.payment_period_id));
        self.payment_unit_id.set(id_text(p.payment_unit_id));
        self.base_salary.set(amount_text(p.base_salary));
        self.vacancies.set(p.vacancies.to_string());
        self.is_active.set(p.is_active);
    }

    pub fn to_aggregate(&self) -> JobPosition {
        JobPosition {
            id: self.id.get_untracked(),
            name: self.name.get_untracked().trim().to_string(),
            description: opt_text(self.description.get_untracked()),
            area_id: parse_id(&self.area_id.get_untracked()),
            hierarchical_level_id: parse_id(&self.hierarchical_level_id.get_untracked()),
            contract_type_id: parse_id(&self.contract_type_id.get_untracked()),
            work_shift_id: parse_id(&self.work_shift_id.get_untracked()),
            labor_risk_id: parse_id(&self.labor_risk_id.get_untracked()),
            payment_period_id: parse_id(&self.payment_period_id.get_untracked()),
            payment_unit_id: parse_id(&self.payment_unit_id.get_untracked()),
            base_salary: parse_amount(&self.base_salary.get_untracked()),
            vacancies: parse_count(&self.vacancies.get_untracked()),
            is_active: self.is_active.get_untracked(),
            ..self.original.get_untracked()
        }
    }

    pub fn load(&self, id: i64) {
        let this = self.clone();
        let toast = this.toast;
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::fetch_by_id(&this.service, id).await {
                Ok(position) => this.from_aggregate(&position),
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    toast.api_error("No se pudo cargar el puesto", &e);
                }
            }
            this.loading.set(false);
        });
    }

    pub fn save(&self, on_saved: Callback<()>) {
        let position = self.to_aggregate();
        if let Err(msg) = position.validate() {
            self.error.set(Some(msg));
            return;
        }

        let this = self.clone();
        let toast = this.toast;
        this.saving.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::save(&this.service, &position).await {
                Ok(saved) => {
                    toast.success(format!("Puesto \"{}\" guardado", saved.display_name()));
                    on_saved.run(());
                }
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    toast.api_error("No se pudo guardar el puesto", &e);
                }
            }
            this.saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::shared::api::CrudService;

    fn vm() -> JobPositionDetailsVm {
        let config = AppConfig {
            api_base_url: "http://localhost:5000/api".into(),
            organization_id: Some(1),
            iva_rate: 0.16,
        };
        JobPositionDetailsVm::new(CrudService::new(&config), ToastService::new())
    }

    #[test]
    fn typed_text_becomes_the_dto() {
        let vm = vm();
        vm.name.set("  Almacenista ".into());
        vm.area_id.set("3".into());
        vm.hierarchical_level_id.set("1".into());
        vm.base_salary.set("$9,500.50".into());
        vm.vacancies.set("2".into());

        let position = vm.to_aggregate();
        assert_eq!(position.name, "Almacenista");
        assert_eq!(position.area_id, Some(3));
        assert_eq!(position.contract_type_id, None);
        assert_eq!(position.base_salary, 9500.5);
        assert_eq!(position.vacancies, 2);
        assert!(position.validate().is_ok());
    }

    #[test]
    fn loaded_record_keeps_server_fields() {
        let vm = vm();
        let mut loaded = JobPosition {
            id: Some(8),
            name: "Chofer".into(),
            area_id: Some(2),
            hierarchical_level_id: Some(1),
            organization_id: Some(1),
            ..Default::default()
        };
        loaded.audit.created_by = Some("admin".into());
        vm.from_aggregate(&loaded);
        assert_eq!(vm.area_id.get_untracked(), "2");
        assert_eq!(vm.payment_unit_id.get_untracked(), "");

        vm.description.set("Reparto local".into());
        let edited = vm.to_aggregate();
        assert_eq!(edited.id, Some(8));
        assert_eq!(edited.audit.created_by.as_deref(), Some("admin"));
        assert_eq!(edited.description.as_deref(), Some("Reparto local"));
    }
}
