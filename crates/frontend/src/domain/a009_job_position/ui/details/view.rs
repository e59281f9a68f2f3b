use contracts::domain::a001_area::aggregate::Area;
use contracts::domain::a002_hierarchical_level::aggregate::HierarchicalLevel;
use contracts::domain::a003_contract_type::aggregate::ContractType;
use contracts::domain::a004_work_shift::aggregate::WorkShift;
use contracts::domain::a005_labor_risk::aggregate::LaborRisk;
use contracts::domain::a007_payment_period::aggregate::PaymentPeriod;
use contracts::domain::a008_payment_unit::aggregate::PaymentUnit;
use leptos::prelude::*;
use thaw::*;

use super::view_model::JobPositionDetailsVm;
use crate::domain::a009_job_position::api::use_service;
use crate::shared::components::{use_reference_options, ErrorBox, FormField, ReferenceSelect};
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

#[component]
pub fn JobPositionDetails(
    id: Option<i64>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = JobPositionDetailsVm::new(use_service(), use_toast());
    if let Some(id) = id {
        vm.load(id);
    }

    let areas = use_reference_options::<Area>();
    let levels = use_reference_options::<HierarchicalLevel>();
    let contract_types = use_reference_options::<ContractType>();
    let work_shifts = use_reference_options::<WorkShift>();
    let labor_risks = use_reference_options::<LaborRisk>();
    let payment_periods = use_reference_options::<PaymentPeriod>();
    let payment_units = use_reference_options::<PaymentUnit>();

    let is_edit_mode = vm.is_edit_mode();
    let is_save_disabled = vm.is_save_disabled();
    let error = vm.error;
    let loading = vm.loading;
    let vm_save = vm.clone();

    view! {
        <div class="details-container job-position-details">
            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}
            <Show when=move || loading.get()>
                <Spinner size=SpinnerSize::Small label="Cargando..." />
            </Show>

            <div class="details-section">
                <h4 class="details-section__title">"Puesto"</h4>
                <div class="details-grid">
                    <FormField label="Nombre" required=true wide=true>
                        <Input value=vm.name placeholder="Nombre del puesto" />
                    </FormField>
                    <FormField label="Descripción" wide=true>
                        <Textarea value=vm.description placeholder="Opcional" attr:rows=2 />
                    </FormField>
                    <FormField label="Área" required=true>
                        <ReferenceSelect value=vm.area_id options=areas />
                    </FormField>
                    <FormField label="Nivel jerárquico" required=true>
                        <ReferenceSelect value=vm.hierarchical_level_id options=levels />
                    </FormField>
                </div>
            </div>

            <div class="details-section">
                <h4 class="details-section__title">"Condiciones laborales"</h4>
                <div class="details-grid">
                    <FormField label="Tipo de contrato">
                        <ReferenceSelect value=vm.contract_type_id options=contract_types />
                    </FormField>
                    <FormField label="Jornada laboral">
                        <ReferenceSelect value=vm.work_shift_id options=work_shifts />
                    </FormField>
                    <FormField label="Riesgo de trabajo">
                        <ReferenceSelect value=vm.labor_risk_id options=labor_risks />
                    </FormField>
                    <FormField label="Periodo de pago">
                        <ReferenceSelect value=vm.payment_period_id options=payment_periods />
                    </FormField>
                    <FormField label="Unidad de pago">
                        <ReferenceSelect value=vm.payment_unit_id options=payment_units />
                    </FormField>
                    <FormField label="Salario base">
                        <Input value=vm.base_salary input_type=InputType::Number placeholder="0.00" />
                    </FormField>
                    <FormField label="Vacantes">
                        <Input value=vm.vacancies input_type=InputType::Number placeholder="0" />
                    </FormField>
                </div>
                <div class="details-flags">
                    <Checkbox checked=vm.is_active label="Activo" />
                </div>
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm_save.save(on_saved)
                    disabled=is_save_disabled
                >
                    {icon("save")}
                    {move || if is_edit_mode.get() { " Guardar" } else { " Crear" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("cancel")}
                    " Cancelar"
                </Button>
            </div>
        </div>
    }
}
