//! Invoicing data of one customer. The backend answers 404 while the customer
//! has none, which opens an empty form.

use contracts::domain::a012_customer_fiscal_data::aggregate::CustomerFiscalData;
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api::use_service;
use crate::shared::components::form::{opt_text, text_of};
use crate::shared::components::{ErrorBox, FormField};
use crate::shared::icons::icon;
use crate::shared::list_state::confirm;
use crate::shared::toast::use_toast;

/// SAT tax regimes offered in the form.
pub const TAX_REGIMES: [(&str, &str); 8] = [
    ("601", "601 - General de Ley Personas Morales"),
    ("603", "603 - Personas Morales con Fines no Lucrativos"),
    ("605", "605 - Sueldos y Salarios"),
    ("606", "606 - Arrendamiento"),
    ("612", "612 - Personas Físicas con Actividades Empresariales"),
    ("616", "616 - Sin obligaciones fiscales"),
    ("621", "621 - Incorporación Fiscal"),
    ("626", "626 - Régimen Simplificado de Confianza"),
];

/// CFDI usages offered in the form.
pub const CFDI_USES: [(&str, &str); 6] = [
    ("G01", "G01 - Adquisición de mercancías"),
    ("G03", "G03 - Gastos en general"),
    ("I01", "I01 - Construcciones"),
    ("I04", "I04 - Equipo de cómputo"),
    ("S01", "S01 - Sin efectos fiscales"),
    ("CP01", "CP01 - Pagos"),
];

#[component]
pub fn FiscalDataPanel(customer_id: i64) -> impl IntoView {
    let service = use_service();
    let toast = use_toast();

    let original = RwSignal::new(CustomerFiscalData::for_customer(customer_id));
    let rfc = RwSignal::new(String::new());
    let legal_name = RwSignal::new(String::new());
    let tax_regime = RwSignal::new(String::new());
    let cfdi_use = RwSignal::new(String::new());
    let fiscal_zip_code = RwSignal::new(String::new());
    let billing_email = RwSignal::new(String::new());
    let loading = RwSignal::new(true);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let fill = move |data: CustomerFiscalData| {
        rfc.set(data.rfc.clone());
        legal_name.set(data.legal_name.clone());
        tax_regime.set(text_of(&data.tax_regime));
        cfdi_use.set(text_of(&data.cfdi_use));
        fiscal_zip_code.set(text_of(&data.fiscal_zip_code));
        billing_email.set(text_of(&data.billing_email));
        original.set(data);
    };

    {
        let service = service.clone();
        spawn_local(async move {
            match service.get_one_by_customer(customer_id).await {
                Ok(Some(data)) => fill(data),
                Ok(None) => log::debug!("customer {}: no fiscal data yet", customer_id),
                Err(e) => {
                    error.set(Some(e.user_message()));
                    toast.api_error("No se pudieron cargar los datos fiscales", &e);
                }
            }
            loading.set(false);
        });
    }

    let build = move || {
        let mut data = CustomerFiscalData {
            rfc: rfc.get_untracked(),
            legal_name: legal_name.get_untracked(),
            tax_regime: opt_text(tax_regime.get_untracked()),
            cfdi_use: opt_text(cfdi_use.get_untracked()),
            fiscal_zip_code: opt_text(fiscal_zip_code.get_untracked()),
            billing_email: opt_text(billing_email.get_untracked()),
            ..original.get_untracked()
        };
        data.normalize();
        data
    };

    let handle_save = {
        let service = service.clone();
        move |_| {
            let data = build();
            if let Err(msg) = data.validate() {
                error.set(Some(msg));
                return;
            }
            error.set(None);
            saving.set(true);
            let service = service.clone();
            spawn_local(async move {
                match service.save(&data).await {
                    Ok(saved) => {
                        toast.success("Datos fiscales guardados");
                        fill(saved);
                    }
                    Err(e) => {
                        error.set(Some(e.user_message()));
                        toast.api_error("No se pudieron guardar los datos fiscales", &e);
                    }
                }
                saving.set(false);
            });
        }
    };

    let handle_delete = move |_| {
        let Some(id) = original.get_untracked().id else {
            return;
        };
        if !confirm("¿Eliminar los datos fiscales del cliente?") {
            return;
        }
        let service = service.clone();
        spawn_local(async move {
            match service.delete(id).await {
                Ok(()) => {
                    toast.success("Datos fiscales eliminados");
                    fill(CustomerFiscalData::for_customer(customer_id));
                }
                Err(e) => toast.api_error("No se pudieron eliminar los datos fiscales", &e),
            }
        });
    };

    let person_kind = move || {
        let current = CustomerFiscalData {
            rfc: rfc.get(),
            ..CustomerFiscalData::default()
        };
        match current.rfc.trim().chars().count() {
            0 => "",
            _ if current.is_legal_entity() => "Persona moral",
            _ => "Persona física",
        }
    };

    view! {
        <div class="details-section">
            <div class="details-section__header">
                <h4 class="details-section__title">"Datos fiscales"</h4>
                <Show when=move || loading.get()>
                    <Spinner size=SpinnerSize::Small />
                </Show>
            </div>

            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}
            <Show when=move || !loading.get() && original.with(|o| o.id.is_none())>
                <div class="form__hint">"El cliente aún no tiene datos fiscales registrados."</div>
            </Show>

            <div class="details-grid">
                <FormField label="RFC" required=true>
                    <Input value=rfc placeholder="12 o 13 caracteres" />
                    <span class="form__hint">{person_kind}</span>
                </FormField>
                <FormField label="Código postal fiscal">
                    <Input value=fiscal_zip_code placeholder="5 dígitos" />
                </FormField>
                <FormField label="Razón social" required=true wide=true>
                    <Input value=legal_name placeholder="Como aparece en la constancia" />
                </FormField>
                <FormField label="Régimen fiscal">
                    <Select value=tax_regime>
                        <option value="">"-- Seleccione --"</option>
                        {TAX_REGIMES.iter().map(|(key, label)| view! {
                            <option value=*key>{*label}</option>
                        }).collect_view()}
                    </Select>
                </FormField>
                <FormField label="Uso de CFDI">
                    <Select value=cfdi_use>
                        <option value="">"-- Seleccione --"</option>
                        {CFDI_USES.iter().map(|(key, label)| view! {
                            <option value=*key>{*label}</option>
                        }).collect_view()}
                    </Select>
                </FormField>
                <FormField label="Correo de facturación" wide=true>
                    <Input value=billing_email input_type=InputType::Email />
                </FormField>
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    on_click=handle_save
                    disabled=Signal::derive(move || saving.get() || loading.get())
                >
                    {icon("save")}
                    " Guardar datos fiscales"
                </Button>
                <Show when=move || original.with(|o| o.id.is_some())>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=handle_delete.clone()
                    >
                        {icon("delete")}
                        " Eliminar"
                    </Button>
                </Show>
            </div>
        </div>
    }
}
