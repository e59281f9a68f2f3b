use leptos::prelude::*;

use super::api::use_service;
use crate::shared::catalog::CatalogList;

/// Periodos de pago de nómina.
#[component]
pub fn PaymentPeriodList() -> impl IntoView {
    view! { <CatalogList service=use_service() /> }
}
