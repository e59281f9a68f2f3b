use leptos::prelude::*;

use super::api::use_service;
use crate::shared::catalog::CatalogList;

/// Jornadas laborales (diurna, nocturna, mixta).
#[component]
pub fn WorkShiftList() -> impl IntoView {
    view! { <CatalogList service=use_service() /> }
}
