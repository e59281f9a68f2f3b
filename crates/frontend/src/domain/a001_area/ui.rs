use leptos::prelude::*;

use super::api::use_service;
use crate::shared::catalog::CatalogList;

/// Áreas de la empresa.
#[component]
pub fn AreaList() -> impl IntoView {
    view! { <CatalogList service=use_service() /> }
}
