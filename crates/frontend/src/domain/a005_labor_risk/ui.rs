use leptos::prelude::*;

use super::api::use_service;
use crate::shared::catalog::CatalogList;

#[component]
pub fn LaborRiskList() -> impl IntoView {
    view! { <CatalogList service=use_service() /> }
}
