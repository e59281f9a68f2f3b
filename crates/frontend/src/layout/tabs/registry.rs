//! Maps a tab key to the page it shows. Every key the console opens is
//! listed here.

use leptos::prelude::*;

use super::tab_labels::{parse_tab_key, TabKind};
use crate::domain::a001_area::ui::AreaList;
use crate::domain::a002_hierarchical_level::ui::HierarchicalLevelList;
use crate::domain::a003_contract_type::ui::ContractTypeList;
use crate::domain::a004_work_shift::ui::WorkShiftList;
use crate::domain::a005_labor_risk::ui::LaborRiskList;
use crate::domain::a006_shift::ui::ShiftList;
use crate::domain::a007_payment_period::ui::PaymentPeriodList;
use crate::domain::a008_payment_unit::ui::PaymentUnitList;
use crate::domain::a009_job_position::ui::list::JobPositionList;
use crate::domain::a010_customer::ui::list::CustomerList;
use crate::domain::a014_quotation::ui::details::QuotationDetails;
use crate::domain::a014_quotation::ui::list::QuotationList;
use crate::domain::a015_order::ui::details::OrderDetails;
use crate::domain::a015_order::ui::list::OrderList;
use crate::domain::a016_sale::ui::details::SaleDetails;
use crate::domain::a016_sale::ui::list::SaleList;
use crate::domain::a017_payment::ui::list::PaymentList;
use crate::domain::a018_product::ui::list::ProductList;

/// Page for `key`, or a placeholder when nothing is registered under it.
pub fn render_tab_content(key: &str) -> AnyView {
    match parse_tab_key(key) {
        // Inventory
        ("a018_product", TabKind::List) => view! { <ProductList /> }.into_any(),

        // HR catalogs
        ("a001_area", TabKind::List) => view! { <AreaList /> }.into_any(),
        ("a002_hierarchical_level", TabKind::List) => {
            view! { <HierarchicalLevelList /> }.into_any()
        }
        ("a003_contract_type", TabKind::List) => view! { <ContractTypeList /> }.into_any(),
        ("a004_work_shift", TabKind::List) => view! { <WorkShiftList /> }.into_any(),
        ("a005_labor_risk", TabKind::List) => view! { <LaborRiskList /> }.into_any(),
        ("a006_shift", TabKind::List) => view! { <ShiftList /> }.into_any(),
        ("a007_payment_period", TabKind::List) => view! { <PaymentPeriodList /> }.into_any(),
        ("a008_payment_unit", TabKind::List) => view! { <PaymentUnitList /> }.into_any(),
        ("a009_job_position", TabKind::List) => view! { <JobPositionList /> }.into_any(),

        // Sales
        ("a010_customer", TabKind::List) => view! { <CustomerList /> }.into_any(),

        ("a014_quotation", TabKind::List) => view! { <QuotationList /> }.into_any(),
        ("a014_quotation", TabKind::New) => view! { <QuotationDetails id=None /> }.into_any(),
        ("a014_quotation", TabKind::Detail(id)) => {
            view! { <QuotationDetails id=Some(id) /> }.into_any()
        }

        ("a015_order", TabKind::List) => view! { <OrderList /> }.into_any(),
        ("a015_order", TabKind::New) => view! { <OrderDetails id=None /> }.into_any(),
        ("a015_order", TabKind::Detail(id)) => view! { <OrderDetails id=Some(id) /> }.into_any(),

        ("a016_sale", TabKind::List) => view! { <SaleList /> }.into_any(),
        ("a016_sale", TabKind::New) => view! { <SaleDetails id=None /> }.into_any(),
        ("a016_sale", TabKind::Detail(id)) => view! { <SaleDetails id=Some(id) /> }.into_any(),

        ("a017_payment", TabKind::List) => view! { <PaymentList /> }.into_any(),

        _ => {
            log::warn!("no page registered for tab key {}", key);
            view! {
                <div class="page page--placeholder">
                    <p>"Página no disponible: " {key.to_string()}</p>
                </div>
            }
            .into_any()
        }
    }
}
