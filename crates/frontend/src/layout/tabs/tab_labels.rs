//! Tab keys and their titles.
//!
//! A key is the entity's `full_name()` for its list, `{full_name}_new` for an
//! empty form and `{full_name}_detail_{id}` for a stored record.

use contracts::domain::a001_area::aggregate::Area;
use contracts::domain::a002_hierarchical_level::aggregate::HierarchicalLevel;
use contracts::domain::a003_contract_type::aggregate::ContractType;
use contracts::domain::a004_work_shift::aggregate::WorkShift;
use contracts::domain::a005_labor_risk::aggregate::LaborRisk;
use contracts::domain::a006_shift::aggregate::Shift;
use contracts::domain::a007_payment_period::aggregate::PaymentPeriod;
use contracts::domain::a008_payment_unit::aggregate::PaymentUnit;
use contracts::domain::a009_job_position::aggregate::JobPosition;
use contracts::domain::a010_customer::aggregate::Customer;
use contracts::domain::a014_quotation::aggregate::Quotation;
use contracts::domain::a015_order::aggregate::Order;
use contracts::domain::a016_sale::aggregate::Sale;
use contracts::domain::a017_payment::aggregate::Payment;
use contracts::domain::a018_product::aggregate::Product;
use contracts::domain::common::{EntityId, ErpEntity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    List,
    New,
    Detail(i64),
}

/// Splits a tab key into the entity's full name and what the tab shows.
pub fn parse_tab_key(key: &str) -> (&str, TabKind) {
    if let Some((base, id)) = key.rsplit_once("_detail_") {
        if let Ok(id) = i64::from_string(id) {
            return (base, TabKind::Detail(id));
        }
    }
    match key.strip_suffix("_new") {
        Some(base) => (base, TabKind::New),
        None => (key, TabKind::List),
    }
}

struct TabEntity {
    full_name: String,
    list_name: &'static str,
    element_name: &'static str,
    new_label: &'static str,
}

fn entity<T: ErpEntity>(new_label: &'static str) -> TabEntity {
    TabEntity {
        full_name: T::full_name(),
        list_name: T::list_name(),
        element_name: T::element_name(),
        new_label,
    }
}

fn entities() -> Vec<TabEntity> {
    vec![
        entity::<Area>("Nueva área"),
        entity::<HierarchicalLevel>("Nuevo nivel jerárquico"),
        entity::<ContractType>("Nuevo tipo de contrato"),
        entity::<WorkShift>("Nueva jornada laboral"),
        entity::<LaborRisk>("Nuevo riesgo de trabajo"),
        entity::<Shift>("Nuevo turno"),
        entity::<PaymentPeriod>("Nuevo periodo de pago"),
        entity::<PaymentUnit>("Nueva unidad de pago"),
        entity::<JobPosition>("Nuevo puesto"),
        entity::<Customer>("Nuevo cliente"),
        entity::<Quotation>("Nueva cotización"),
        entity::<Order>("Nuevo pedido"),
        entity::<Sale>("Nueva venta"),
        entity::<Payment>("Nuevo pago"),
        entity::<Product>("Nuevo producto"),
    ]
}

/// Readable title of a tab. Unknown keys are shown as they are.
pub fn tab_label_for_key(key: &str) -> String {
    let (base, kind) = parse_tab_key(key);
    let Some(entity) = entities().into_iter().find(|e| e.full_name == base) else {
        return key.to_string();
    };
    match kind {
        TabKind::List => entity.list_name.to_string(),
        TabKind::New => entity.new_label.to_string(),
        TabKind::Detail(id) => format!("{} #{}", entity.element_name, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_split_into_entity_and_kind() {
        assert_eq!(parse_tab_key("a014_quotation"), ("a014_quotation", TabKind::List));
        assert_eq!(parse_tab_key("a015_order_new"), ("a015_order", TabKind::New));
        assert_eq!(parse_tab_key("a016_sale_detail_42"), ("a016_sale", TabKind::Detail(42)));
        assert_eq!(parse_tab_key("a016_sale_detail_x"), ("a016_sale_detail_x", TabKind::List));
    }

    #[test]
    fn labels_for_lists_forms_and_records() {
        assert_eq!(tab_label_for_key("a010_customer"), "Clientes");
        assert_eq!(tab_label_for_key("a014_quotation_new"), "Nueva cotización");
        assert_eq!(tab_label_for_key("a015_order_detail_7"), "Pedido #7");
        assert_eq!(tab_label_for_key("a009_job_position"), "Puestos");
        assert_eq!(tab_label_for_key("zz_unknown"), "zz_unknown");
    }
}
