//! Navigation menu grouped by business area.

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "inventory",
            label: "Inventario",
            icon: "inventory",
            items: vec![("a018_product", "products")],
        },
        MenuGroup {
            id: "hr",
            label: "Recursos Humanos",
            icon: "users",
            items: vec![
                ("a001_area", "list"),
                ("a002_hierarchical_level", "list"),
                ("a003_contract_type", "file-text"),
                ("a004_work_shift", "list"),
                ("a005_labor_risk", "alert"),
                ("a006_shift", "list"),
                ("a007_payment_period", "list"),
                ("a008_payment_unit", "list"),
                ("a009_job_position", "briefcase"),
            ],
        },
        MenuGroup {
            id: "sales",
            label: "Ventas",
            icon: "orders",
            items: vec![
                ("a010_customer", "customers"),
                ("a014_quotation", "file-text"),
                ("a015_order", "orders"),
                ("a016_sale", "invoices"),
                ("a017_payment", "payments"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let expanded_groups = RwSignal::new(vec!["sales".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {menu_groups().into_iter().map(|group| {
                let group_id = group.id.to_string();
                let gid_click = group_id.clone();
                let gid_chevron = group_id.clone();
                let items = StoredValue::new(group.items);

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = gid_click.clone();
                                expanded_groups.update(move |open| {
                                    match open.iter().position(|x| x == &gid) {
                                        Some(pos) => {
                                            open.remove(pos);
                                        }
                                        None => open.push(gid),
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.with(|g| g.contains(&gid_chevron))
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.with(|g| g.contains(&group_id))>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(key, icon_name)| {
                                    let label = tab_label_for_key(key);
                                    let title = label.clone();
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.with(|a| a.as_deref() == Some(key))
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(key, &title)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_menu_entry_has_a_page_title() {
        for group in menu_groups() {
            for (key, _) in group.items {
                assert_ne!(tab_label_for_key(key), key, "no title for {}", key);
            }
        }
    }

    #[test]
    fn hr_group_lists_all_catalogs_and_positions() {
        let hr = menu_groups().into_iter().find(|g| g.id == "hr").map(|g| g.items.len());
        assert_eq!(hr, Some(9));
    }
}
