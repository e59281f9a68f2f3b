use std::cmp::Ordering;

use contracts::domain::a001_area::aggregate::Area;
use contracts::domain::a002_hierarchical_level::aggregate::HierarchicalLevel;
use contracts::domain::a009_job_position::aggregate::JobPosition;
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a009_job_position::api::use_service;
use crate::domain::a009_job_position::ui::details::JobPositionDetails;
use crate::shared::components::form::id_text;
use crate::shared::components::reference_select::option_label;
use crate::shared::components::{
    use_reference_options, ActiveBadge, FormDialog, ListToolbar, RowCheckbox, SelectAllHeader,
    SortHeader,
};
use crate::shared::format::{format_money, or_dash};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{any_field_matches, compare_f64, compare_text, Searchable, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};

impl Searchable for JobPosition {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_matches(
            [self.name.as_str(), self.description.as_deref().unwrap_or_default()],
            filter,
        )
    }
}

impl Sortable for JobPosition {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "base_salary" => compare_f64(self.base_salary, other.base_salary),
            "vacancies" => self.vacancies.cmp(&other.vacancies),
            _ => compare_text(&self.name, &other.name),
        }
    }
}

#[component]
pub fn JobPositionList() -> impl IntoView {
    let state = ListState::new(use_service(), "name", true);
    let areas = use_reference_options::<Area>();
    let levels = use_reference_options::<HierarchicalLevel>();

    let dialog_open = RwSignal::new(false);
    let editing_id = RwSignal::new(None::<i64>);

    let rows = {
        let state = state.clone();
        Signal::derive(move || state.visible())
    };
    let row_ids =
        Signal::derive(move || rows.get().iter().filter_map(|r| r.id).collect::<Vec<_>>());

    let open_dialog = move |id: Option<i64>| {
        editing_id.set(id);
        dialog_open.set(true);
    };
    let on_saved = {
        let state = state.clone();
        Callback::new(move |_| {
            dialog_open.set(false);
            state.fetch();
        })
    };
    let on_cancel = Callback::new(move |_| dialog_open.set(false));

    state.fetch();

    view! {
        <PageFrame page_id=page_id(&JobPosition::full_name(), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <ListToolbar
                state=state.clone()
                on_new=Callback::new(move |_| open_dialog(None))
                search_placeholder="Buscar puesto..."
            />

            <div class="page__content">
                <Table>
                    <TableHeader clone:state>
                        <TableRow>
                            <SelectAllHeader state=state.clone() ids=row_ids />
                            <SortHeader state=state.clone() field="name" label="Puesto" min_width=200.0 />
                            <TableHeaderCell min_width=150.0>"Área"</TableHeaderCell>
                            <TableHeaderCell min_width=150.0>"Nivel"</TableHeaderCell>
                            <SortHeader state=state.clone() field="base_salary" label="Salario base" min_width=120.0 />
                            <SortHeader state=state.clone() field="vacancies" label="Vacantes" min_width=90.0 />
                            <TableHeaderCell min_width=90.0>"Estado"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {
                            let state = state.clone();
                            move || rows.get().into_iter().map(|position| {
                                let state = state.clone();
                                let id = position.id.unwrap_or_default();
                                let area = option_label(&areas.get(), &id_text(position.area_id));
                                let level = option_label(&levels.get(), &id_text(position.hierarchical_level_id));
                                let state_delete = state.clone();
                                let for_delete = position.clone();
                                view! {
                                    <TableRow>
                                        <RowCheckbox state=state.clone() id=id />
                                        <TableCell>
                                            <TableCellLayout>
                                                <a
                                                    href="#"
                                                    class="table__link"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        open_dialog(Some(id));
                                                    }
                                                >
                                                    {position.name.clone()}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>{or_dash(area.as_deref())}</TableCell>
                                        <TableCell>{or_dash(level.as_deref())}</TableCell>
                                        <TableCell class="text-right">{format_money(position.base_salary)}</TableCell>
                                        <TableCell class="text-right">{position.vacancies}</TableCell>
                                        <TableCell><ActiveBadge active=position.is_active /></TableCell>
                                        <TableCell>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                attr:title="Eliminar"
                                                on_click=move |_| state_delete.delete_one(&for_delete)
                                            >
                                                {icon("delete")}
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()
                        }
                    </TableBody>
                </Table>
                <Show when=move || rows.with(|r| r.is_empty())>
                    <div class="table__empty">"Sin puestos registrados"</div>
                </Show>
            </div>

            <FormDialog
                open=dialog_open
                title=Signal::derive(move || {
                    if editing_id.get().is_some() { "Editar puesto".to_string() } else { "Nuevo puesto".to_string() }
                })
            >
                <JobPositionDetails id=editing_id.get_untracked() on_saved=on_saved on_cancel=on_cancel />
            </FormDialog>
        </PageFrame>
    }
}
