use contracts::domain::common::CatalogEntity;
use leptos::prelude::*;
use thaw::*;

use super::{catalog_rows, CatalogDetails};
use crate::shared::api::CrudService;
use crate::shared::components::{ActiveBadge, ListToolbar, RowCheckbox, SelectAllHeader, SortHeader};
use crate::shared::format::or_dash;
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};

#[component]
pub fn CatalogList<T>(service: CrudService<T>) -> impl IntoView
where
    T: CatalogEntity + Send + Sync,
{
    let state = ListState::new(service.clone(), "name", true);
    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(None::<T>);

    let rows = {
        let state = state.clone();
        Signal::derive(move || {
            catalog_rows(
                &state.items.get(),
                &state.filter.get(),
                state.sort_ascending.get(),
            )
        })
    };
    let row_ids =
        Signal::derive(move || rows.get().iter().filter_map(|r| r.id()).collect::<Vec<_>>());

    let open_dialog = move |item: Option<T>| {
        editing.set(item);
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
        <PageFrame page_id=page_id(&T::full_name(), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <ListToolbar
                state=state.clone()
                on_new=Callback::new(move |_| open_dialog(None))
                search_placeholder="Buscar por nombre o descripción..."
            />

            <div class="page__content">
                <Table>
                    <TableHeader clone:state>
                        <TableRow>
                            <SelectAllHeader state=state.clone() ids=row_ids />
                            <SortHeader state=state.clone() field="name" label="Nombre" min_width=220.0 />
                            <TableHeaderCell resizable=true min_width=280.0>"Descripción"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Estado"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {
                            let state = state.clone();
                            move || rows.get().into_iter().map(|item| {
                                let state = state.clone();
                                let id = item.id().unwrap_or_default();
                                let base = item.base().clone();
                                let for_edit = item.clone();
                                let for_toggle = item.clone();
                                let for_delete = item.clone();
                                let state_toggle = state.clone();
                                let state_delete = state.clone();
                                let (toggle_title, toggle_icon) = if base.is_active {
                                    ("Desactivar", "x")
                                } else {
                                    ("Activar", "check")
                                };
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
                                                        open_dialog(Some(for_edit.clone()));
                                                    }
                                                >
                                                    {base.name.clone()}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {or_dash(base.description.as_deref())}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <ActiveBadge active=base.is_active />
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    attr:title=toggle_title
                                                    on_click=move |_| {
                                                        let mut record = for_toggle.clone();
                                                        let base = record.base_mut();
                                                        base.is_active = !base.is_active;
                                                        state_toggle.save_inline(record);
                                                    }
                                                >
                                                    {icon(toggle_icon)}
                                                </Button>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    attr:title="Eliminar"
                                                    on_click=move |_| state_delete.delete_one(&for_delete)
                                                >
                                                    {icon("delete")}
                                                </Button>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()
                        }
                    </TableBody>
                </Table>
                <Show when=move || rows.with(|r| r.is_empty())>
                    <div class="table__empty">"Sin registros"</div>
                </Show>
            </div>

            <Dialog open=dialog_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>
                            {move || {
                                if editing.with(|e| e.is_some()) {
                                    format!("Editar {}", T::element_name().to_lowercase())
                                } else {
                                    format!("Nuevo: {}", T::element_name().to_lowercase())
                                }
                            }}
                        </DialogTitle>
                        <DialogContent>
                            {
                                let service = service.clone();
                                move || dialog_open.get().then(|| view! {
                                    <CatalogDetails
                                        service=service.clone()
                                        item=editing.get_untracked()
                                        on_saved=on_saved
                                        on_cancel=on_cancel
                                    />
                                })
                            }
                        </DialogContent>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </PageFrame>
    }
}
