use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use thaw::*;

use super::{ErrorBox, PageHeader};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{get_sort_indicator, SearchInput};

/// Title, the Nuevo / Actualizar / Eliminar buttons, search box and load error
/// of an entity list.
#[component]
pub fn ListToolbar<T>(
    state: ListState<T>,
    /// Hidden when the list has no create action
    #[prop(optional)]
    on_new: Option<Callback<()>>,
    #[prop(optional)] search_placeholder: &'static str,
) -> impl IntoView
where
    T: ErpEntity + Send + Sync,
{
    let placeholder = if search_placeholder.is_empty() {
        "Buscar..."
    } else {
        search_placeholder
    };
    let selected = state.selected;
    let loading = state.loading;
    let error = state.error;
    let filter = state.filter;
    let state_refresh = state.clone();
    let state_delete = state.clone();

    view! {
        <PageHeader title=T::list_name()>
            {on_new.map(|on_new| view! {
                <Button appearance=ButtonAppearance::Primary on_click=move |_| on_new.run(())>
                    {icon("plus")}
                    " Nuevo"
                </Button>
            })}
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| state_refresh.fetch()>
                {icon("refresh")}
                " Actualizar"
            </Button>
            <Button
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(move || selected.get().is_empty())
                on_click=move |_| state_delete.delete_selected()
            >
                {icon("delete")}
                {move || format!(" Eliminar ({})", selected.get().len())}
            </Button>
        </PageHeader>

        <div class="page__toolbar">
            <SearchInput
                value=filter
                on_change=Callback::new(move |v: String| filter.set(v))
                placeholder=placeholder
            />
            <Show when=move || loading.get()>
                <Spinner size=SpinnerSize::Small />
            </Show>
        </div>

        {move || error.get().map(|e| view! { <ErrorBox message=e /> })}
    }
}

/// Header cell that sorts the list by `field` on click.
#[component]
pub fn SortHeader<T>(
    state: ListState<T>,
    field: &'static str,
    label: &'static str,
    #[prop(optional)] min_width: Option<f64>,
) -> impl IntoView
where
    T: ErpEntity + Send + Sync,
{
    let sort_field = state.sort_field;
    let sort_ascending = state.sort_ascending;

    view! {
        <TableHeaderCell resizable=true min_width=min_width.unwrap_or(100.0)>
            <span class="table__sortable-header" on:click=move |_| state.toggle_sort(field)>
                {label}
                {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
            </span>
        </TableHeaderCell>
    }
}

/// Header checkbox that selects or clears the ids currently shown.
#[component]
pub fn SelectAllHeader<T>(state: ListState<T>, #[prop(into)] ids: Signal<Vec<i64>>) -> impl IntoView
where
    T: ErpEntity + Send + Sync,
{
    let state_check = state.clone();
    let all_checked = Signal::derive(move || state_check.all_selected(&ids.get()));
    view! {
        <th class="table__header-cell table__header-cell--checkbox">
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=all_checked
                on:change=move |ev| state.set_all_selected(ids.get_untracked(), event_target_checked(&ev))
            />
        </th>
    }
}

/// Selection cell of one row; clicks do not reach the row itself.
#[component]
pub fn RowCheckbox<T>(state: ListState<T>, id: i64) -> impl IntoView
where
    T: ErpEntity + Send + Sync,
{
    let state_check = state.clone();
    let checked = Signal::derive(move || state_check.is_selected(id));
    view! {
        <td class="table__cell table__cell--checkbox" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                on:change=move |ev| state.toggle_selected(id, event_target_checked(&ev))
            />
        </td>
    }
}
