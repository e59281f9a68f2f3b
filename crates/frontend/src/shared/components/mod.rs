pub mod form;
pub mod form_dialog;
pub mod line_items_editor;
pub mod list_toolbar;
pub mod page_header;
pub mod reference_select;
pub mod status_badge;
pub mod totals_panel;

pub use form::FormField;
pub use form_dialog::FormDialog;
pub use line_items_editor::{LineItemsEditor, LineRow};
pub use list_toolbar::{ListToolbar, RowCheckbox, SelectAllHeader, SortHeader};
pub use page_header::{ErrorBox, PageHeader};
pub use reference_select::{use_reference_options, ReferenceSelect};
pub use status_badge::{ActiveBadge, StatusBadge};
pub use totals_panel::TotalsPanel;
