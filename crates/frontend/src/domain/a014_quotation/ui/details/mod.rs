//! Quotation details (MVVM), opened in its own tab:
//! - model.rs: API calls, including the conversion into an order
//! - view_model.rs: header, lines and commands
//! - view.rs: component

mod model;
mod view;
mod view_model;

pub use view::QuotationDetails;
pub use view_model::QuotationDetailsVm;
