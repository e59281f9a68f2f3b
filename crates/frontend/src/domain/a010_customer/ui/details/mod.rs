//! Customer details (MVVM):
//! - model.rs: API calls
//! - view_model.rs: form state, active tab and commands
//! - page.rs: header, tab bar and tab routing
//! - tabs/: one component per tab
//!
//! Addresses, fiscal data and products hang from the customer id, so their
//! tabs open only once the customer is saved.

mod model;
mod page;
mod tabs;
mod view_model;

pub use page::CustomerDetails;
pub use view_model::CustomerDetailsVm;
