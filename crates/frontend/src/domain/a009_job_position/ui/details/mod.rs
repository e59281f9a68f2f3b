//! Job position details (MVVM):
//! - model.rs: API calls
//! - view_model.rs: form state and commands
//! - view.rs: component

mod model;
mod view;
mod view_model;

pub use view::JobPositionDetails;
pub use view_model::JobPositionDetailsVm;
