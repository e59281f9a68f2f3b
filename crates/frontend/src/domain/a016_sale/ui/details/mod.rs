mod model;
mod payments;
mod view;
mod view_model;

pub use view::SaleDetails;
pub use view_model::SaleDetailsVm;
