pub mod crud;
pub mod http;

pub use crud::{use_crud, CrudService};
