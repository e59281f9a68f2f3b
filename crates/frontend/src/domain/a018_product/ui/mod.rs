pub mod details;
pub mod list;
