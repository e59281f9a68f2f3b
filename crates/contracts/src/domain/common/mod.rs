//! Common types and traits for all ERP entities

pub mod audit;
pub mod catalog;
pub mod document;
pub mod entity_id;
pub mod entity_root;

// Re-exports
pub use audit::AuditFields;
pub use catalog::{CatalogBase, CatalogEntity};
pub use document::{CommercialDocument, DocumentLine};
pub use entity_id::EntityId;
pub use entity_root::ErpEntity;
