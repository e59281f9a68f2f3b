use serde::{de::DeserializeOwned, Serialize};
use super::entity_id::EntityId;

/// Root trait of every ERP record exchanged with the backend.
///
/// Instance methods expose the data of one record, associated functions the
/// static metadata of the entity (REST path, UI names).
pub trait ErpEntity: Clone + Serialize + DeserializeOwned + 'static {
    // ============================================================================
    // Instance data
    // ============================================================================

    /// Server id; `None` until the record has been created.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: Option<i64>);

    /// Tenant the record belongs to; stamped by the client before create.
    fn set_organization_id(&mut self, organization_id: Option<i64>);

    /// Human-readable name of the record (shown in pickers, toasts, tab titles).
    fn display_name(&self) -> String;

    fn is_active(&self) -> bool {
        true
    }

    /// Client-side check run before create/update; first problem wins.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    // ============================================================================
    // Entity metadata
    // ============================================================================

    /// Entity index inside the console (e.g. "a014")
    fn entity_index() -> &'static str;

    /// Collection name (e.g. "quotation")
    fn collection_name() -> &'static str;

    /// REST base path relative to the API root (e.g. "/Quotation")
    fn base_path() -> &'static str;

    /// UI name of a single record (e.g. "Cotización")
    fn element_name() -> &'static str;

    /// UI name of the list (e.g. "Cotizaciones")
    fn list_name() -> &'static str;

    /// Full system name, also used as the tab key of the list (e.g. "a014_quotation")
    fn full_name() -> String {
        format!("{}_{}", Self::entity_index(), Self::collection_name())
    }

    /// Tab key of the detail page of one record
    fn detail_key(id: i64) -> String {
        format!("{}_detail_{}", Self::full_name(), id.as_string())
    }
}
