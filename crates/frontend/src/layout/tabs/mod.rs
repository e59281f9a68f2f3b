//! Tab management
//!
//! - `page` wraps the content of one tab
//! - `registry` maps a tab key to its view
//! - `tab_labels` parses keys and gives tabs their titles

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{parse_tab_key, tab_label_for_key, TabKind};
