pub mod api;
pub mod catalog;
pub mod components;
pub mod document_form;
pub mod format;
pub mod icons;
pub mod list_state;
pub mod list_utils;
pub mod page_frame;
pub mod page_standard;
pub mod toast;
