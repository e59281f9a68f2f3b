//! The general tab edits the customer itself; the other tabs embed the
//! sub-resource panels of a011, a012 and a013.

mod general;

pub use general::GeneralTab;
