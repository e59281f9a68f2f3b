//! Shared contracts between the ERP console and its REST backend.
//!
//! - `domain` — one module per business entity (`aNNN_name`), mirroring the
//!   backend record shapes
//! - `shared` — response envelope, error type, pricing arithmetic, validation

pub mod domain;
pub mod shared;
