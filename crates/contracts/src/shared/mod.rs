pub mod api_response;
pub mod dates;
pub mod error;
pub mod pricing;
pub mod validation;
