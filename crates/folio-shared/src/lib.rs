//! # Folio Shared
//!
//! Wire types shared by the server and any front end rendering its output.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
