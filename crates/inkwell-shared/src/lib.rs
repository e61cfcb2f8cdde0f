//! # Inkwell Shared
//!
//! Request and response bodies exchanged with the Inkwell server.
//! Kept free of server dependencies so clients can reuse them.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
