//! # Inkwell Core
//!
//! The domain layer of the Inkwell blog.
//! This crate contains the post and comment lifecycle, the form validators and
//! the storage ports, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{AccountService, BlogService};
