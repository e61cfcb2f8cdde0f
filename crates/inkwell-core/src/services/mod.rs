//! Application services - orchestrate domain entities over the ports.

mod accounts;
mod blog;

pub use accounts::AccountService;
pub use blog::{BlogService, PostDetail};
