//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod repository;

pub use auth::{
    AuthError, PasswordService, ROLE_ADMIN, ROLE_USER, TokenClaims, TokenService, roles_for,
};
pub use clock::{Clock, SystemClock};
pub use repository::{
    BaseRepository, CommentFilter, CommentRepository, PostFilter, PostQuery, PostRepository,
    PostSort, PostSortKey, SortDirection, UserRepository,
};
