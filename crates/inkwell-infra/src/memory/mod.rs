//! In-memory implementations of the storage ports.

mod store;

pub use store::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
};

#[cfg(test)]
mod tests;
