use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Comment, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their login name.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Which posts a query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    /// `published_date <= as_of`.
    PublishedAsOf(DateTime<Utc>),
    /// `published_date IS NULL`.
    Drafts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortKey {
    CreatedDate,
    PublishedDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostSort {
    pub key: PostSortKey,
    pub direction: SortDirection,
}

/// A post query: predicate plus sort key, interpreted by each storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    pub filter: PostFilter,
    pub sort: PostSort,
}

impl PostQuery {
    /// Posts whose publish timestamp is set and not after `now`, newest first.
    pub fn published(now: DateTime<Utc>) -> Self {
        Self {
            filter: PostFilter::PublishedAsOf(now),
            sort: PostSort {
                key: PostSortKey::PublishedDate,
                direction: SortDirection::Descending,
            },
        }
    }

    /// Unpublished posts, oldest first.
    pub fn drafts() -> Self {
        Self {
            filter: PostFilter::Drafts,
            sort: PostSort {
                key: PostSortKey::CreatedDate,
                direction: SortDirection::Ascending,
            },
        }
    }
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find(&self, query: PostQuery) -> Result<Vec<Post>, RepoError>;
}

/// Which comments of a post to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentFilter {
    All,
    Approved,
}

/// Comment repository. Results are ordered by creation.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    async fn find_by_post(
        &self,
        post_id: Uuid,
        filter: CommentFilter,
    ) -> Result<Vec<Comment>, RepoError>;

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}
