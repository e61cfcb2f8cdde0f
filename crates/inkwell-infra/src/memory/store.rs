//! In-memory store - used when no database is configured, and in tests.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use inkwell_core::domain::{Comment, Post, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{
    BaseRepository, CommentFilter, CommentRepository, PostFilter, PostQuery, PostRepository,
    PostSortKey, SortDirection, UserRepository,
};

/// Rows are kept in insertion order, which is the order unsorted queries return.
#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

type SharedTables = Arc<RwLock<Tables>>;

trait Row: Clone {
    fn id(&self) -> Uuid;
}

impl Row for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Row for Post {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Row for Comment {
    fn id(&self) -> Uuid {
        self.id
    }
}

fn find_row<T: Row>(rows: &[T], id: Uuid) -> Option<T> {
    rows.iter().find(|row| row.id() == id).cloned()
}

/// Replace the row with the same id, or append it.
fn upsert_row<T: Row>(rows: &mut Vec<T>, entity: T) -> T {
    match rows.iter_mut().find(|row| row.id() == entity.id()) {
        Some(existing) => *existing = entity.clone(),
        None => rows.push(entity.clone()),
    }
    entity
}

fn missing_reference(entity_type: &str, id: Uuid) -> RepoError {
    RepoError::Constraint(format!("{entity_type} {id} does not exist"))
}

/// All tables behind a single async `RwLock`, so cascading deletes are atomic.
///
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: SharedTables,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository {
            tables: self.tables.clone(),
        }
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    tables: SharedTables,
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(find_row(&self.tables.read().await.users, id))
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;

        if tables
            .users
            .iter()
            .any(|u| u.username == user.username && u.id != user.id)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        Ok(upsert_row(&mut tables.users, user))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(RepoError::NotFound);
        }

        let owned: Vec<Uuid> = tables
            .posts
            .iter()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        tables.posts.retain(|p| p.author_id != id);
        tables.comments.retain(|c| !owned.contains(&c.post_id));

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: SharedTables,
}

impl InMemoryPostRepository {
    fn matches(filter: PostFilter, post: &Post) -> bool {
        match filter {
            PostFilter::PublishedAsOf(now) => post.is_published(now),
            PostFilter::Drafts => post.is_draft(),
        }
    }

    fn compare(query: &PostQuery, a: &Post, b: &Post) -> Ordering {
        let ordering = match query.sort.key {
            PostSortKey::CreatedDate => a.created_date.cmp(&b.created_date),
            PostSortKey::PublishedDate => a.published_date.cmp(&b.published_date),
        };

        match query.sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(find_row(&self.tables.read().await.posts, id))
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.users.iter().any(|u| u.id == post.author_id) {
            return Err(missing_reference("User", post.author_id));
        }

        Ok(upsert_row(&mut tables.posts, post))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Err(RepoError::NotFound);
        }

        let comments_before = tables.comments.len();
        tables.comments.retain(|c| c.post_id != id);
        tracing::debug!(
            post_id = %id,
            comments_removed = comments_before - tables.comments.len(),
            "Deleted post"
        );

        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find(&self, query: PostQuery) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?query, "Querying posts");

        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .iter()
            .filter(|post| Self::matches(query.filter, post))
            .cloned()
            .collect();

        // Stable sort: ties keep insertion order.
        posts.sort_by(|a, b| Self::compare(&query, a, b));
        Ok(posts)
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    tables: SharedTables,
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(find_row(&self.tables.read().await.comments, id))
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.posts.iter().any(|p| p.id == comment.post_id) {
            return Err(missing_reference("Post", comment.post_id));
        }

        Ok(upsert_row(&mut tables.comments, comment))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        if tables.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post(
        &self,
        post_id: Uuid,
        filter: CommentFilter,
    ) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .filter(|c| filter == CommentFilter::All || c.approved_comment)
            .cloned()
            .collect())
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().filter(|c| c.post_id == post_id).count() as u64)
    }
}
