//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

use inkwell_core::domain::{Comment, Post, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{
    CommentFilter, CommentRepository, PostFilter, PostQuery, PostRepository, PostSortKey,
    SortDirection, UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

/// Translate a post query into a SeaORM select.
fn post_select(query: PostQuery) -> Select<PostEntity> {
    let select = match query.filter {
        PostFilter::PublishedAsOf(now) => {
            PostEntity::find().filter(post::Column::PublishedDate.lte(now))
        }
        PostFilter::Drafts => PostEntity::find().filter(post::Column::PublishedDate.is_null()),
    };

    let column = match query.sort.key {
        PostSortKey::CreatedDate => post::Column::CreatedDate,
        PostSortKey::PublishedDate => post::Column::PublishedDate,
    };

    match query.sort.direction {
        SortDirection::Ascending => select.order_by_asc(column),
        SortDirection::Descending => select.order_by_desc(column),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find(&self, query: PostQuery) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?query, "Querying posts");

        let result = post_select(query)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(
        &self,
        post_id: Uuid,
        filter: CommentFilter,
    ) -> Result<Vec<Comment>, RepoError> {
        let mut select = CommentEntity::find().filter(comment::Column::PostId.eq(post_id));
        if filter == CommentFilter::Approved {
            select = select.filter(comment::Column::ApprovedComment.eq(true));
        }

        let result = select
            .order_by_asc(comment::Column::CreatedDate)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(query_error)
    }
}
