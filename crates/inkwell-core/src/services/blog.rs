//! Blog operations: post lifecycle, comments and moderation.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Actor, Comment, Post};
use crate::error::DomainError;
use crate::forms::{CommentForm, FormErrors, PostForm};
use crate::ports::{
    Clock, CommentFilter, CommentRepository, PostQuery, PostRepository, UserRepository,
};

const INVALID_AUTHOR_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// A post together with the comments its viewer may see.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// Application service for every blog operation.
///
/// Guarded operations take the calling [`Actor`]; holding one is the proof of
/// login. Each mutation is persisted immediately through a single repository
/// call.
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            comments,
            users,
            clock,
        }
    }

    /// Published posts, newest publication first.
    pub async fn published_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find(PostQuery::published(self.clock.now())).await?)
    }

    /// Unpublished posts, oldest first.
    pub async fn draft_posts(&self, _actor: &Actor) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find(PostQuery::drafts()).await?)
    }

    pub async fn post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    pub async fn comment(&self, id: Uuid) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment", id))
    }

    pub async fn post_detail(
        &self,
        id: Uuid,
        comments: CommentFilter,
    ) -> Result<PostDetail, DomainError> {
        let post = self.post(id).await?;
        let comments = self.comments.find_by_post(post.id, comments).await?;
        Ok(PostDetail { post, comments })
    }

    pub async fn approved_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let post = self.post(post_id).await?;
        Ok(self
            .comments
            .find_by_post(post.id, CommentFilter::Approved)
            .await?)
    }

    pub async fn comment_count(&self, post_id: Uuid) -> Result<u64, DomainError> {
        Ok(self.comments.count_by_post(post_id).await?)
    }

    pub async fn create_post(&self, actor: &Actor, form: PostForm) -> Result<Post, DomainError> {
        let fields = form.validate()?;
        let author_id = self
            .resolve_author(actor, fields.author(), actor.user_id)
            .await?;

        let post = Post::new(author_id, fields, self.clock.now());
        Ok(self.posts.save(post).await?)
    }

    pub async fn update_post(
        &self,
        actor: &Actor,
        id: Uuid,
        form: PostForm,
    ) -> Result<Post, DomainError> {
        let mut post = self.post(id).await?;
        let fields = form.validate()?;
        let author_id = self
            .resolve_author(actor, fields.author(), post.author_id)
            .await?;

        post.apply(author_id, fields);
        Ok(self.posts.save(post).await?)
    }

    /// Delete a post. Its comments go with it.
    pub async fn delete_post(&self, _actor: &Actor, id: Uuid) -> Result<Post, DomainError> {
        let post = self.post(id).await?;
        self.posts.delete(post.id).await?;
        Ok(post)
    }

    pub async fn publish_post(&self, _actor: &Actor, id: Uuid) -> Result<Post, DomainError> {
        let mut post = self.post(id).await?;
        post.publish(self.clock.now());
        Ok(self.posts.save(post).await?)
    }

    pub async fn add_comment(
        &self,
        _actor: &Actor,
        post_id: Uuid,
        form: CommentForm,
    ) -> Result<Comment, DomainError> {
        let post = self.post(post_id).await?;
        let fields = form.validate()?;

        let comment = Comment::new(post.id, fields, self.clock.now());
        Ok(self.comments.save(comment).await?)
    }

    pub async fn approve_comment(&self, _actor: &Actor, id: Uuid) -> Result<Comment, DomainError> {
        let mut comment = self.comment(id).await?;
        comment.approve();
        Ok(self.comments.save(comment).await?)
    }

    /// Delete a comment and return the id of the post it belonged to.
    ///
    /// The post id is read before the delete; afterwards it is unreachable.
    pub async fn remove_comment(&self, _actor: &Actor, id: Uuid) -> Result<Uuid, DomainError> {
        let comment = self.comment(id).await?;
        let post_id = comment.post_id;
        self.comments.delete(comment.id).await?;
        Ok(post_id)
    }

    /// Pick the post author. Anything other than `current` needs the admin role
    /// and must name an existing user.
    async fn resolve_author(
        &self,
        actor: &Actor,
        requested: Option<Uuid>,
        current: Uuid,
    ) -> Result<Uuid, DomainError> {
        let Some(requested) = requested.filter(|id| *id != current) else {
            return Ok(current);
        };

        if !actor.is_admin {
            return Err(DomainError::Forbidden(
                "only administrators can change a post's author".to_string(),
            ));
        }

        if self.users.find_by_id(requested).await?.is_none() {
            return Err(FormErrors::single("author", INVALID_AUTHOR_MESSAGE).into());
        }

        Ok(requested)
    }
}
