use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use inkwell_core::domain::{Actor, Post, User};
use inkwell_core::error::{DomainError, RepoError};
use inkwell_core::forms::{CommentForm, PostForm, REQUIRED_MESSAGE};
use inkwell_core::BlogService;
use inkwell_core::ports::{BaseRepository, Clock, CommentFilter, CommentRepository, UserRepository};

use super::InMemoryStore;

/// Clock that only moves when told to.
struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn new() -> Self {
        Self(Mutex::new(Utc::now()))
    }

    fn advance(&self, seconds: i64) -> DateTime<Utc> {
        let mut now = self.0.lock().unwrap();
        *now += TimeDelta::seconds(seconds);
        *now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

struct Fixture {
    store: InMemoryStore,
    clock: Arc<ManualClock>,
    blog: BlogService,
    author: Actor,
    admin: Actor,
}

async fn fixture() -> Fixture {
    let store = InMemoryStore::new();
    let users = store.users();
    let author = users
        .save(User::new("author".to_string(), "hash".to_string()))
        .await
        .unwrap();
    let admin = users
        .save(User::new("root".to_string(), "hash".to_string()).with_admin(true))
        .await
        .unwrap();

    let clock = Arc::new(ManualClock::new());
    let blog = BlogService::new(
        Arc::new(store.posts()),
        Arc::new(store.comments()),
        Arc::new(store.users()),
        clock.clone(),
    );

    Fixture {
        store,
        clock,
        blog,
        author: Actor::from(&author),
        admin: Actor::from(&admin),
    }
}

fn post_form(title: &str) -> PostForm {
    PostForm {
        author: None,
        title: title.to_string(),
        text: "Body".to_string(),
    }
}

fn comment_form(text: &str) -> CommentForm {
    CommentForm {
        author: "Reader".to_string(),
        text: text.to_string(),
    }
}

fn titles(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

#[tokio::test]
async fn test_draft_then_publish_walkthrough() {
    let f = fixture().await;

    let earlier = f.blog.create_post(&f.author, post_form("Earlier")).await.unwrap();
    f.clock.advance(1);
    f.blog.publish_post(&f.author, earlier.id).await.unwrap();

    f.clock.advance(1);
    let hello = f
        .blog
        .create_post(&f.author, PostForm {
            author: None,
            title: "Hello".to_string(),
            text: "World".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(hello.author_id, f.author.user_id);

    let drafts = f.blog.draft_posts(&f.author).await.unwrap();
    assert_eq!(titles(&drafts), vec!["Hello"]);
    let published = f.blog.published_posts().await.unwrap();
    assert_eq!(titles(&published), vec!["Earlier"]);

    let t1 = f.clock.advance(1);
    let hello = f.blog.publish_post(&f.author, hello.id).await.unwrap();
    assert_eq!(hello.published_date, Some(t1));

    let published = f.blog.published_posts().await.unwrap();
    assert_eq!(titles(&published), vec!["Hello", "Earlier"]);
    assert!(f.blog.draft_posts(&f.author).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_drafts_are_exactly_unpublished_posts_oldest_first() {
    let f = fixture().await;

    let first = f.blog.create_post(&f.author, post_form("First")).await.unwrap();
    f.clock.advance(1);
    let second = f.blog.create_post(&f.author, post_form("Second")).await.unwrap();
    f.clock.advance(1);
    f.blog.create_post(&f.author, post_form("Third")).await.unwrap();

    f.blog.publish_post(&f.author, second.id).await.unwrap();

    let drafts = f.blog.draft_posts(&f.author).await.unwrap();
    assert_eq!(titles(&drafts), vec!["First", "Third"]);
    assert_eq!(drafts[0].id, first.id);
    assert!(drafts.iter().all(Post::is_draft));
}

#[tokio::test]
async fn test_future_publish_date_is_not_listed() {
    let f = fixture().await;

    let mut post = f.blog.create_post(&f.author, post_form("Scheduled")).await.unwrap();
    post.publish(f.clock.now() + TimeDelta::hours(1));
    f.store.posts().save(post).await.unwrap();

    assert!(f.blog.published_posts().await.unwrap().is_empty());
    assert!(f.blog.draft_posts(&f.author).await.unwrap().is_empty());

    f.clock.advance(3600);
    assert_eq!(f.blog.published_posts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_republish_never_moves_timestamp_backwards() {
    let f = fixture().await;
    let post = f.blog.create_post(&f.author, post_form("Again")).await.unwrap();

    let first = f.blog.publish_post(&f.author, post.id).await.unwrap();
    f.clock.advance(10);
    let second = f.blog.publish_post(&f.author, post.id).await.unwrap();

    assert!(second.published_date.unwrap() >= first.published_date.unwrap());
}

#[tokio::test]
async fn test_update_keeps_author_and_created_date() {
    let f = fixture().await;
    let post = f.blog.create_post(&f.author, post_form("Draft")).await.unwrap();

    f.clock.advance(5);
    let edited = f
        .blog
        .update_post(&f.admin, post.id, post_form("Edited"))
        .await
        .unwrap();

    assert_eq!(edited.title, "Edited");
    assert_eq!(edited.author_id, f.author.user_id);
    assert_eq!(edited.created_date, post.created_date);
}

#[tokio::test]
async fn test_invalid_post_form_is_not_persisted() {
    let f = fixture().await;

    let result = f.blog.create_post(&f.author, post_form("")).await;

    let Err(DomainError::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert_eq!(errors.get("title").unwrap()[0], REQUIRED_MESSAGE);
    assert!(f.blog.draft_posts(&f.author).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_only_admins_reassign_authors() {
    let f = fixture().await;

    let mut form = post_form("Ghostwritten");
    form.author = Some(f.admin.user_id);
    let result = f.blog.create_post(&f.author, form).await;
    assert!(matches!(result, Err(DomainError::Forbidden(_))));

    let mut form = post_form("Ghostwritten");
    form.author = Some(f.author.user_id);
    let post = f.blog.create_post(&f.admin, form).await.unwrap();
    assert_eq!(post.author_id, f.author.user_id);

    // Resubmitting the current author is not a reassignment.
    let mut form = post_form("Ghostwritten, edited");
    form.author = Some(f.author.user_id);
    assert!(f.blog.update_post(&f.author, post.id, form).await.is_ok());
}

#[tokio::test]
async fn test_reassigning_to_unknown_user_is_a_field_error() {
    let f = fixture().await;

    let mut form = post_form("Orphan");
    form.author = Some(Uuid::new_v4());
    let result = f.blog.create_post(&f.admin, form).await;

    let Err(DomainError::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert!(errors.get("author").is_some());
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let f = fixture().await;
    let id = Uuid::new_v4();

    assert!(matches!(
        f.blog.post_detail(id, CommentFilter::All).await,
        Err(DomainError::NotFound { entity_type: "Post", .. })
    ));
    assert!(matches!(
        f.blog.publish_post(&f.author, id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        f.blog.add_comment(&f.author, id, comment_form("hi")).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        f.blog.approve_comment(&f.author, id).await,
        Err(DomainError::NotFound { entity_type: "Comment", .. })
    ));
    assert!(matches!(
        f.blog.remove_comment(&f.author, id).await,
        Err(DomainError::NotFound { entity_type: "Comment", .. })
    ));
}

#[tokio::test]
async fn test_empty_comment_text_is_rejected_and_nothing_is_saved() {
    let f = fixture().await;
    let post = f.blog.create_post(&f.author, post_form("Discuss")).await.unwrap();
    f.blog
        .add_comment(&f.author, post.id, comment_form("First!"))
        .await
        .unwrap();

    let result = f.blog.add_comment(&f.author, post.id, comment_form("")).await;

    let Err(DomainError::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert_eq!(errors.get("text").unwrap()[0], REQUIRED_MESSAGE);
    assert_eq!(f.blog.comment_count(post.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_approve_twice_and_approved_subset() {
    let f = fixture().await;
    let post = f.blog.create_post(&f.author, post_form("Moderated")).await.unwrap();
    let kept = f
        .blog
        .add_comment(&f.author, post.id, comment_form("Good"))
        .await
        .unwrap();
    f.clock.advance(1);
    f.blog
        .add_comment(&f.author, post.id, comment_form("Pending"))
        .await
        .unwrap();

    assert!(!kept.approved_comment);
    f.blog.approve_comment(&f.author, kept.id).await.unwrap();
    let again = f.blog.approve_comment(&f.author, kept.id).await.unwrap();
    assert!(again.approved_comment);

    let approved = f.blog.approved_comments(post.id).await.unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, kept.id);

    let detail = f.blog.post_detail(post.id, CommentFilter::All).await.unwrap();
    assert_eq!(detail.comments.len(), 2);
    assert_eq!(detail.comments[0].text, "Good");
}

#[tokio::test]
async fn test_delete_post_cascades_to_comments() {
    let f = fixture().await;
    let post = f.blog.create_post(&f.author, post_form("Doomed")).await.unwrap();
    let other = f.blog.create_post(&f.author, post_form("Survivor")).await.unwrap();

    let mut ids = Vec::new();
    for text in ["one", "two", "three"] {
        let comment = f
            .blog
            .add_comment(&f.author, post.id, comment_form(text))
            .await
            .unwrap();
        ids.push(comment.id);
    }
    f.blog
        .add_comment(&f.author, other.id, comment_form("stays"))
        .await
        .unwrap();

    f.blog.delete_post(&f.author, post.id).await.unwrap();

    let comments = f.store.comments();
    assert_eq!(comments.count_by_post(post.id).await.unwrap(), 0);
    for id in ids {
        assert!(comments.find_by_id(id).await.unwrap().is_none());
    }
    assert_eq!(comments.count_by_post(other.id).await.unwrap(), 1);
    assert!(matches!(
        f.blog.delete_post(&f.author, post.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_remove_comment_returns_owning_post() {
    let f = fixture().await;
    let post = f.blog.create_post(&f.author, post_form("Thread")).await.unwrap();
    let comment = f
        .blog
        .add_comment(&f.author, post.id, comment_form("bye"))
        .await
        .unwrap();

    let post_id = f.blog.remove_comment(&f.author, comment.id).await.unwrap();

    assert_eq!(post_id, post.id);
    assert!(f.store.comments().find_by_id(comment.id).await.unwrap().is_none());
    assert_eq!(f.blog.comment_count(post.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_store_enforces_references_and_unique_usernames() {
    let store = InMemoryStore::new();

    let orphan = inkwell_core::domain::Comment {
        id: Uuid::new_v4(),
        post_id: Uuid::new_v4(),
        author: "x".to_string(),
        text: "y".to_string(),
        created_date: Utc::now(),
        approved_comment: false,
    };
    assert!(matches!(
        store.comments().save(orphan).await,
        Err(RepoError::Constraint(_))
    ));

    let users = store.users();
    users
        .save(User::new("ada".to_string(), "hash".to_string()))
        .await
        .unwrap();
    let duplicate = users
        .save(User::new("ada".to_string(), "other".to_string()))
        .await;
    assert!(matches!(duplicate, Err(RepoError::Constraint(_))));
    assert!(users.find_by_username("ada").await.unwrap().is_some());
}
