use chrono::{TimeDelta, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use crate::database::entity::{comment, post, user};
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};
use inkwell_core::domain::{Comment, Post};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{
    BaseRepository, CommentFilter, CommentRepository, PostQuery, PostRepository, UserRepository,
};

fn post_model(title: &str, published: bool) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        title: title.to_owned(),
        text: "Content".to_owned(),
        created_date: now.into(),
        published_date: published.then(|| (now + TimeDelta::seconds(1)).into()),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let model = post_model("Test Post", false);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert!(post.is_draft());
}

#[tokio::test]
async fn test_find_published_posts_maps_timestamps() {
    let newer = post_model("Newer", true);
    let older = post_model("Older", true);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![newer.clone(), older]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.find(PostQuery::published(Utc::now())).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Newer");
    assert_eq!(
        posts[0].published_date,
        newer.published_date.map(|d| d.with_timezone(&Utc))
    );
}

#[tokio::test]
async fn test_save_existing_post_updates_row() {
    let model = post_model("Edited", false);
    let post: Post = model.clone().into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let saved = repo.save(post.clone()).await.unwrap();

    assert_eq!(saved, post);
}

#[tokio::test]
async fn test_save_new_comment_falls_back_to_insert() {
    let model = comment::Model {
        id: Uuid::new_v4(),
        post_id: Uuid::new_v4(),
        author: "Ada".to_owned(),
        text: "Hello".to_owned(),
        created_date: Utc::now().into(),
        approved_comment: false,
    };
    let comment: Comment = model.clone().into();

    // The UPDATE .. RETURNING matches nothing, then the INSERT returns the row.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<comment::Model>::new()])
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let saved = repo.save(comment.clone()).await.unwrap();

    assert_eq!(saved, comment);
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_approved_comments() {
    let post_id = Uuid::new_v4();
    let approved = comment::Model {
        id: Uuid::new_v4(),
        post_id,
        author: "Ada".to_owned(),
        text: "Approved".to_owned(),
        created_date: Utc::now().into(),
        approved_comment: true,
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![approved]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comments = repo
        .find_by_post(post_id, CommentFilter::Approved)
        .await
        .unwrap();

    assert_eq!(comments.len(), 1);
    assert!(comments[0].approved_comment);
}

/// SQL of the only statement the repository sent.
fn logged_sql<E: sea_orm::EntityTrait>(
    repo: crate::database::postgres_base::PostgresBaseRepository<E>,
) -> String {
    let log = repo.db.into_transaction_log();
    assert_eq!(log.len(), 1);
    log[0].statements()[0].sql.clone()
}

#[tokio::test]
async fn test_published_query_filters_and_orders_by_published_date() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    repo.find(PostQuery::published(Utc::now())).await.unwrap();

    let sql = logged_sql(repo);
    assert!(sql.contains(r#"WHERE "posts"."published_date" <= $1"#), "{sql}");
    assert!(sql.ends_with(r#"ORDER BY "posts"."published_date" DESC"#), "{sql}");
}

#[tokio::test]
async fn test_drafts_query_filters_null_and_orders_by_created_date() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    repo.find(PostQuery::drafts()).await.unwrap();

    let sql = logged_sql(repo);
    assert!(sql.contains(r#"WHERE "posts"."published_date" IS NULL"#), "{sql}");
    assert!(sql.ends_with(r#"ORDER BY "posts"."created_date" ASC"#), "{sql}");
}

#[tokio::test]
async fn test_approved_comments_query_sql() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<comment::Model>::new()])
        .append_query_results(vec![Vec::<comment::Model>::new()])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let post_id = Uuid::new_v4();
    repo.find_by_post(post_id, CommentFilter::Approved)
        .await
        .unwrap();
    repo.find_by_post(post_id, CommentFilter::All).await.unwrap();

    let log = repo.db.into_transaction_log();
    assert_eq!(log.len(), 2);

    let approved = &log[0].statements()[0].sql;
    assert!(
        approved.contains(r#"WHERE "comments"."post_id" = $1 AND "comments"."approved_comment" = $2"#),
        "{approved}"
    );
    assert!(approved.ends_with(r#"ORDER BY "comments"."created_date" ASC"#), "{approved}");

    let all = &log[1].statements()[0].sql;
    assert!(!all.contains(r#""approved_comment" ="#), "{all}");
    assert!(all.ends_with(r#"ORDER BY "comments"."created_date" ASC"#), "{all}");
}

#[tokio::test]
async fn test_find_user_by_username() {
    let now = Utc::now();
    let model = user::Model {
        id: Uuid::new_v4(),
        username: "ada".to_owned(),
        password_hash: "hash".to_owned(),
        is_admin: true,
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user = repo.find_by_username("ada").await.unwrap().unwrap();

    assert_eq!(user.username, "ada");
    assert!(user.is_admin);
}
