//! Postgres-backed repository checks. Run with `DATABASE_URL` set and `--ignored`.

use escape::application::repos::{CreatePostParams, PostsRepo, PostsWriteRepo, RepoError};
use escape::domain::posts::PostId;
use escape::infra::db::PostgresRepositories;
use sqlx::PgPool;

fn params(title: &str, featured: bool) -> CreatePostParams {
    CreatePostParams {
        title: title.to_string(),
        subtitle: format!("{title} subtitle"),
        content: "body".to_string(),
        hero_image_path: "/static/img/p.png".to_string(),
        preview_image_path: "/static/img/v.png".to_string(),
        author: "A".to_string(),
        author_image_path: "/static/img/a.png".to_string(),
        publish_date: "May 1".to_string(),
        featured,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres instance (DATABASE_URL)"]
async fn insert_then_fetch_preserves_every_column(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);

    let id = repos
        .create_post(params("Hello", false))
        .await
        .expect("insert");
    let post = repos.get_by_id(id).await.expect("fetch");

    assert_eq!(post.id, id);
    assert_eq!(post.title, "Hello");
    assert_eq!(post.subtitle, "Hello subtitle");
    assert_eq!(post.hero_image_path, "/static/img/p.png");
    assert_eq!(post.preview_image_path, "/static/img/v.png");
    assert_eq!(post.author_image_path, "/static/img/a.png");
    assert_eq!(post.publish_date, "May 1");
    assert!(!post.featured);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres instance (DATABASE_URL)"]
async fn identifiers_are_distinct(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);

    let first = repos.create_post(params("a", false)).await.expect("first");
    let second = repos.create_post(params("b", false)).await.expect("second");

    assert_ne!(first, second);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres instance (DATABASE_URL)"]
async fn listings_partition_on_featured(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    repos.create_post(params("f1", true)).await.expect("f1");
    repos.create_post(params("r1", false)).await.expect("r1");
    repos.create_post(params("f2", true)).await.expect("f2");

    let mut featured: Vec<String> = repos
        .list_featured()
        .await
        .expect("featured")
        .into_iter()
        .map(|post| post.title)
        .collect();
    featured.sort();
    let recent = repos.list_most_recent().await.expect("recent");

    assert_eq!(featured, ["f1", "f2"]);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].title, "r1");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres instance (DATABASE_URL)"]
async fn missing_row_is_not_found(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);

    let err = repos
        .get_by_id(PostId::new(4242).unwrap())
        .await
        .expect_err("missing");

    assert!(matches!(err, RepoError::NotFound));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres instance (DATABASE_URL)"]
async fn health_check_succeeds_on_live_pool(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    repos.health_check().await.expect("health");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres instance (DATABASE_URL)"]
async fn featured_post_is_only_in_featured_listing(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);

    let id = repos
        .create_post(params("Hello", true))
        .await
        .expect("insert");

    let featured = repos.list_featured().await.expect("featured");
    let recent = repos.list_most_recent().await.expect("recent");

    assert!(
        featured
            .iter()
            .any(|post| post.id == id && post.title == "Hello" && post.author == "A")
    );
    assert!(recent.iter().all(|post| post.id != id));
}
