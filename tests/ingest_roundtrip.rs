mod support;

use escape::application::ingest::IngestError;
use escape::domain::posts::PostListing;

use support::{Harness, request};

#[tokio::test]
async fn created_post_reads_back_with_public_image_paths() {
    let harness = Harness::new();

    let id = harness
        .ingest
        .create_post(request("Hello"))
        .await
        .expect("create");

    let view = harness.feed.post_detail(id).await.expect("detail");
    assert_eq!(view.title, "Hello");
    assert_eq!(view.subtitle, "S");
    assert_eq!(view.preview_image, "/static/img/v.png");
    assert_eq!(view.content, "body");

    let row = harness.posts.rows().pop().expect("row");
    assert_eq!(row.author_image_path, "/static/img/a.png");
    assert_eq!(row.hero_image_path, "/static/img/p.png");
    assert_eq!(row.author, "A");
    assert_eq!(row.publish_date, "May 1");
}

#[tokio::test]
async fn stored_images_hold_the_decoded_bytes() {
    let harness = Harness::new();

    harness
        .ingest
        .create_post(request("Hello"))
        .await
        .expect("create");

    assert_eq!(harness.content.read("a.png").await.expect("author"), "author");
    assert_eq!(harness.content.read("p.png").await.expect("hero"), "hero");
    assert_eq!(harness.content.read("v.png").await.expect("preview"), "preview");
}

#[tokio::test]
async fn ingested_posts_land_in_most_recent() {
    let harness = Harness::new();
    harness.posts.seed("Curated", true);

    let id = harness
        .ingest
        .create_post(request("Hello"))
        .await
        .expect("create");

    let row = harness
        .posts
        .rows()
        .into_iter()
        .find(|post| post.id == id)
        .expect("row");
    assert_eq!(row.listing(), PostListing::MostRecent);

    let home = harness.feed.home_page().await.expect("home");
    let featured: Vec<&str> = home.featured.iter().map(|p| p.title.as_str()).collect();
    let recent: Vec<&str> = home.most_recent.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(featured, ["Curated"]);
    assert_eq!(recent, ["Hello"]);
}

#[tokio::test]
async fn every_post_appears_in_exactly_one_listing() {
    let harness = Harness::new();
    harness.posts.seed("one", true);
    harness.posts.seed("two", false);
    harness.posts.seed("three", true);
    harness.posts.seed("four", false);

    let home = harness.feed.home_page().await.expect("home");

    let mut ids: Vec<i64> = home
        .featured
        .iter()
        .chain(home.most_recent.iter())
        .map(|p| p.post_id.get())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, [1, 2, 3, 4]);
    assert_eq!(home.featured.len(), 2);
}

#[tokio::test]
async fn undecodable_preview_leaves_no_trace() {
    let harness = Harness::new();
    let mut bad = request("Hello");
    bad.preview_image_base64 = "not base64!".to_string();

    let err = harness.ingest.create_post(bad).await.expect_err("decode");

    assert!(matches!(err, IngestError::Decode { .. }));
    assert!(harness.posts.rows().is_empty());
    assert!(!harness.image_exists("a.png"));
    assert!(!harness.image_exists("p.png"));
    assert!(!harness.image_exists("v.png"));
}

#[tokio::test]
async fn later_submission_overwrites_a_shared_image_name() {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    let harness = Harness::new();
    harness
        .ingest
        .create_post(request("first"))
        .await
        .expect("first");

    let mut second = request("second");
    second.author_image_base64 = STANDARD.encode(b"new author");
    harness.ingest.create_post(second).await.expect("second");

    assert_eq!(
        harness.content.read("a.png").await.expect("author"),
        "new author"
    );
    let paths: Vec<String> = harness
        .posts
        .rows()
        .into_iter()
        .map(|post| post.author_image_path)
        .collect();
    assert_eq!(paths, ["/static/img/a.png", "/static/img/a.png"]);
}
