use async_trait::async_trait;

use crate::application::repos::{CreatePostParams, PostsWriteRepo, RepoError};
use crate::domain::posts::PostId;
use crate::infra::db::{PostgresRepositories, map_sqlx_error};

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostId, RepoError> {
        let CreatePostParams {
            title,
            subtitle,
            content,
            hero_image_path,
            preview_image_path,
            author,
            author_image_path,
            publish_date,
            featured,
        } = params;

        sqlx::query_scalar::<_, PostId>(
            r#"
            INSERT INTO post (
                title, subtitle, preview_img, post_img, author,
                author_url, publish_date, content, featured
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING post_id
            "#,
        )
        .bind(title)
        .bind(subtitle)
        .bind(preview_image_path)
        .bind(hero_image_path)
        .bind(author)
        .bind(author_image_path)
        .bind(publish_date)
        .bind(content)
        .bind(featured)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
