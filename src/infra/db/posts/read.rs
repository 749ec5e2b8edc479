use async_trait::async_trait;

use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::entities::PostRecord;
use crate::domain::posts::PostId;

use super::POST_COLUMNS;
use super::types::PostRow;
use crate::infra::db::{PostgresRepositories, map_sqlx_error};

impl PostgresRepositories {
    async fn list_by_featured(&self, featured: bool) -> Result<Vec<PostRecord>, RepoError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM post WHERE featured = $1");
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(featured)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn get_by_id(&self, id: PostId) -> Result<PostRecord, RepoError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM post WHERE post_id = $1");
        sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_one(self.pool())
            .await
            .map(PostRecord::from)
            .map_err(map_sqlx_error)
    }

    async fn list_featured(&self) -> Result<Vec<PostRecord>, RepoError> {
        self.list_by_featured(true).await
    }

    async fn list_most_recent(&self) -> Result<Vec<PostRecord>, RepoError> {
        self.list_by_featured(false).await
    }
}
