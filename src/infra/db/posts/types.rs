use crate::domain::entities::PostRecord;
use crate::domain::posts::PostId;

#[derive(sqlx::FromRow)]
pub(crate) struct PostRow {
    pub(crate) post_id: PostId,
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) content: String,
    pub(crate) author: String,
    pub(crate) author_url: String,
    pub(crate) post_img: String,
    pub(crate) preview_img: String,
    pub(crate) publish_date: String,
    pub(crate) featured: bool,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.post_id,
            title: row.title,
            subtitle: row.subtitle,
            content: row.content,
            hero_image_path: row.post_img,
            preview_image_path: row.preview_img,
            author: row.author,
            author_image_path: row.author_url,
            publish_date: row.publish_date,
            featured: row.featured,
        }
    }
}
