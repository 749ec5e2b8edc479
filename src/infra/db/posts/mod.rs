mod read;
mod types;
mod write;

/// Column list shared by every `post` read, in `PostRow` order.
const POST_COLUMNS: &str = "post_id, title, subtitle, content, author, author_url, \
     post_img, preview_img, publish_date, featured";
