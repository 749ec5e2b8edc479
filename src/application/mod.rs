//! Application services: reading the blog and ingesting new posts.

pub mod assets;
pub mod error;
pub mod feed;
pub mod ingest;
pub mod repos;
