pub mod db;
pub mod email;
pub mod minio;

pub use db::{create_pool, DbConn, DbPool};
pub use email::{EmailSender, HttpEmailClient};
pub use minio::{BlobStore, S3BlobStore};
