//! # Content
//!
//! The blog side: post types, the `ContentApi` client for the post backend,
//! and `ObjectStorage` for image uploads.

pub mod api;
pub mod storage;
pub mod types;

pub use api::{ContentApi, ContentError, HttpContentApi};
pub use storage::{HttpObjectStorage, ObjectStorage, StorageError, UploadProgress, upload_file};
pub use types::{Category, Post, PostPayload, PublishedPost};
