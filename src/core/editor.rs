//! # Post Editor Form State
//!
//! A draft post edited field by field and submitted as a whole.
//!
//! ```text
//! PostEditor
//! ├── mode: EditorMode          // Create, or Update { post_id }
//! ├── draft: DraftPost          // title, category, image, content
//! ├── selected_file: PathBuf?   // image chosen for upload
//! ├── upload: UploadState       // Idle | InProgress(%) | Failed(msg)
//! ├── publish_error: String?    // last create/update/load failure
//! ├── loaded: bool              // update mode: existing record arrived
//! └── submitting: bool          // create/update request in flight
//! ```
//!
//! Two rules are enforced here rather than in the view: only one upload at
//! a time, and no submit while an upload is running.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::content::{Category, Post, PostPayload, PublishedPost, UploadProgress};
use crate::core::embed::{embed_url, file_link_fragment, video_fragment};
use crate::core::session::Session;

pub const UPLOAD_FAILED_MESSAGE: &str = "Image upload failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    /// Transfer running, 0..=100 percent.
    InProgress(u8),
    Failed(String),
}

impl UploadState {
    pub fn progress(&self) -> Option<u8> {
        match self {
            UploadState::InProgress(p) => Some(*p),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UploadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Update { post_id: String },
}

/// The in-memory post being authored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftPost {
    /// Server-assigned, absent until the first successful create.
    pub id: Option<String>,
    pub slug: Option<String>,
    pub title: String,
    pub category: Category,
    pub image: Option<String>,
    pub content: String,
}

impl DraftPost {
    pub fn payload(&self) -> PostPayload {
        PostPayload {
            title: self.title.clone(),
            content: self.content.clone(),
            category: self.category,
            image: self.image.clone(),
        }
    }
}

impl From<Post> for DraftPost {
    fn from(post: Post) -> Self {
        Self {
            id: Some(post.id),
            slug: post.slug,
            title: post.title,
            category: post.category,
            image: post.image,
            content: post.content,
        }
    }
}

/// Local reasons a form action was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    NoFileSelected,
    UploadInProgress,
    AlreadySubmitting,
    MissingTitle,
    NotLoaded,
    MissingIdentity,
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::NoFileSelected => write!(f, "Please select an image"),
            EditorError::UploadInProgress => write!(f, "Wait for the image upload to finish"),
            EditorError::AlreadySubmitting => write!(f, "Already publishing"),
            EditorError::MissingTitle => write!(f, "Title is required"),
            EditorError::NotLoaded => write!(f, "The post has not loaded yet"),
            EditorError::MissingIdentity => write!(f, "Sign in to update this post"),
        }
    }
}

impl std::error::Error for EditorError {}

/// A request the editor wants sent to the content API.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Create(PostPayload),
    Update {
        post_id: String,
        user_id: String,
        payload: PostPayload,
    },
}

pub struct PostEditor {
    mode: EditorMode,
    draft: DraftPost,
    selected_file: Option<PathBuf>,
    upload: UploadState,
    publish_error: Option<String>,
    loaded: bool,
    submitting: bool,
}

impl PostEditor {
    pub fn new(mode: EditorMode) -> Self {
        let loaded = matches!(mode, EditorMode::Create);
        Self {
            mode,
            draft: DraftPost::default(),
            selected_file: None,
            upload: UploadState::Idle,
            publish_error: None,
            loaded,
            submitting: false,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn draft(&self) -> &DraftPost {
        &self.draft
    }

    pub fn upload(&self) -> &UploadState {
        &self.upload
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    pub fn publish_error(&self) -> Option<&str> {
        self.publish_error.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // -- field edits -------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.draft.category = category;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn select_file(&mut self, path: Option<PathBuf>) {
        self.selected_file = path;
    }

    // -- loading (update mode) ---------------------------------------------

    /// Replace the draft with the stored record.
    pub fn load_existing(&mut self, post: Post) {
        info!("Loaded post {} for editing", post.id);
        self.draft = DraftPost::from(post);
        self.loaded = true;
        self.publish_error = None;
    }

    pub fn fail_load(&mut self, message: String) {
        warn!("Failed to load post: {}", message);
        self.publish_error = Some(message);
    }

    // -- image upload ------------------------------------------------------

    /// The upload control is disabled while a transfer is running.
    pub fn upload_enabled(&self) -> bool {
        self.upload.progress().is_none()
    }

    /// Start an upload of the selected file. Returns the path to transfer.
    pub fn begin_upload(&mut self) -> Result<PathBuf, EditorError> {
        if !self.upload_enabled() {
            return Err(EditorError::UploadInProgress);
        }
        let Some(path) = self.selected_file.clone() else {
            self.upload = UploadState::Failed(EditorError::NoFileSelected.to_string());
            return Err(EditorError::NoFileSelected);
        };
        self.upload = UploadState::InProgress(0);
        Ok(path)
    }

    /// Returns `false` when no upload is running (late event).
    pub fn upload_progress(&mut self, progress: UploadProgress) -> bool {
        if self.upload.progress().is_none() {
            return false;
        }
        self.upload = UploadState::InProgress(progress.percent());
        true
    }

    /// Merge the uploaded image URL into the draft.
    pub fn finish_upload(&mut self, url: String) -> bool {
        if self.upload.progress().is_none() {
            return false;
        }
        debug!("Image uploaded: {}", url);
        self.upload = UploadState::Idle;
        self.draft.image = Some(url);
        true
    }

    pub fn fail_upload(&mut self, reason: &str) -> bool {
        if self.upload.progress().is_none() {
            return false;
        }
        warn!("Image upload failed: {}", reason);
        self.upload = UploadState::Failed(UPLOAD_FAILED_MESSAGE.to_string());
        true
    }

    // -- embedding ---------------------------------------------------------

    /// Append a video player for `link`. Unsupported links leave the body
    /// untouched and are only logged.
    pub fn embed_video(&mut self, link: &str) -> bool {
        match embed_url(link) {
            Some(url) => {
                self.draft.content.push_str(&video_fragment(&url));
                true
            }
            None => {
                warn!("Unsupported video platform or invalid URL: {}", link);
                false
            }
        }
    }

    /// Append a download button for `link`.
    pub fn add_file_link(&mut self, link: &str) -> bool {
        if link.trim().is_empty() {
            return false;
        }
        self.draft.content.push_str(&file_link_fragment(link));
        true
    }

    // -- submit ------------------------------------------------------------

    fn check_submit(&self, session: &Session) -> Result<SubmitRequest, EditorError> {
        if !self.upload_enabled() {
            return Err(EditorError::UploadInProgress);
        }
        if self.submitting {
            return Err(EditorError::AlreadySubmitting);
        }
        if !self.loaded {
            return Err(EditorError::NotLoaded);
        }
        if self.draft.title.trim().is_empty() {
            return Err(EditorError::MissingTitle);
        }
        let payload = self.draft.payload();
        match &self.mode {
            EditorMode::Create => Ok(SubmitRequest::Create(payload)),
            EditorMode::Update { .. } => {
                let post_id = self.draft.id.clone().ok_or(EditorError::MissingIdentity)?;
                let user_id = session
                    .user_id()
                    .ok_or(EditorError::MissingIdentity)?
                    .to_string();
                Ok(SubmitRequest::Update {
                    post_id,
                    user_id,
                    payload,
                })
            }
        }
    }

    pub fn submit_enabled(&self, session: &Session) -> bool {
        self.check_submit(session).is_ok()
    }

    /// Build the create/update request and mark the form as submitting.
    pub fn submit(&mut self, session: &Session) -> Result<SubmitRequest, EditorError> {
        let request = self.check_submit(session)?;
        self.submitting = true;
        Ok(request)
    }

    /// Record the server's answer. Returns the post's location.
    ///
    /// After a create the draft carries the new id, so the next submit is an
    /// update of the same post.
    pub fn publish_succeeded(&mut self, published: PublishedPost) -> String {
        self.submitting = false;
        self.publish_error = None;
        if let Some(id) = published.id {
            if matches!(self.mode, EditorMode::Create) {
                self.mode = EditorMode::Update {
                    post_id: id.clone(),
                };
            }
            self.draft.id = Some(id);
        }
        let location = format!("/post/{}", published.slug);
        self.draft.slug = Some(published.slug);
        location
    }

    pub fn publish_failed(&mut self, message: String) {
        self.submitting = false;
        self.publish_error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::CurrentUser;

    fn signed_in() -> Session {
        Session::new(
            Some(CurrentUser {
                id: "u1".to_string(),
                username: None,
            }),
            None,
        )
    }

    fn existing_post() -> Post {
        Post {
            id: "p1".to_string(),
            user_id: Some("u1".to_string()),
            title: "A".to_string(),
            content: "<p>x</p>".to_string(),
            category: Category::Movies,
            image: Some("https://img.example.com/a.png".to_string()),
            slug: Some("a".to_string()),
        }
    }

    fn progress(done: u64, total: u64) -> UploadProgress {
        UploadProgress {
            bytes_transferred: done,
            total_bytes: total,
        }
    }

    #[test]
    fn test_create_submit_sends_whole_draft() {
        let mut editor = PostEditor::new(EditorMode::Create);
        editor.set_title("New post");
        editor.set_category(Category::Anime);
        editor.set_content("<p>body</p>");

        let request = editor.submit(&Session::anonymous()).unwrap();
        assert_eq!(
            request,
            SubmitRequest::Create(PostPayload {
                title: "New post".to_string(),
                content: "<p>body</p>".to_string(),
                category: Category::Anime,
                image: None,
            })
        );
        assert!(editor.is_submitting());
    }

    #[test]
    fn test_update_without_edits_resends_loaded_fields() {
        let mut editor = PostEditor::new(EditorMode::Update {
            post_id: "p1".to_string(),
        });
        editor.load_existing(existing_post());

        match editor.submit(&signed_in()).unwrap() {
            SubmitRequest::Update {
                post_id,
                user_id,
                payload,
            } => {
                assert_eq!(post_id, "p1");
                assert_eq!(user_id, "u1");
                assert_eq!(payload.title, "A");
                assert_eq!(payload.category, Category::Movies);
                assert_eq!(payload.content, "<p>x</p>");
                assert_eq!(
                    payload.image.as_deref(),
                    Some("https://img.example.com/a.png")
                );
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_update_requires_record_and_user() {
        let mut editor = PostEditor::new(EditorMode::Update {
            post_id: "p1".to_string(),
        });
        assert_eq!(editor.submit(&signed_in()), Err(EditorError::NotLoaded));

        editor.load_existing(existing_post());
        assert_eq!(
            editor.submit(&Session::anonymous()),
            Err(EditorError::MissingIdentity)
        );
        assert!(!editor.is_submitting());
        assert!(editor.submit_enabled(&signed_in()));
    }

    #[test]
    fn test_missing_title_is_refused() {
        let mut editor = PostEditor::new(EditorMode::Create);
        editor.set_title("   ");
        assert_eq!(
            editor.submit(&Session::anonymous()),
            Err(EditorError::MissingTitle)
        );
    }

    #[test]
    fn test_upload_without_file_sets_message() {
        let mut editor = PostEditor::new(EditorMode::Create);
        assert_eq!(editor.begin_upload(), Err(EditorError::NoFileSelected));
        assert_eq!(editor.upload().error(), Some("Please select an image"));
        assert!(editor.upload_enabled());
    }

    #[test]
    fn test_in_progress_upload_blocks_trigger_and_submit() {
        let mut editor = PostEditor::new(EditorMode::Create);
        editor.set_title("T");
        editor.select_file(Some(PathBuf::from("poster.png")));
        assert_eq!(editor.begin_upload(), Ok(PathBuf::from("poster.png")));
        assert_eq!(editor.upload().progress(), Some(0));

        assert!(!editor.upload_enabled());
        assert_eq!(editor.begin_upload(), Err(EditorError::UploadInProgress));
        assert_eq!(
            editor.submit(&Session::anonymous()),
            Err(EditorError::UploadInProgress)
        );
        assert!(!editor.is_submitting());
    }

    #[test]
    fn test_upload_progress_then_completion_merges_url() {
        let mut editor = PostEditor::new(EditorMode::Create);
        editor.select_file(Some(PathBuf::from("poster.png")));
        editor.begin_upload().unwrap();

        assert!(editor.upload_progress(progress(50, 200)));
        assert_eq!(editor.upload().progress(), Some(25));
        assert!(editor.upload_progress(progress(200, 200)));
        assert_eq!(editor.upload().progress(), Some(100));

        assert!(editor.finish_upload("https://cdn/x.png".to_string()));
        assert_eq!(editor.upload(), &UploadState::Idle);
        assert_eq!(editor.draft().image.as_deref(), Some("https://cdn/x.png"));
        assert!(editor.upload_enabled());
    }

    #[test]
    fn test_upload_failure_clears_progress() {
        let mut editor = PostEditor::new(EditorMode::Create);
        editor.select_file(Some(PathBuf::from("poster.png")));
        editor.begin_upload().unwrap();
        editor.upload_progress(progress(10, 100));

        assert!(editor.fail_upload("HTTP 403"));
        assert_eq!(editor.upload().progress(), None);
        assert_eq!(editor.upload().error(), Some(UPLOAD_FAILED_MESSAGE));
        assert!(editor.draft().image.is_none());
    }

    #[test]
    fn test_late_upload_events_are_ignored() {
        let mut editor = PostEditor::new(EditorMode::Create);
        assert!(!editor.upload_progress(progress(1, 2)));
        assert!(!editor.finish_upload("https://cdn/x.png".to_string()));
        assert!(!editor.fail_upload("late"));
        assert!(editor.draft().image.is_none());
    }

    #[test]
    fn test_embed_video_appends_fragment() {
        let mut editor = PostEditor::new(EditorMode::Create);
        editor.set_content("<p>intro</p>");
        assert!(editor.embed_video("https://www.youtube.com/watch?v=abc123"));
        assert!(editor
            .draft()
            .content
            .starts_with("<p>intro</p>\n<iframe"));
        assert!(editor
            .draft()
            .content
            .contains("https://www.youtube.com/embed/abc123"));

        assert!(editor.embed_video("https://vimeo.com/55555"));
        assert!(editor
            .draft()
            .content
            .contains("https://player.vimeo.com/video/55555"));
    }

    #[test]
    fn test_unsupported_embed_leaves_body() {
        let mut editor = PostEditor::new(EditorMode::Create);
        editor.set_content("<p>intro</p>");
        assert!(!editor.embed_video("https://example.com/x"));
        assert_eq!(editor.draft().content, "<p>intro</p>");
    }

    #[test]
    fn test_file_link_appends_button() {
        let mut editor = PostEditor::new(EditorMode::Create);
        assert!(editor.add_file_link("https://files.example.com/a.pdf"));
        assert!(editor.draft().content.contains("Download File"));
        assert!(!editor.add_file_link("  "));
    }

    #[test]
    fn test_create_success_switches_to_update() {
        let mut editor = PostEditor::new(EditorMode::Create);
        editor.set_title("T");
        editor.submit(&Session::anonymous()).unwrap();

        let location = editor.publish_succeeded(PublishedPost {
            id: Some("p9".to_string()),
            slug: "t".to_string(),
        });
        assert_eq!(location, "/post/t");
        assert!(!editor.is_submitting());
        assert_eq!(
            editor.mode(),
            &EditorMode::Update {
                post_id: "p9".to_string()
            }
        );
        assert_eq!(editor.draft().id.as_deref(), Some("p9"));
        assert_eq!(editor.draft().slug.as_deref(), Some("t"));
    }

    #[test]
    fn test_publish_failure_keeps_draft() {
        let mut editor = PostEditor::new(EditorMode::Create);
        editor.set_title("T");
        editor.set_content("<p>keep me</p>");
        editor.submit(&Session::anonymous()).unwrap();
        assert_eq!(
            editor.submit(&Session::anonymous()),
            Err(EditorError::AlreadySubmitting)
        );

        editor.publish_failed("Title already exists".to_string());
        assert_eq!(editor.publish_error(), Some("Title already exists"));
        assert_eq!(editor.draft().content, "<p>keep me</p>");
        assert!(editor.submit(&Session::anonymous()).is_ok());
    }
}
