//! The upload workflow: read, store the document, then index it.
//!
//! Steps run strictly in order and each is awaited before the next. A
//! failure stops the remaining steps; a document stored before a failed
//! index update stays in the store without an index entry. Abandoning is
//! checked between steps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{check_size, generate_id, parse_hashtags, sanitize_filename, validate_pdf_name};
use super::GalleryBackend;
use crate::compose::{ComposeInput, ComposeOptions, Composer};
use crate::error::{Error, Result};
use crate::model::{GalleryIndex, IndexEntry};
use crate::store::encode_content;

/// Where the workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    /// Not started
    Idle,
    /// Reading or composing the document
    Reading,
    /// Sending the document to the store
    UploadingFile,
    /// Adding the index entry
    UpdatingIndex,
    /// Finished successfully
    Done,
    /// Stopped by an error
    Failed,
    /// Stopped on request
    Abandoned,
}

impl UploadState {
    /// Check if the workflow can no longer change state.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            UploadState::Done | UploadState::Failed | UploadState::Abandoned
        )
    }
}

/// A progress report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    /// State at the time of the report
    pub state: UploadState,
    /// Completion percentage, when known
    pub percent: Option<u8>,
    /// Human-readable status line
    pub message: String,
}

impl UploadProgress {
    fn new(state: UploadState, percent: Option<u8>, message: impl Into<String>) -> Self {
        Self {
            state,
            percent,
            message: message.into(),
        }
    }
}

/// The document being uploaded.
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// An existing PDF file
    File {
        /// Original file name
        name: String,
        /// File content
        bytes: Vec<u8>,
    },
    /// A document composed from text
    Compose(ComposeInput),
}

/// Everything the user filled in.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// The document
    pub source: UploadSource,
    /// Author field; blank means anonymous
    pub author: String,
    /// Raw comma-separated hashtag field
    pub hashtags: String,
    /// Adult content flag
    pub is_18_plus: bool,
}

impl UploadRequest {
    /// Upload an existing PDF file.
    pub fn file(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(UploadSource::File {
            name: name.into(),
            bytes,
        })
    }

    /// Compose and upload a document.
    pub fn compose(input: ComposeInput) -> Self {
        Self::new(UploadSource::Compose(input))
    }

    fn new(source: UploadSource) -> Self {
        Self {
            source,
            author: String::new(),
            hashtags: String::new(),
            is_18_plus: false,
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the raw hashtag field.
    pub fn with_hashtags(mut self, hashtags: impl Into<String>) -> Self {
        self.hashtags = hashtags.into();
        self
    }

    /// Flag the document as adult content.
    pub fn adult(mut self, is_18_plus: bool) -> Self {
        self.is_18_plus = is_18_plus;
        self
    }
}

/// Result of a finished upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Path of the stored document
    pub path: String,
    /// Entry added to the index
    pub entry: IndexEntry,
    /// Index after the update
    pub index: GalleryIndex,
}

/// Requests that a running workflow stop at the next step boundary.
#[derive(Debug, Clone, Default)]
pub struct AbandonHandle(Arc<AtomicBool>);

impl AbandonHandle {
    /// Ask the workflow to stop.
    pub fn abandon(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check if stopping was requested.
    pub fn is_abandoned(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

type Observer = Box<dyn FnMut(&UploadProgress) + Send>;

/// Runs uploads against a gallery backend.
pub struct UploadWorkflow<B> {
    backend: B,
    composer: Composer,
    state: UploadState,
    history: Vec<UploadProgress>,
    abandon: AbandonHandle,
    observer: Option<Observer>,
}

impl<B: GalleryBackend> UploadWorkflow<B> {
    /// Create a workflow with default compose options.
    pub fn new(backend: B) -> Self {
        Self::with_compose_options(backend, ComposeOptions::default())
    }

    /// Create a workflow with explicit compose options.
    pub fn with_compose_options(backend: B, options: ComposeOptions) -> Self {
        Self {
            backend,
            composer: Composer::new(options),
            state: UploadState::Idle,
            history: Vec::new(),
            abandon: AbandonHandle::default(),
            observer: None,
        }
    }

    /// Call `observer` on every progress report.
    pub fn with_observer(mut self, observer: impl FnMut(&UploadProgress) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Handle for abandoning the upload from elsewhere.
    pub fn abandon_handle(&self) -> AbandonHandle {
        self.abandon.clone()
    }

    /// Get the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current state.
    pub fn state(&self) -> UploadState {
        self.state
    }

    /// Latest progress report.
    pub fn progress(&self) -> Option<&UploadProgress> {
        self.history.last()
    }

    /// Every progress report so far, oldest first.
    pub fn history(&self) -> &[UploadProgress] {
        &self.history
    }

    /// Run an upload to completion, stamping the entry with the current time.
    pub async fn run(&mut self, request: UploadRequest) -> Result<UploadOutcome> {
        self.run_at(request, Utc::now()).await
    }

    /// Run an upload with an explicit upload date.
    pub async fn run_at(
        &mut self,
        request: UploadRequest,
        upload_date: DateTime<Utc>,
    ) -> Result<UploadOutcome> {
        if !matches!(self.state, UploadState::Idle) {
            return Err(Error::InvalidInput("Upload already started".to_string()));
        }

        match self.steps(request, upload_date).await {
            Ok(outcome) => {
                self.report(UploadState::Done, Some(100), "Done! The file is in the archive.");
                Ok(outcome)
            }
            Err(Error::Abandoned) => {
                self.report(UploadState::Abandoned, None, "Upload abandoned.");
                Err(Error::Abandoned)
            }
            Err(e) => {
                log::warn!("Upload failed: {}", e);
                self.report(UploadState::Failed, None, format!("Error: {}", e));
                Err(e)
            }
        }
    }

    async fn steps(
        &mut self,
        request: UploadRequest,
        upload_date: DateTime<Utc>,
    ) -> Result<UploadOutcome> {
        self.report(UploadState::Reading, Some(10), "Reading file...");
        let (filename, bytes) = self.read_source(request.source)?;
        check_size(bytes.len())?;
        let content_base64 = encode_content(&bytes);
        self.checkpoint()?;

        self.report(UploadState::UploadingFile, Some(25), "Uploading PDF...");
        let path = self.backend.upload_pdf(&filename, &content_base64).await?;
        self.report(UploadState::UploadingFile, Some(50), "PDF stored.");
        self.checkpoint()?;

        self.report(UploadState::UpdatingIndex, Some(75), "Adding entry to the index...");
        let entry = IndexEntry::new(generate_id(), filename, upload_date)
            .with_author(request.author)
            .with_hashtags(parse_hashtags(&request.hashtags))
            .adult(request.is_18_plus);
        let index = self.backend.update_index(entry.clone()).await?;

        log::info!("Uploaded {} as {}", path, entry.id);
        Ok(UploadOutcome { path, entry, index })
    }

    fn read_source(&self, source: UploadSource) -> Result<(String, Vec<u8>)> {
        match source {
            UploadSource::File { name, bytes } => {
                validate_pdf_name(&name)?;
                Ok((sanitize_filename(&name), bytes))
            }
            UploadSource::Compose(input) => {
                let document = self.composer.compose(&input)?;
                let name = format!("{}.pdf", input.title.trim());
                Ok((sanitize_filename(&name), document.bytes))
            }
        }
    }

    fn checkpoint(&self) -> Result<()> {
        if self.abandon.is_abandoned() {
            return Err(Error::Abandoned);
        }
        Ok(())
    }

    fn report(&mut self, state: UploadState, percent: Option<u8>, message: impl Into<String>) {
        let progress = UploadProgress::new(state, percent, message);
        log::debug!("{:?}: {}", state, progress.message);
        self.state = state;
        if let Some(observer) = self.observer.as_mut() {
            observer(&progress);
        }
        self.history.push(progress);
    }
}
