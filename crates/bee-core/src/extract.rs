use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bee_assistant::{Assistant, AssistantError, InlineFile};
use tokio::sync::Mutex;

use crate::state::Action;
use crate::store::Store;

/// File types the assistant can read words from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Jpeg,
    Png,
    Webp,
    Pdf,
}

impl FileKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(FileKind::Jpeg),
            "image/png" => Some(FileKind::Png),
            "image/webp" => Some(FileKind::Webp),
            "application/pdf" => Some(FileKind::Pdf),
            _ => None,
        }
    }

    /// Guess the kind from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(FileKind::Jpeg),
            "png" => Some(FileKind::Png),
            "webp" => Some(FileKind::Webp),
            "pdf" => Some(FileKind::Pdf),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileKind::Jpeg => "image/jpeg",
            FileKind::Png => "image/png",
            FileKind::Webp => "image/webp",
            FileKind::Pdf => "application/pdf",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("No words found in file")]
    NoWords,

    #[error("Assistant error: {0}")]
    Service(#[from] AssistantError),
}

impl ExtractError {
    pub fn user_message(&self) -> String {
        match self {
            ExtractError::UnsupportedType(_) => "Please pick a Picture or a PDF file! 📄🖼️",
            ExtractError::Read(_) => "Something went wrong reading the file.",
            ExtractError::NoWords => "I couldn't find any words in that file. Is it clear? 🤔",
            ExtractError::Service(_) => "AI is taking a nap. Try again later! 😴",
        }
        .to_string()
    }
}

/// A file picked by the user
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Read a file from disk, inferring its MIME type from the extension
    pub async fn read(path: &Path) -> Result<Self, ExtractError> {
        let mime_type = FileKind::from_path(path)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        // reject before reading anything large
        if FileKind::from_mime(&mime_type).is_none() {
            return Err(ExtractError::UnsupportedType(path.display().to_string()));
        }

        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    /// Validate the type and base64-encode the contents
    pub fn to_inline(&self) -> Result<InlineFile, ExtractError> {
        let kind = FileKind::from_mime(&self.mime_type)
            .ok_or_else(|| ExtractError::UnsupportedType(self.mime_type.clone()))?;

        Ok(InlineFile {
            mime_type: kind.mime_type().to_string(),
            data: STANDARD.encode(&self.bytes),
        })
    }
}

/// Read `path`, extract its words and add them to the list.
///
/// Any failure is also set as the store's error message.
pub async fn extract_file(
    store: &Mutex<Store>,
    assistant: &dyn Assistant,
    path: &Path,
) -> Result<Vec<String>, ExtractError> {
    let result = match UploadedFile::read(path).await {
        Ok(file) => extract_words(store, assistant, &file).await,
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        tracing::warn!("Extraction from {:?} failed: {}", path, e);
        store
            .lock()
            .await
            .dispatch(Action::SetError(Some(e.user_message())));
    }

    result
}

async fn extract_words(
    store: &Mutex<Store>,
    assistant: &dyn Assistant,
    file: &UploadedFile,
) -> Result<Vec<String>, ExtractError> {
    let inline = file.to_inline()?;
    store.lock().await.dispatch(Action::SetError(None));

    tracing::info!(
        "Extracting words from '{}' ({}, {} bytes)",
        file.name,
        inline.mime_type,
        file.bytes.len()
    );

    let words = match assistant.extract_words(&inline).await {
        Ok(words) => words,
        Err(AssistantError::MalformedResponse(reason)) => {
            tracing::warn!("Unparseable extraction result: {}", reason);
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    if words.is_empty() {
        return Err(ExtractError::NoWords);
    }

    let added = store.lock().await.add_words(words.clone());
    tracing::info!("Extracted {} words, {} new", words.len(), added);
    Ok(words)
}
