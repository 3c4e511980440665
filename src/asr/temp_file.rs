use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Prefix shared by every staged upload.
pub const TEMP_AUDIO_PREFIX: &str = "audio-";

/// An uploaded clip staged on disk for the duration of one request.
///
/// The file is removed when the guard is dropped, on success, on error and
/// when the owning future is cancelled.
#[derive(Debug)]
pub struct TempAudioFile {
    path: PathBuf,
}

impl TempAudioFile {
    /// `audio-<unix millis>-<uuid>.<extension>` inside `dir`
    pub fn unique_path(dir: &Path, extension: &str) -> PathBuf {
        let millis = chrono::Utc::now().timestamp_millis();
        dir.join(format!(
            "{}{}-{}.{}",
            TEMP_AUDIO_PREFIX,
            millis,
            Uuid::new_v4().simple(),
            extension
        ))
    }

    /// Write `bytes` to a fresh path in `dir`. The write completes before this returns.
    pub async fn create(dir: &Path, extension: &str, bytes: &[u8]) -> std::io::Result<Self> {
        // Guard first so a partial write is cleaned up too
        let file = Self {
            path: Self::unique_path(dir, extension),
        };
        tokio::fs::write(&file.path, bytes).await?;
        debug!("Staged {} bytes at {}", bytes.len(), file.path.display());
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudioFile {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed temp audio file: {}", self.path.display()),
            Err(e) => warn!(
                "Failed to remove temp audio file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
