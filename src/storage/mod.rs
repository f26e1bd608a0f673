// Temporary on-disk storage for uploads
//
// Each upload gets its own uniquely named file under the upload directory.
// The file is removed when its `TempUpload` is dropped, so every exit path
// of a request (success, validation failure, extraction or upstream error)
// reclaims the space.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Create an empty file for an upload named `original_name`.
    ///
    /// The original extension is kept (when it is a plain short token) so the
    /// artifact is recognisable on disk; the name itself is never reused.
    pub async fn create(dir: &Path, original_name: &str) -> io::Result<(Self, File)> {
        let mut file_name = Uuid::new_v4().to_string();
        if let Some(ext) = safe_extension(original_name) {
            file_name.push('.');
            file_name.push_str(&ext);
        }

        let path = dir.join(file_name);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        debug!(path = %path.display(), "Created temporary upload");

        Ok((Self { path }, file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path).await
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed temporary upload"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove temporary upload"),
        }
    }
}

fn safe_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
}
