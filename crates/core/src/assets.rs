//! Uploaded image blobs on disk.
//!
//! Blobs live flat in a single directory and are addressed by generated
//! name. A listing references its blob by public URL (or bare name);
//! deleting the listing deletes the blob, best-effort, via
//! [`blob_name`] + [`AssetStore::remove`].

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::error::CoreError;

/// Upload size ceiling (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Public mount path under which blobs are served back.
pub const PUBLIC_MOUNT: &str = "/uploads";

/// Filesystem-backed store for uploaded image blobs.
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Open the blob directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            CoreError::Persistence(format!(
                "Failed to create uploads directory {}: {e}",
                root.display()
            ))
        })?;
        Ok(Self { root })
    }

    /// Directory the blobs live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store image content and return the generated blob name.
    ///
    /// Rejects non-image content types and payloads over
    /// [`MAX_IMAGE_BYTES`] before touching the filesystem.
    pub fn store(
        &self,
        content: &[u8],
        original_filename: &str,
        content_type: &str,
    ) -> Result<String, CoreError> {
        if !content_type.starts_with("image/") {
            return Err(CoreError::UnsupportedMediaType(content_type.to_string()));
        }

        let size = content.len() as u64;
        if size > MAX_IMAGE_BYTES {
            return Err(CoreError::PayloadTooLarge {
                size,
                limit: MAX_IMAGE_BYTES,
            });
        }

        let name = unique_name(original_filename);
        std::fs::write(self.root.join(&name), content)
            .map_err(|e| CoreError::Persistence(format!("Failed to write blob {name}: {e}")))?;

        Ok(name)
    }

    /// Delete the blob with `name`.
    ///
    /// Repeat deletion reports `NotFound`, which cascade callers treat
    /// as a no-op.
    pub fn remove(&self, name: &str) -> Result<(), CoreError> {
        let path = self.resolve(name).ok_or_else(|| not_found(name))?;

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(name)),
            Err(e) => Err(CoreError::Persistence(format!(
                "Failed to delete blob {name}: {e}"
            ))),
        }
    }

    /// Whether a blob with `name` currently exists.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|path| path.exists())
    }

    /// Map a blob name to its on-disk path. Names that could escape the
    /// blob directory never resolve.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return None;
        }
        Some(self.root.join(name))
    }
}

fn not_found(name: &str) -> CoreError {
    CoreError::NotFound {
        entity: "Image",
        id: name.to_string(),
    }
}

/// Generate `image-{millis}-{random}{.ext}`, carrying the extension over
/// from the original filename. Millisecond timestamp plus a random
/// suffix keeps concurrent uploads from colliding.
pub fn unique_name(original_filename: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    let ext = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("image-{millis}-{suffix}{ext}")
}

/// Extract the blob name from a listing's `image` reference.
///
/// Accepts an absolute URL whose path points under the public mount
/// (`.../uploads/<name>`) or a bare blob name. Foreign URLs yield
/// `None` so the cascade delete leaves them alone.
pub fn blob_name(reference: &str) -> Option<&str> {
    if let Some(idx) = reference.rfind(&format!("{PUBLIC_MOUNT}/")) {
        let name = &reference[idx + PUBLIC_MOUNT.len() + 1..];
        return (!name.is_empty() && !name.contains('/')).then_some(name);
    }

    (!reference.is_empty() && !reference.contains('/') && !reference.contains(':'))
        .then_some(reference)
}
