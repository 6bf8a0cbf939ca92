//! Filesystem storage for post images.

use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use slug::slugify;
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};

/// Errors that can occur while interacting with the image storage backend.
#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("invalid stored image name")]
    InvalidPath,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed image storage rooted at the configured images directory.
#[derive(Debug)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sanitize the client-supplied filename, ensure the target directory
    /// exists, and write the payload. Returns the stored filename.
    ///
    /// Writes are not atomic; a concurrent save under the same sanitized
    /// name last-writer-wins.
    pub async fn save(&self, original_name: &str, data: Bytes) -> Result<String, ImageStoreError> {
        let filename = sanitize_filename(original_name);
        let absolute = self.resolve(&filename)?;

        fs::create_dir_all(&self.root).await?;

        let mut file = fs::File::create(&absolute).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        Ok(filename)
    }

    /// Read a stored image back into memory.
    pub async fn read(&self, stored_name: &str) -> Result<Bytes, ImageStoreError> {
        let absolute = self.resolve(stored_name)?;
        let data = fs::read(absolute).await?;
        Ok(Bytes::from(data))
    }

    /// Remove a stored image. Missing files are treated as success.
    pub async fn delete(&self, stored_name: &str) -> Result<(), ImageStoreError> {
        let absolute = self.resolve(stored_name)?;
        match fs::remove_file(&absolute).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ImageStoreError::Io(err)),
        }
    }

    /// Resolve the absolute filesystem path for a stored image, rejecting
    /// traversal outside the root.
    fn resolve(&self, stored_name: &str) -> Result<PathBuf, ImageStoreError> {
        let relative = Path::new(stored_name);
        if relative.is_absolute()
            || relative
                .components()
                .any(|component| matches!(component, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(ImageStoreError::InvalidPath);
        }

        Ok(self.root.join(relative))
    }
}

/// Reduce a client filename to a safe stem plus lowercased extension.
pub fn sanitize_filename(original: &str) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("image");
    let mut base = slugify(stem);
    if base.is_empty() {
        base = "image".to_string();
    }

    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.trim_matches('.').to_ascii_lowercase())
        .filter(|value| !value.is_empty());

    match extension {
        Some(ext) => format!("{base}.{ext}"),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_filename;

    #[test]
    fn sanitize_slugifies_stem_and_lowercases_extension() {
        assert_eq!(sanitize_filename("My Holiday Photo.JPG"), "my-holiday-photo.jpg");
        assert_eq!(sanitize_filename("árbol.png"), "arbol.png");
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd.png"), "passwd.png");
        assert_eq!(sanitize_filename("/tmp/shot.png"), "shot.png");
    }

    #[test]
    fn sanitize_handles_degenerate_names() {
        assert_eq!(sanitize_filename("...."), "image");
        assert_eq!(sanitize_filename(""), "image");
    }
}
