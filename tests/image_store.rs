use bytes::Bytes;
use tempfile::tempdir;

use tinta::infra::uploads::{ImageStore, ImageStoreError};

#[tokio::test]
async fn save_sanitizes_name_and_persists_payload() {
    let dir = tempdir().expect("tempdir");
    let store = ImageStore::new(dir.path().join("posts"));

    let stored = store
        .save("My Cover Photo.PNG", Bytes::from_static(b"png-bytes"))
        .await
        .expect("save image");
    assert_eq!(stored, "my-cover-photo.png");

    let data = store.read(&stored).await.expect("read image back");
    assert_eq!(data, Bytes::from_static(b"png-bytes"));
}

#[tokio::test]
async fn save_overwrites_same_name() {
    let dir = tempdir().expect("tempdir");
    let store = ImageStore::new(dir.path().to_path_buf());

    store
        .save("cover.png", Bytes::from_static(b"first"))
        .await
        .expect("first save");
    store
        .save("cover.png", Bytes::from_static(b"second"))
        .await
        .expect("second save");

    let data = store.read("cover.png").await.expect("read image back");
    assert_eq!(data, Bytes::from_static(b"second"));
}

#[tokio::test]
async fn delete_missing_file_is_success() {
    let dir = tempdir().expect("tempdir");
    let store = ImageStore::new(dir.path().to_path_buf());

    store.delete("absent.png").await.expect("delete is idempotent");
}

#[tokio::test]
async fn stored_name_traversal_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let store = ImageStore::new(dir.path().to_path_buf());

    let err = store.read("../escape.png").await.unwrap_err();
    assert!(matches!(err, ImageStoreError::InvalidPath));

    let err = store.delete("/etc/passwd").await.unwrap_err();
    assert!(matches!(err, ImageStoreError::InvalidPath));
}
