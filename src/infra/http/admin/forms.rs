//! Form payloads and field validation for the admin panel.

use axum::extract::multipart::{Multipart, MultipartError};
use serde::Deserialize;
use thiserror::Error;

use crate::application::admin::posts::UploadedImage;
use crate::domain::posts::POST_TITLE_MAX_LEN;
use crate::presentation::admin::views::FieldErrorView;

pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];
const IMAGE_EXTENSION_MESSAGE: &str = "Only jpg or png images are allowed";

#[derive(Debug, Error)]
pub enum FormReadError {
    #[error("failed to read multipart form body: {0}")]
    Multipart(#[from] MultipartError),
}

/// Post editor submission, read from a multipart body.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub image: Option<UploadedImage>,
}

impl PostForm {
    /// Read the `title`, `content` and `post_image` parts. A file part with
    /// an empty filename or empty payload counts as "no file submitted",
    /// which is what browsers send for an untouched file input.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, FormReadError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("title") => form.title = field.text().await?,
                Some("content") => form.content = field.text().await?,
                Some("post_image") => {
                    let filename = field.file_name().map(str::to_string);
                    let data = field.bytes().await?;
                    if let Some(filename) = filename
                        && !filename.is_empty()
                        && !data.is_empty()
                    {
                        form.image = Some(UploadedImage { filename, data });
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn validate(&self) -> Vec<FieldErrorView> {
        let mut errors = Vec::new();

        if let Some(error) = required("title", &self.title) {
            errors.push(error);
        } else if let Some(error) = max_length("title", &self.title, POST_TITLE_MAX_LEN) {
            errors.push(error);
        }

        if let Some(image) = self.image.as_ref()
            && let Some(error) = allowed_file(
                "post_image",
                &image.filename,
                ALLOWED_IMAGE_EXTENSIONS,
                IMAGE_EXTENSION_MESSAGE,
            )
        {
            errors.push(error);
        }

        errors
    }
}

/// Reader comment submission. Nothing mounts this yet; the validation
/// contract is settled here next to the other forms.
#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    pub content: String,
}

impl CommentForm {
    pub fn validate(&self) -> Vec<FieldErrorView> {
        required("content", &self.content).into_iter().collect()
    }
}

/// Admin-flag submission for the user editor. Browsers omit unchecked
/// checkboxes entirely, so absence of the field means `false`.
#[derive(Debug, Default, Deserialize)]
pub struct UserAdminForm {
    #[serde(default)]
    is_admin: Option<String>,
}

impl UserAdminForm {
    pub fn is_admin(&self) -> bool {
        self.is_admin.is_some()
    }
}

fn required(field: &'static str, value: &str) -> Option<FieldErrorView> {
    value.trim().is_empty().then(|| FieldErrorView {
        field,
        message: "This field is required.".to_string(),
    })
}

fn max_length(field: &'static str, value: &str, limit: usize) -> Option<FieldErrorView> {
    (value.trim().chars().count() > limit).then(|| FieldErrorView {
        field,
        message: format!("Field cannot be longer than {limit} characters."),
    })
}

fn allowed_file(
    field: &'static str,
    filename: &str,
    allowed: &[&str],
    message: &str,
) -> Option<FieldErrorView> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    let permitted = extension
        .as_deref()
        .is_some_and(|ext| allowed.contains(&ext));

    (!permitted).then(|| FieldErrorView {
        field,
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn form_with(title: &str, image: Option<&str>) -> PostForm {
        PostForm {
            title: title.to_string(),
            content: "body".to_string(),
            image: image.map(|filename| UploadedImage {
                filename: filename.to_string(),
                data: Bytes::from_static(b"\x89PNG"),
            }),
        }
    }

    #[test]
    fn blank_title_is_required() {
        let errors = form_with("   ", None).validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[0].message, "This field is required.");
    }

    #[test]
    fn overlong_title_is_rejected() {
        let errors = form_with(&"x".repeat(129), None).validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Field cannot be longer than 128 characters."
        );
    }

    #[test]
    fn title_at_limit_passes() {
        assert!(form_with(&"x".repeat(128), None).validate().is_empty());
    }

    #[test]
    fn image_extension_allow_list() {
        assert!(form_with("Hello", Some("photo.jpg")).validate().is_empty());
        assert!(form_with("Hello", Some("photo.PNG")).validate().is_empty());

        let errors = form_with("Hello", Some("script.gif")).validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "post_image");
        assert_eq!(errors[0].message, "Only jpg or png images are allowed");

        let errors = form_with("Hello", Some("no-extension")).validate();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn comment_content_is_required() {
        let blank = CommentForm {
            content: "   ".to_string(),
        };
        let errors = blank.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "content");
        assert_eq!(errors[0].message, "This field is required.");

        let filled = CommentForm {
            content: "Nice post!".to_string(),
        };
        assert!(filled.validate().is_empty());
    }

    #[test]
    fn checkbox_presence_maps_to_bool() {
        let checked = UserAdminForm {
            is_admin: Some("on".to_string()),
        };
        assert!(checked.is_admin());
        assert!(!UserAdminForm::default().is_admin());
    }
}
