use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use crate::domain::entities::PostRecord;
use crate::domain::error::DomainError;
use crate::domain::posts::PostDraft;
use crate::infra::uploads::{ImageStore, ImageStoreError};

#[derive(Debug, Error)]
pub enum AdminPostError {
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error(transparent)]
    Storage(#[from] ImageStoreError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Image payload accompanying a post submission.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub image: Option<UploadedImage>,
}

#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image: Option<UploadedImage>,
}

/// A single page of the admin post listing.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<PostRecord>,
    pub page: u32,
    pub page_count: u32,
    pub total: u64,
}

#[derive(Clone)]
pub struct AdminPostService {
    repo: Arc<dyn PostsRepo>,
    images: Arc<ImageStore>,
}

impl AdminPostService {
    pub fn new(repo: Arc<dyn PostsRepo>, images: Arc<ImageStore>) -> Self {
        Self { repo, images }
    }

    pub async fn page(&self, page: u32, page_size: u32) -> Result<PostPage, AdminPostError> {
        let page = page.max(1);
        let total = self.repo.count_posts().await?;
        let page_count = (total.div_ceil(u64::from(page_size)) as u32).max(1);
        let page = page.min(page_count);

        let limit = i64::from(page_size);
        let offset = i64::from(page - 1) * limit;
        let posts = self.repo.list_posts(limit, offset).await?;

        Ok(PostPage {
            posts,
            page,
            page_count,
            total,
        })
    }

    pub async fn count(&self) -> Result<u64, AdminPostError> {
        self.repo.count_posts().await.map_err(AdminPostError::from)
    }

    pub async fn find(&self, id: i64) -> Result<Option<PostRecord>, AdminPostError> {
        self.repo.find_post(id).await.map_err(AdminPostError::from)
    }

    pub async fn create(&self, command: CreatePostCommand) -> Result<PostRecord, AdminPostError> {
        let draft = PostDraft::new(command.title, command.content)?;
        let image_name = self.store_image(command.image).await?;

        let (title, content) = draft.into_parts();
        let post = self
            .repo
            .create_post(CreatePostParams {
                user_id: command.author_id,
                title,
                content,
                image_name,
            })
            .await?;

        info!(
            target = "tinta::admin::posts",
            post_id = post.id,
            title = %post.title,
            "created post"
        );
        Ok(post)
    }

    /// Update an existing post. The image reference is replaced outright:
    /// a submission without a file clears any stored image name.
    pub async fn update(&self, command: UpdatePostCommand) -> Result<PostRecord, AdminPostError> {
        let draft = PostDraft::new(command.title, command.content)?;
        let image_name = self.store_image(command.image).await?;

        let (title, content) = draft.into_parts();
        let post = self
            .repo
            .update_post(UpdatePostParams {
                id: command.id,
                title,
                content,
                image_name,
            })
            .await
            .map_err(not_found_or_repo)?;

        info!(target = "tinta::admin::posts", post_id = post.id, "updated post");
        Ok(post)
    }

    /// Delete a post by identity. The stored image, if any, is left in place.
    pub async fn delete(&self, id: i64) -> Result<(), AdminPostError> {
        if self.repo.find_post(id).await?.is_none() {
            return Err(AdminPostError::NotFound);
        }

        self.repo.delete_post(id).await?;
        info!(target = "tinta::admin::posts", post_id = id, "deleted post");
        Ok(())
    }

    async fn store_image(
        &self,
        image: Option<UploadedImage>,
    ) -> Result<Option<String>, AdminPostError> {
        match image {
            Some(image) => {
                let stored = self.images.save(&image.filename, image.data).await?;
                Ok(Some(stored))
            }
            None => Ok(None),
        }
    }
}

fn not_found_or_repo(err: RepoError) -> AdminPostError {
    match err {
        RepoError::NotFound => AdminPostError::NotFound,
        other => AdminPostError::Repo(other),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use time::OffsetDateTime;

    use crate::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};

    use super::*;

    #[derive(Default)]
    struct MemPosts {
        rows: Mutex<Vec<PostRecord>>,
    }

    impl MemPosts {
        fn next_id(rows: &[PostRecord]) -> i64 {
            rows.iter().map(|row| row.id).max().unwrap_or(0) + 1
        }
    }

    #[async_trait]
    impl PostsRepo for MemPosts {
        async fn list_posts(&self, limit: i64, offset: i64) -> Result<Vec<PostRecord>, RepoError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.id.cmp(&a.id));
            Ok(rows
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }

        async fn count_posts(&self) -> Result<u64, RepoError> {
            Ok(self.rows.lock().unwrap().len() as u64)
        }

        async fn find_post(&self, id: i64) -> Result<Option<PostRecord>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|row| row.id == id)
                .cloned())
        }

        async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let now = OffsetDateTime::now_utc();
            let post = PostRecord {
                id: Self::next_id(&rows),
                user_id: params.user_id,
                title: params.title,
                content: params.content,
                image_name: params.image_name,
                created_at: now,
                updated_at: now,
            };
            rows.push(post.clone());
            Ok(post)
        }

        async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|row| row.id == params.id)
                .ok_or(RepoError::NotFound)?;
            row.title = params.title;
            row.content = params.content;
            row.image_name = params.image_name;
            row.updated_at = OffsetDateTime::now_utc();
            Ok(row.clone())
        }

        async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
            self.rows.lock().unwrap().retain(|row| row.id != id);
            Ok(())
        }
    }

    fn service() -> (Arc<MemPosts>, AdminPostService) {
        let repo = Arc::new(MemPosts::default());
        let images = Arc::new(ImageStore::new(
            std::env::temp_dir().join("tinta-post-service-tests"),
        ));
        (repo.clone(), AdminPostService::new(repo, images))
    }

    fn command(title: &str) -> CreatePostCommand {
        CreatePostCommand {
            author_id: 1,
            title: title.to_string(),
            content: "body".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn overlong_title_is_rejected_and_not_persisted() {
        let (repo, service) = service();

        let err = service.create(command(&"x".repeat(129))).await.unwrap_err();
        assert!(matches!(err, AdminPostError::Invalid(_)));
        assert_eq!(repo.count_posts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_of_missing_post_is_not_found() {
        let (_, service) = service();

        let err = service
            .update(UpdatePostCommand {
                id: 42,
                title: "Title".to_string(),
                content: String::new(),
                image: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AdminPostError::NotFound));
    }

    #[tokio::test]
    async fn delete_of_missing_post_is_not_found() {
        let (_, service) = service();
        let err = service.delete(42).await.unwrap_err();
        assert!(matches!(err, AdminPostError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let (_, service) = service();

        let post = service.create(command("Keep me")).await.expect("create");
        service.delete(post.id).await.expect("delete");
        assert!(service.find(post.id).await.expect("find").is_none());
    }

    #[tokio::test]
    async fn page_is_clamped_to_the_last_page() {
        let (_, service) = service();
        for n in 0..4 {
            service.create(command(&format!("Post {n}"))).await.expect("create");
        }

        let page = service.page(99, 3).await.expect("page");
        assert_eq!(page.page_count, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 4);
        assert_eq!(page.posts.len(), 1);
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let (_, service) = service();
        service.create(command("First")).await.expect("create");
        service.create(command("Second")).await.expect("create");

        let page = service.page(1, 3).await.expect("page");
        assert_eq!(page.posts[0].title, "Second");
        assert_eq!(page.posts[1].title, "First");
    }
}
