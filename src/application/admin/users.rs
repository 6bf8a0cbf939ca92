use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::repos::{RepoError, UsersRepo};
use crate::domain::entities::UserRecord;

#[derive(Debug, Error)]
pub enum AdminUserError {
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct AdminUserService {
    repo: Arc<dyn UsersRepo>,
}

impl AdminUserService {
    pub fn new(repo: Arc<dyn UsersRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<UserRecord>, AdminUserError> {
        self.repo.list_users().await.map_err(AdminUserError::from)
    }

    pub async fn count(&self) -> Result<u64, AdminUserError> {
        self.repo.count_users().await.map_err(AdminUserError::from)
    }

    pub async fn find(&self, id: i64) -> Result<Option<UserRecord>, AdminUserError> {
        self.repo.find_user(id).await.map_err(AdminUserError::from)
    }

    /// Persist a new admin-flag value for an existing user.
    ///
    /// There is deliberately no self-demotion guard: an admin may clear their
    /// own flag, mirroring the user-management contract.
    pub async fn set_admin(&self, id: i64, is_admin: bool) -> Result<UserRecord, AdminUserError> {
        let user = self
            .repo
            .update_user_admin(id, is_admin)
            .await
            .map_err(not_found_or_repo)?;

        info!(
            target = "tinta::admin::users",
            user_id = id,
            is_admin = is_admin,
            "updated admin flag"
        );
        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AdminUserError> {
        if self.repo.find_user(id).await?.is_none() {
            return Err(AdminUserError::NotFound);
        }

        self.repo.delete_user(id).await?;
        info!(target = "tinta::admin::users", user_id = id, "deleted user");
        Ok(())
    }
}

fn not_found_or_repo(err: RepoError) -> AdminUserError {
    match err {
        RepoError::NotFound => AdminUserError::NotFound,
        other => AdminUserError::Repo(other),
    }
}
