use std::sync::Arc;

use crate::application::admin::posts::AdminPostService;
use crate::application::admin::users::AdminUserService;
use crate::application::auth::AuthService;
use crate::infra::db::PostgresRepositories;
use crate::infra::http::session::SessionSigner;

#[derive(Clone)]
pub struct AdminState {
    pub db: Arc<PostgresRepositories>,
    pub posts: Arc<AdminPostService>,
    pub users: Arc<AdminUserService>,
    pub auth: Arc<AuthService>,
    pub sessions: Arc<SessionSigner>,
    pub page_size: u32,
}
