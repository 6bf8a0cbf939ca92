mod dashboard;
mod forms;
mod posts;
pub(crate) mod shared;
mod state;
mod users;

pub use state::AdminState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

/// Routes behind the admin session gate. Paths keep their trailing slash;
/// the upload limit bounds multipart submissions on the post editor.
pub(super) fn admin_routes(upload_body_limit: usize) -> Router<AdminState> {
    Router::new()
        .route("/admin/", get(dashboard::admin_dashboard))
        .route("/admin/posts/", get(posts::admin_posts))
        .route(
            "/admin/post/",
            get(posts::admin_post_new).post(posts::admin_post_create),
        )
        .route(
            "/admin/post/{id}/",
            get(posts::admin_post_edit).post(posts::admin_post_update),
        )
        .route("/admin/post/delete/{id}/", post(posts::admin_post_delete))
        .route("/admin/users/", get(users::admin_users))
        .route(
            "/admin/user/{id}/",
            get(users::admin_user_edit).post(users::admin_user_update),
        )
        .route("/admin/user/delete/{id}/", post(users::admin_user_delete))
        .layer(DefaultBodyLimit::max(upload_body_limit))
}
