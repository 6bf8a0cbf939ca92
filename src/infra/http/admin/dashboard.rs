use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::infra::http::middleware::CurrentUser;
use crate::presentation::admin::views::{
    AdminChrome, AdminDashboardView, AdminLayout, DashboardTemplate,
};
use crate::presentation::views::render_template_response;

use super::AdminState;
use super::shared::service_unavailable;

pub(crate) async fn admin_dashboard(
    State(state): State<AdminState>,
    Extension(current): Extension<CurrentUser>,
) -> Response {
    let post_count = match state.posts.count().await {
        Ok(count) => count,
        Err(err) => {
            return service_unavailable("infra::http::admin::dashboard", &err).into_response();
        }
    };
    let user_count = match state.users.count().await {
        Ok(count) => count,
        Err(err) => {
            return service_unavailable("infra::http::admin::dashboard", &err).into_response();
        }
    };

    let content = AdminDashboardView {
        post_count,
        user_count,
    };
    let view = AdminLayout::new(AdminChrome::new(current.name, "dashboard"), content);
    render_template_response(DashboardTemplate { view }, StatusCode::OK)
}
