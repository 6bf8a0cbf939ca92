use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::admin::users::AdminUserError;
use crate::infra::http::middleware::CurrentUser;
use crate::infra::http::repo_error_to_http;
use crate::presentation::admin::views::{
    AdminChrome, AdminLayout, AdminUserFormView, AdminUserListView, AdminUserRowView,
    UserFormTemplate, UserListTemplate,
};
use crate::presentation::views::{render_not_found_response, render_template_response};

use super::AdminState;
use super::forms::UserAdminForm;

pub(crate) async fn admin_users(
    State(state): State<AdminState>,
    Extension(current): Extension<CurrentUser>,
) -> Response {
    let users = match state.users.list().await {
        Ok(users) => users,
        Err(err) => return admin_user_error("infra::http::admin::users::list", err),
    };

    let content = AdminUserListView {
        rows: users.iter().map(AdminUserRowView::from_record).collect(),
    };
    let view = AdminLayout::new(AdminChrome::new(current.name, "users"), content);
    render_template_response(UserListTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_user_edit(
    State(state): State<AdminState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Response {
    match state.users.find(id).await {
        Ok(Some(user)) => {
            let content = AdminUserFormView::for_user(&user);
            let view = AdminLayout::new(AdminChrome::new(current.name, "users"), content);
            render_template_response(UserFormTemplate { view }, StatusCode::OK)
        }
        Ok(None) => render_not_found_response(),
        Err(err) => admin_user_error("infra::http::admin::users::edit", err),
    }
}

pub(crate) async fn admin_user_update(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    Form(form): Form<UserAdminForm>,
) -> Response {
    match state.users.set_admin(id, form.is_admin()).await {
        Ok(_) => Redirect::to("/admin/users/").into_response(),
        Err(err) => admin_user_error("infra::http::admin::users::update", err),
    }
}

pub(crate) async fn admin_user_delete(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Response {
    match state.users.delete(id).await {
        Ok(()) => Redirect::to("/admin/users/").into_response(),
        Err(err) => admin_user_error("infra::http::admin::users::delete", err),
    }
}

fn admin_user_error(source: &'static str, err: AdminUserError) -> Response {
    match err {
        AdminUserError::NotFound => render_not_found_response(),
        AdminUserError::Repo(repo) => repo_error_to_http(source, repo).into_response(),
    }
}
