use axum::{
    Extension,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::admin::posts::{AdminPostError, CreatePostCommand, UpdatePostCommand};
use crate::application::error::HttpError;
use crate::infra::http::middleware::CurrentUser;
use crate::infra::http::repo_error_to_http;
use crate::presentation::admin::views::{
    AdminChrome, AdminLayout, AdminPostFormView, AdminPostListView, AdminPostRowView,
    PostFormTemplate, PostListTemplate,
};
use crate::presentation::views::{render_not_found_response, render_template_response};

use super::AdminState;
use super::forms::{FormReadError, PostForm};
use super::shared::PageQuery;

pub(crate) async fn admin_posts(
    State(state): State<AdminState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = match state.posts.page(query.page(), state.page_size).await {
        Ok(page) => page,
        Err(err) => return admin_post_error("infra::http::admin::posts::list", err),
    };

    let content = AdminPostListView {
        rows: page.posts.iter().map(AdminPostRowView::from_record).collect(),
        page: page.page,
        page_count: page.page_count,
        total: page.total,
        previous_page: (page.page > 1).then(|| page.page - 1),
        next_page: (page.page < page.page_count).then(|| page.page + 1),
    };
    let view = AdminLayout::new(AdminChrome::new(current.name, "posts"), content);
    render_template_response(PostListTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_post_new(Extension(current): Extension<CurrentUser>) -> Response {
    render_post_form(current.name, AdminPostFormView::blank(), StatusCode::OK)
}

pub(crate) async fn admin_post_create(
    State(state): State<AdminState>,
    Extension(current): Extension<CurrentUser>,
    multipart: Multipart,
) -> Response {
    let form = match PostForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(err) => return form_read_error(err),
    };

    let errors = form.validate();
    if !errors.is_empty() {
        let mut view = AdminPostFormView::blank();
        view.title = form.title;
        view.content = form.content;
        view.errors = errors;
        return render_post_form(current.name, view, StatusCode::OK);
    }

    match state
        .posts
        .create(CreatePostCommand {
            author_id: current.id,
            title: form.title,
            content: form.content,
            image: form.image,
        })
        .await
    {
        Ok(_) => Redirect::to("/admin/posts/").into_response(),
        Err(err) => admin_post_error("infra::http::admin::posts::create", err),
    }
}

pub(crate) async fn admin_post_edit(
    State(state): State<AdminState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Response {
    match state.posts.find(id).await {
        Ok(Some(post)) => render_post_form(
            current.name,
            AdminPostFormView::for_post(&post),
            StatusCode::OK,
        ),
        Ok(None) => render_not_found_response(),
        Err(err) => admin_post_error("infra::http::admin::posts::edit", err),
    }
}

pub(crate) async fn admin_post_update(
    State(state): State<AdminState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Response {
    // Existence is checked before validation so a bad submission against
    // a missing id still 404s instead of re-rendering the form.
    let post = match state.posts.find(id).await {
        Ok(Some(post)) => post,
        Ok(None) => return render_not_found_response(),
        Err(err) => return admin_post_error("infra::http::admin::posts::update", err),
    };

    let form = match PostForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(err) => return form_read_error(err),
    };

    let errors = form.validate();
    if !errors.is_empty() {
        let view = AdminPostFormView {
            heading: "Edit post",
            action: format!("/admin/post/{id}/"),
            title: form.title,
            content: form.content,
            current_image: post.image_name,
            errors,
        };
        return render_post_form(current.name, view, StatusCode::OK);
    }

    match state
        .posts
        .update(UpdatePostCommand {
            id,
            title: form.title,
            content: form.content,
            image: form.image,
        })
        .await
    {
        Ok(_) => Redirect::to("/admin/posts/").into_response(),
        Err(err) => admin_post_error("infra::http::admin::posts::update", err),
    }
}

pub(crate) async fn admin_post_delete(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Response {
    match state.posts.delete(id).await {
        Ok(()) => Redirect::to("/admin/posts/").into_response(),
        Err(err) => admin_post_error("infra::http::admin::posts::delete", err),
    }
}

fn render_post_form(user_name: String, content: AdminPostFormView, status: StatusCode) -> Response {
    let view = AdminLayout::new(AdminChrome::new(user_name, "posts"), content);
    render_template_response(PostFormTemplate { view }, status)
}

fn form_read_error(err: FormReadError) -> Response {
    HttpError::from_error(
        "infra::http::admin::posts::form",
        StatusCode::BAD_REQUEST,
        "Malformed form submission",
        &err,
    )
    .into_response()
}

fn admin_post_error(source: &'static str, err: AdminPostError) -> Response {
    match err {
        AdminPostError::NotFound => render_not_found_response(),
        AdminPostError::Invalid(domain) => HttpError::from_error(
            source,
            StatusCode::BAD_REQUEST,
            "Request could not be processed",
            &domain,
        )
        .into_response(),
        AdminPostError::Storage(storage) => HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Image storage failed",
            &storage,
        )
        .into_response(),
        AdminPostError::Repo(repo) => repo_error_to_http(source, repo).into_response(),
    }
}
