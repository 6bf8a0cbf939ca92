//! Login and logout handlers.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::info;

use crate::presentation::admin::views::{LoginTemplate, LoginView};
use crate::presentation::views::render_template_response;

use super::admin::AdminState;
use super::admin::shared::service_unavailable;
use super::session::SESSION_COOKIE;

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    email: String,
    password: String,
}

pub(crate) async fn login_form() -> Response {
    render_template_response(
        LoginTemplate {
            view: LoginView::default(),
        },
        StatusCode::OK,
    )
}

pub(crate) async fn login_submit(
    State(state): State<AdminState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let user = match state.auth.verify_credentials(&form.email, &form.password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            let view = LoginView {
                email: form.email,
                error: Some(INVALID_CREDENTIALS_MESSAGE.to_string()),
            };
            return render_template_response(LoginTemplate { view }, StatusCode::OK);
        }
        Err(err) => {
            return service_unavailable("infra::http::auth::login", &err).into_response();
        }
    };

    let token = state.sessions.issue(user.id, OffsetDateTime::now_utc());
    let max_age = time::Duration::try_from(state.sessions.ttl())
        .unwrap_or(time::Duration::days(14));
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build();

    info!(
        target = "tinta::auth",
        user_id = user.id,
        "signed in"
    );
    (jar.add(cookie), Redirect::to("/admin/")).into_response()
}

pub(crate) async fn logout(jar: CookieJar) -> Response {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/login")).into_response()
}
