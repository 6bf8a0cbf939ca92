//! View models for the admin panel.
//!
//! Views hold display-ready strings; handlers build them from records and
//! the date formatter so templates stay free of formatting logic.

use askama::Template;

use crate::domain::entities::{PostRecord, UserRecord};
use crate::util::datefmt::format_datetime;

#[derive(Clone)]
pub struct AdminChrome {
    pub user_name: String,
    pub section: &'static str,
}

impl AdminChrome {
    pub fn new(user_name: String, section: &'static str) -> Self {
        Self { user_name, section }
    }
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub chrome: AdminChrome,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(chrome: AdminChrome, content: T) -> Self {
        Self { chrome, content }
    }
}

#[derive(Clone, Default)]
pub struct LoginView {
    pub email: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub view: LoginView,
}

#[derive(Clone)]
pub struct AdminDashboardView {
    pub post_count: u64,
    pub user_count: u64,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub view: AdminLayout<AdminDashboardView>,
}

#[derive(Clone)]
pub struct AdminPostRowView {
    pub id: i64,
    pub title: String,
    pub created: String,
    pub edit_href: String,
    pub delete_href: String,
}

impl AdminPostRowView {
    pub fn from_record(post: &PostRecord) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            created: format_datetime(Some(post.created_at), "short"),
            edit_href: format!("/admin/post/{}/", post.id),
            delete_href: format!("/admin/post/delete/{}/", post.id),
        }
    }
}

#[derive(Clone)]
pub struct AdminPostListView {
    pub rows: Vec<AdminPostRowView>,
    pub page: u32,
    pub page_count: u32,
    pub total: u64,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
}

#[derive(Template)]
#[template(path = "admin/posts.html")]
pub struct PostListTemplate {
    pub view: AdminLayout<AdminPostListView>,
}

#[derive(Clone)]
pub struct FieldErrorView {
    pub field: &'static str,
    pub message: String,
}

#[derive(Clone)]
pub struct AdminPostFormView {
    pub heading: &'static str,
    pub action: String,
    pub title: String,
    pub content: String,
    pub current_image: Option<String>,
    pub errors: Vec<FieldErrorView>,
}

impl AdminPostFormView {
    pub fn blank() -> Self {
        Self {
            heading: "New post",
            action: "/admin/post/".to_string(),
            title: String::new(),
            content: String::new(),
            current_image: None,
            errors: Vec::new(),
        }
    }

    pub fn for_post(post: &PostRecord) -> Self {
        Self {
            heading: "Edit post",
            action: format!("/admin/post/{}/", post.id),
            title: post.title.clone(),
            content: post.content.clone(),
            current_image: post.image_name.clone(),
            errors: Vec::new(),
        }
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }
}

#[derive(Template)]
#[template(path = "admin/post_form.html")]
pub struct PostFormTemplate {
    pub view: AdminLayout<AdminPostFormView>,
}

#[derive(Clone)]
pub struct AdminUserRowView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created: String,
    pub edit_href: String,
    pub delete_href: String,
}

impl AdminUserRowView {
    pub fn from_record(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            created: format_datetime(Some(user.created_at), "full"),
            edit_href: format!("/admin/user/{}/", user.id),
            delete_href: format!("/admin/user/delete/{}/", user.id),
        }
    }
}

#[derive(Clone)]
pub struct AdminUserListView {
    pub rows: Vec<AdminUserRowView>,
}

#[derive(Template)]
#[template(path = "admin/users.html")]
pub struct UserListTemplate {
    pub view: AdminLayout<AdminUserListView>,
}

#[derive(Clone)]
pub struct AdminUserFormView {
    pub action: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl AdminUserFormView {
    pub fn for_user(user: &UserRecord) -> Self {
        Self {
            action: format!("/admin/user/{}/", user.id),
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/user_form.html")]
pub struct UserFormTemplate {
    pub view: AdminLayout<AdminUserFormView>,
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn sample_post() -> PostRecord {
        PostRecord {
            id: 9,
            user_id: 1,
            title: "Release notes".to_string(),
            content: "Body".to_string(),
            image_name: Some("cover.png".to_string()),
            created_at: datetime!(2026-03-05 08:30 UTC),
            updated_at: datetime!(2026-03-06 09:00 UTC),
        }
    }

    #[test]
    fn post_row_uses_short_date_and_admin_links() {
        let row = AdminPostRowView::from_record(&sample_post());
        assert_eq!(row.created, "05/03/2026");
        assert_eq!(row.edit_href, "/admin/post/9/");
        assert_eq!(row.delete_href, "/admin/post/delete/9/");
    }

    #[test]
    fn user_row_uses_long_date() {
        let user = UserRecord {
            id: 3,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            is_admin: true,
            created_at: datetime!(2026-03-05 08:30 UTC),
        };
        let row = AdminUserRowView::from_record(&user);
        assert_eq!(row.created, "05 de 03 de 2026");
        assert_eq!(row.edit_href, "/admin/user/3/");
    }

    #[test]
    fn form_view_prefills_from_record() {
        let view = AdminPostFormView::for_post(&sample_post());
        assert_eq!(view.action, "/admin/post/9/");
        assert_eq!(view.title, "Release notes");
        assert_eq!(view.current_image.as_deref(), Some("cover.png"));
        assert!(view.errors.is_empty());
    }
}
