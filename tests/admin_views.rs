use askama::Template;

use tinta::presentation::admin::views::{
    AdminChrome, AdminDashboardView, AdminLayout, AdminPostFormView, AdminPostListView,
    AdminPostRowView, AdminUserListView, AdminUserRowView, DashboardTemplate, FieldErrorView,
    LoginTemplate, LoginView, PostFormTemplate, PostListTemplate, UserListTemplate,
};
use tinta::presentation::views::{ErrorPageView, ErrorTemplate};

fn chrome(section: &'static str) -> AdminChrome {
    AdminChrome::new("Ada".to_string(), section)
}

#[test]
fn dashboard_shows_counts_and_session_name() {
    let view = AdminLayout::new(
        chrome("dashboard"),
        AdminDashboardView {
            post_count: 4,
            user_count: 2,
        },
    );
    let html = DashboardTemplate { view }.render().expect("render dashboard");

    assert!(html.contains("Ada"));
    assert!(html.contains(r#"<a href="/admin/" class="active">"#));
    assert!(html.contains(">4<"));
    assert!(html.contains(">2<"));
    assert!(html.contains(r#"action="/logout""#));
}

#[test]
fn post_list_renders_rows_and_pagination() {
    let view = AdminLayout::new(
        chrome("posts"),
        AdminPostListView {
            rows: vec![AdminPostRowView {
                id: 9,
                title: "Release notes".to_string(),
                created: "05/03/2026".to_string(),
                edit_href: "/admin/post/9/".to_string(),
                delete_href: "/admin/post/delete/9/".to_string(),
            }],
            page: 2,
            page_count: 3,
            total: 7,
            previous_page: Some(1),
            next_page: Some(3),
        },
    );
    let html = PostListTemplate { view }.render().expect("render post list");

    assert!(html.contains("Release notes"));
    assert!(html.contains("05/03/2026"));
    assert!(html.contains(r#"href="/admin/post/9/""#));
    assert!(html.contains(r#"action="/admin/post/delete/9/""#));
    assert!(html.contains(r#"href="/admin/posts/?page=1""#));
    assert!(html.contains(r#"href="/admin/posts/?page=3""#));
    assert!(html.contains("Page 2 of 3"));
}

#[test]
fn empty_post_list_shows_placeholder() {
    let view = AdminLayout::new(
        chrome("posts"),
        AdminPostListView {
            rows: Vec::new(),
            page: 1,
            page_count: 1,
            total: 0,
            previous_page: None,
            next_page: None,
        },
    );
    let html = PostListTemplate { view }.render().expect("render post list");

    assert!(html.contains("No posts yet."));
    assert!(!html.contains("Page 1 of 1"));
}

#[test]
fn post_form_renders_errors_and_prefill() {
    let mut content = AdminPostFormView::blank();
    content.title = "An overlong title".to_string();
    content.errors = vec![FieldErrorView {
        field: "title",
        message: "Field cannot be longer than 128 characters.".to_string(),
    }];

    let view = AdminLayout::new(chrome("posts"), content);
    let html = PostFormTemplate { view }.render().expect("render post form");

    assert!(html.contains("Field cannot be longer than 128 characters."));
    assert!(html.contains(r#"value="An overlong title""#));
    assert!(html.contains(r#"enctype="multipart/form-data""#));
    assert!(html.contains(r#"name="post_image""#));
}

#[test]
fn user_list_renders_admin_flags() {
    let view = AdminLayout::new(
        chrome("users"),
        AdminUserListView {
            rows: vec![
                AdminUserRowView {
                    id: 1,
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                    is_admin: true,
                    created: "01 de 02 de 2026".to_string(),
                    edit_href: "/admin/user/1/".to_string(),
                    delete_href: "/admin/user/delete/1/".to_string(),
                },
                AdminUserRowView {
                    id: 2,
                    name: "Grace".to_string(),
                    email: "grace@example.com".to_string(),
                    is_admin: false,
                    created: "03 de 04 de 2026".to_string(),
                    edit_href: "/admin/user/2/".to_string(),
                    delete_href: "/admin/user/delete/2/".to_string(),
                },
            ],
        },
    );
    let html = UserListTemplate { view }.render().expect("render user list");

    assert!(html.contains("ada@example.com"));
    assert!(html.contains("01 de 02 de 2026"));
    assert!(html.contains("Yes"));
    assert!(html.contains("No"));
    assert!(html.contains(r#"action="/admin/user/delete/2/""#));
}

#[test]
fn login_page_renders_error_banner() {
    let html = LoginTemplate {
        view: LoginView {
            email: "ada@example.com".to_string(),
            error: Some("Invalid email or password".to_string()),
        },
    }
    .render()
    .expect("render login");

    assert!(html.contains("Invalid email or password"));
    assert!(html.contains(r#"value="ada@example.com""#));
}

#[test]
fn error_page_renders_status() {
    let html = ErrorTemplate {
        view: ErrorPageView::not_found(),
    }
    .render()
    .expect("render error page");

    assert!(html.contains("404"));
    assert!(html.contains("does not exist"));
}
