use std::path::PathBuf;

use super::*;

fn raw_with_secret() -> RawSettings {
    let mut raw = RawSettings::default();
    raw.auth.secret_key = Some("test-secret".to_string());
    raw
}

#[test]
fn defaults_resolve_when_secret_is_present() {
    let settings = Settings::from_raw(raw_with_secret()).expect("defaults resolve");

    assert_eq!(settings.server.addr.port(), 5000);
    assert_eq!(settings.database.max_connections.get(), 8);
    assert_eq!(settings.media.base_dir, PathBuf::from("media"));
    assert_eq!(settings.media.post_images_dir, PathBuf::from("media/posts"));
    assert_eq!(settings.site.items_per_page.get(), 3);
    assert_eq!(settings.environment, AppEnv::Local);
    assert_eq!(settings.mail.server, "localhost");
    assert_eq!(settings.mail.port, 587);
    assert!(settings.mail.use_tls);
    assert!(settings.database.url.is_none());
}

#[test]
fn missing_secret_key_is_rejected() {
    let err = Settings::from_raw(RawSettings::default()).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "auth.secret_key",
            ..
        }
    ));
}

#[test]
fn blank_secret_key_is_rejected() {
    let mut raw = RawSettings::default();
    raw.auth.secret_key = Some("   ".to_string());
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = raw_with_secret();
    raw.server.port = Some(0);
    let err = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(err, LoadError::Invalid { key: "server.port", .. }));
}

#[test]
fn blank_database_url_is_dropped() {
    let mut raw = raw_with_secret();
    raw.database.url = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("settings resolve");
    assert!(settings.database.url.is_none());
}

#[test]
fn serve_overrides_take_precedence() {
    let mut raw = raw_with_secret();
    raw.server.port = Some(8080);
    raw.site.items_per_page = Some(10);

    let overrides = ServeOverrides {
        server_port: Some(9090),
        items_per_page: Some(25),
        database_url: Some("postgres://localhost/tinta".to_string()),
        environment: Some("staging".to_string()),
        ..ServeOverrides::default()
    };
    raw.apply_serve_overrides(&overrides);

    let settings = Settings::from_raw(raw).expect("settings resolve");
    assert_eq!(settings.server.addr.port(), 9090);
    assert_eq!(settings.site.items_per_page.get(), 25);
    assert_eq!(
        settings.database.url.as_deref(),
        Some("postgres://localhost/tinta")
    );
    assert_eq!(settings.environment, AppEnv::Staging);
}

#[test]
fn unknown_environment_tag_is_rejected() {
    let mut raw = raw_with_secret();
    raw.environment = Some("qa".to_string());
    let err = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(err, LoadError::Invalid { key: "environment", .. }));
}

#[test]
fn environment_tags_parse() {
    for (tag, expected) in [
        ("local", AppEnv::Local),
        ("testing", AppEnv::Testing),
        ("development", AppEnv::Development),
        ("staging", AppEnv::Staging),
        ("production", AppEnv::Production),
    ] {
        assert_eq!(tag.parse::<AppEnv>().unwrap(), expected);
        assert_eq!(expected.as_str(), tag);
    }
}
