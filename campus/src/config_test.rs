use super::*;

#[test]
fn new_trims_trailing_slashes() {
    let config = ClientConfig::new("https://api.campus.test//").unwrap();
    assert_eq!(config.base_url(), "https://api.campus.test");
}

#[test]
fn new_accepts_empty_origin_for_relative_requests() {
    let config = ClientConfig::new("").unwrap();
    assert_eq!(config.url("/api/events"), "/api/events");
}

#[test]
fn new_rejects_non_http_origin() {
    assert_eq!(
        ClientConfig::new("ftp://campus.test"),
        Err(ConfigError::InvalidBaseUrl("ftp://campus.test".to_owned()))
    );
}

#[test]
fn new_rejects_unparseable_origin() {
    assert!(ClientConfig::new("campus.test").is_err());
    assert!(ClientConfig::new("http://").is_err());
}

#[test]
fn default_points_at_hosted_backend() {
    assert_eq!(ClientConfig::default().base_url(), DEFAULT_BASE_URL);
}

#[test]
fn url_joins_with_or_without_leading_slash() {
    let config = ClientConfig::new("http://localhost:5000").unwrap();
    assert_eq!(config.url("/api/auth/me"), "http://localhost:5000/api/auth/me");
    assert_eq!(config.url("api/auth/me"), "http://localhost:5000/api/auth/me");
}

#[test]
fn describe_formats_method_and_url() {
    let config = ClientConfig::new("http://localhost:5000").unwrap();
    assert_eq!(config.describe(Method::Put, "/api/users/profile"), "PUT http://localhost:5000/api/users/profile");
}
