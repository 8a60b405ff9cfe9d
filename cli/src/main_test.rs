use super::*;
use crate::test_server::serve;
use campus::KeyValueStore;
use tempfile::TempDir;

fn event(id: &str) -> Event {
    Event { id: id.to_owned(), title: Some("Spring Fest".into()), ..Event::default() }
}

fn parse(state: &std::path::Path, base_url: &str, args: &[&str]) -> Cli {
    let mut argv = vec!["campus", "--base-url", base_url, "--state-file", state.to_str().unwrap()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

// =============================================================
// Formatting
// =============================================================

#[test]
fn user_summary_lists_present_fields_only() {
    let user = User {
        full_name: Some("Ada Lovelace".into()),
        role: Role::Student,
        department: Some("Mathematics".into()),
        year: Some(String::new()),
        ..User::default()
    };
    assert_eq!(user_summary(&user), "Ada Lovelace (student)\n  department: Mathematics");
}

#[test]
fn event_line_includes_schedule_and_venue() {
    let full = Event { date: Some("2025-04-01".into()), time: Some("18:00".into()), venue: Some("Hall A".into()), ..event("e1") };
    assert_eq!(event_line(&full), "e1\tSpring Fest\t2025-04-01 18:00\t@ Hall A");
    assert_eq!(event_line(&Event { id: "e2".into(), ..Event::default() }), "e2\tUntitled event");
}

#[test]
fn empty_lists_render_placeholder() {
    assert_eq!(event_lines(&[]), "no events");
    assert_eq!(notification_lines(&[]), "no notifications");
}

#[test]
fn notification_lines_mark_read_and_count_unread() {
    let list = vec![
        Notification { id: "1".into(), title: Some("Reminder".into()), message: "Starts soon".into(), read: false, created_at: None },
        Notification { id: "2".into(), title: None, message: "Welcome".into(), read: true, created_at: None },
    ];
    assert_eq!(notification_lines(&list), "[ ] 1\tReminder: Starts soon\n[x] 2\tWelcome\n1 unread");
}

#[test]
fn profile_args_only_override_given_fields() {
    let user = User { full_name: Some("Old".into()), email: Some("a@b.com".into()), ..User::default() };
    let mut update = ProfileUpdate::from_user(&user);
    let args = ProfileArgs { full_name: Some("New".into()), year: Some("3".into()), ..ProfileArgs::default() };

    args.apply(&mut update);

    assert_eq!(update.full_name, "New");
    assert_eq!(update.email, "a@b.com");
    assert_eq!(update.year, "3");
    assert_eq!(update.department, "");
}

// =============================================================
// Argument parsing
// =============================================================

#[test]
fn invalid_base_url_is_config_error() {
    let dir = TempDir::new().unwrap();
    let cli = parse(&dir.path().join("state.json"), "ftp://files.example", &["whoami"]);
    assert!(matches!(CliContext::new(&cli), Err(CliError::Config(_))));
}

#[test]
fn connection_flags_are_accepted_after_the_subcommand() {
    let cli = Cli::try_parse_from([
        "campus",
        "whoami",
        "--base-url",
        "http://127.0.0.1:5000",
        "--state-file",
        "/tmp/campus-state.json",
    ])
    .unwrap();
    assert_eq!(cli.base_url, "http://127.0.0.1:5000");
    assert_eq!(cli.state_file, Some(PathBuf::from("/tmp/campus-state.json")));
    assert!(matches!(cli.command, Command::Whoami));
}

#[test]
fn profile_update_parses_optional_flags() {
    let cli = Cli::try_parse_from(["campus", "profile", "update", "--department", "Physics"]).unwrap();
    let Command::Profile(ProfileCommand { command: ProfileSubcommand::Update(args) }) = cli.command else {
        panic!("expected profile update");
    };
    assert_eq!(args.department.as_deref(), Some("Physics"));
    assert!(args.full_name.is_none());
}

// =============================================================
// End to end against a local server
// =============================================================

#[tokio::test]
async fn login_persists_token_in_state_file() {
    let (addr, seen) = serve(vec![(200, r#"{"token":"t1","user":{"id":1,"fullName":"Ada","role":"student"}}"#)]).await;
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");

    run(parse(&state, &format!("http://{addr}"), &["login", "--email", "a@b.com", "--password", "secret"]))
        .await
        .unwrap();

    assert_eq!(FileStore::new(&state).get("token").as_deref(), Some("t1"));
    assert!(seen.lock().unwrap()[0].starts_with("POST /api/auth/login"));
}

#[tokio::test]
async fn rejected_login_reports_backend_message() {
    let (addr, _) = serve(vec![(401, r#"{"message":"Invalid credentials"}"#)]).await;
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");

    let err = run(parse(&state, &format!("http://{addr}"), &["login", "--email", "a@b.com", "--password", "nope"]))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(FileStore::new(&state).get("token"), None);
}

#[tokio::test]
async fn whoami_without_token_makes_no_request() {
    let dir = TempDir::new().unwrap();
    let cli = parse(&dir.path().join("state.json"), "http://127.0.0.1:9", &["whoami"]);

    assert!(matches!(run(cli).await, Err(CliError::NotSignedIn)));
}

#[tokio::test]
async fn read_marks_locally_and_acknowledges_with_bearer() {
    let (addr, seen) = serve(vec![(200, r#"{"user":{"id":1,"role":"student"}}"#), (500, "{}")]).await;
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    FileStore::new(&state).set("token", "saved");

    run(parse(&state, &format!("http://{addr}"), &["read", "n7"])).await.unwrap();

    let requests = seen.lock().unwrap().clone();
    assert!(requests[1].starts_with("PUT /api/users/notifications/n7/read"));
    assert!(requests[1].to_ascii_lowercase().contains("authorization: bearer saved"));
    assert_eq!(FileStore::new(&state).get("readNotifications").as_deref(), Some(r#"["n7"]"#));
}

#[tokio::test]
async fn logout_removes_token() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("state.json");
    FileStore::new(&state).set("token", "saved");

    run(parse(&state, "http://127.0.0.1:9", &["logout"])).await.unwrap();

    assert_eq!(FileStore::new(&state).get("token"), None);
}
