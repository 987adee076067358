mod common;

use common::FakeQuizApi;
use quizapp::app::{DialogView, Intent, Outcome};
use quizapp::auth::{AuthMode, Credentials};
use quizapp::views::{DialogKind, Route};
use quizapp::ClientError;

fn login(username: &str, password: &str) -> Intent {
    Intent::Authenticate {
        mode: AuthMode::Login,
        credentials: Credentials::new(username, password),
    }
}

#[tokio::test]
async fn test_login_refetches_session() {
    let api = FakeQuizApi::new();
    let alice = api.add_account("alice", "pw");
    let mut app = api.app();
    app.sync().await;
    assert_eq!(app.session().user(), None);

    app.dispatch(Intent::OpenDialog(DialogKind::Login(AuthMode::Login)))
        .await;
    let outcome = app.dispatch(login("alice", "pw")).await;

    assert_eq!(outcome, Outcome::Settled);
    assert_eq!(app.session().user(), Some(alice.clone()));
    assert_eq!(app.render().user, Some(alice));
    assert_eq!(app.dialog().current(), None);
    assert_eq!(api.log(), vec!["GetUser", "auth:login", "GetUser"]);
}

#[tokio::test]
async fn test_rejected_login_leaves_session_and_route_unchanged() {
    let api = FakeQuizApi::new();
    api.add_account("alice", "pw");
    api.state().reject_auth = Some((401, "Invalid username or password".to_string()));
    let mut app = api.app();
    app.sync().await;

    app.dispatch(Intent::OpenDialog(DialogKind::Login(AuthMode::Login)))
        .await;
    let outcome = app.dispatch(login("alice", "pw")).await;

    assert!(outcome.is_failed());
    assert_eq!(app.session().user(), None);
    assert_eq!(app.route(), &Route::Home);
    assert_eq!(
        app.render().dialog,
        Some(DialogView::Login(AuthMode::Login))
    );
    // no refetch after a rejected request
    assert_eq!(api.count("GetUser"), 1);
}

#[tokio::test]
async fn test_signup_logs_the_new_user_in() {
    let api = FakeQuizApi::new();
    let mut app = api.app();
    app.sync().await;

    app.dispatch(Intent::OpenDialog(DialogKind::Login(AuthMode::Login)))
        .await;
    app.dispatch(Intent::SwitchAuthMode(AuthMode::Signup)).await;
    assert_eq!(app.dialog().auth_mode(), Some(AuthMode::Signup));

    let outcome = app
        .dispatch(Intent::Authenticate {
            mode: AuthMode::Signup,
            credentials: Credentials::new("bob", "secret"),
        })
        .await;

    assert_eq!(outcome, Outcome::Settled);
    let user = app.session().user().expect("signed up user");
    assert_eq!(user.username, "bob");
    assert!(api.log().contains(&"auth:signup".to_string()));
}

#[tokio::test]
async fn test_logout_refetches_and_returns_home() {
    let api = FakeQuizApi::new();
    let alice = api.add_account("alice", "pw");
    let template_id = api.add_template(&alice, "Capitals", &[]);
    let mut app = api.app();
    app.sync().await;
    app.dispatch(login("alice", "pw")).await;
    app.dispatch(Intent::Navigate(Route::QuizTemplate(template_id)))
        .await;
    app.sync().await;

    let outcome = app.dispatch(Intent::Logout).await;

    assert_eq!(outcome, Outcome::Navigated(Route::Home));
    assert_eq!(app.session().user(), None);
    assert_eq!(app.route(), &Route::Home);
}

#[tokio::test]
async fn test_failed_logout_keeps_session_and_route() {
    let api = FakeQuizApi::new();
    let alice = api.add_account("alice", "pw");
    let template_id = api.add_template(&alice, "Capitals", &[]);
    let mut app = api.app();
    app.sync().await;
    app.dispatch(login("alice", "pw")).await;
    app.dispatch(Intent::Navigate(Route::QuizTemplate(template_id.clone())))
        .await;
    app.sync().await;

    api.state().reject_logout = true;
    let outcome = app.dispatch(Intent::Logout).await;

    assert!(outcome.is_failed());
    assert_eq!(app.session().user(), Some(alice));
    assert_eq!(app.route(), &Route::QuizTemplate(template_id));
}

#[tokio::test]
async fn test_session_fetch_is_idempotent() {
    let api = FakeQuizApi::new();
    let alice = api.add_account("alice", "pw");
    let app = api.app();
    app.session().login(&Credentials::new("alice", "pw")).await.unwrap();

    let first = app.session().refetch().await.unwrap();
    let second = app.session().refetch().await.unwrap();
    assert_eq!(first, Some(alice));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_session_error_reads_as_anonymous() {
    let api = FakeQuizApi::new();
    api.fail("GetUser");
    let app = api.app();

    assert_eq!(app.session().load().await, None);
    assert!(app.session().status().error.is_some());

    let err = app.session().refetch().await.unwrap_err();
    assert!(matches!(err, ClientError::GraphQl(_)));
}
