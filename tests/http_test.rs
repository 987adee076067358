//! Real HTTP transport and auth gateway against a local axum server.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use quizapp::auth::Credentials;
use quizapp::client::{FetchPolicy, QuizClient};
use quizapp::graphql::operations::GetQuizTemplates;
use quizapp::models::User;
use quizapp::{App, ClientConfig, ClientError};

const SESSION_COOKIE: &str = "session=abc123";

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|cookies| cookies.contains(SESSION_COOKIE))
        .unwrap_or(false)
}

async fn login(headers: HeaderMap) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if authorization == Some("Basic YWxpY2U6cHc=") {
        (
            StatusCode::OK,
            [(header::SET_COOKIE, format!("{}; Path=/", SESSION_COOKIE))],
        )
            .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Invalid username or password").into_response()
    }
}

async fn logout() -> Response {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, "session=; Path=/; Max-Age=0")],
    )
        .into_response()
}

async fn graphql(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let logged_in = has_session(&headers);
    match body["operationName"].as_str() {
        Some("GetUser") => {
            let user = logged_in.then(|| json!({"id": "u1", "username": "alice"}));
            Json(json!({"data": {"user": user}})).into_response()
        }
        Some("GetQuizTemplates") if logged_in => {
            assert_eq!(body["variables"]["userId"], "u1");
            Json(json!({"data": {"quizTemplate": {"byUserId": [
                {"id": "qt1", "name": "Capitals"}
            ]}}}))
            .into_response()
        }
        Some("GetQuizTemplates") => (StatusCode::UNAUTHORIZED, "login required").into_response(),
        _ => Json(json!({"errors": [{"message": "unknown operation"}]})).into_response(),
    }
}

async fn spawn_server() -> String {
    let router = Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/graphql", post(graphql));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn connect() -> App {
    let config = ClientConfig::default().with_api_url(spawn_server().await);
    App::connect(&config).unwrap()
}

fn alice() -> User {
    User {
        id: "u1".to_string(),
        username: "alice".to_string(),
    }
}

#[tokio::test]
async fn test_login_cookie_authenticates_graphql() {
    let app = connect().await;
    assert_eq!(app.session().load().await, None);

    let user = app
        .session()
        .login(&Credentials::new("alice", "pw"))
        .await
        .unwrap();
    assert_eq!(user, Some(alice()));

    let data = app
        .client()
        .query::<GetQuizTemplates>(
            &QuizClient::templates_variables(&alice()),
            FetchPolicy::NetworkOnly,
        )
        .await
        .unwrap();
    let templates = data.quiz_template.by_user_id;
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name, "Capitals");
}

#[tokio::test]
async fn test_rejected_login_reports_status_and_body() {
    let app = connect().await;
    app.session().load().await;

    let err = app
        .session()
        .login(&Credentials::new("alice", "wrong"))
        .await
        .unwrap_err();
    match err {
        ClientError::AuthFailed { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Invalid username or password");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(app.session().user(), None);
}

#[tokio::test]
async fn test_graphql_http_error_is_transport_error() {
    let app = connect().await;

    let err = app
        .client()
        .query::<GetQuizTemplates>(
            &QuizClient::templates_variables(&alice()),
            FetchPolicy::NetworkOnly,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_logout_clears_the_session_cookie() {
    let app = connect().await;
    app.session()
        .login(&Credentials::new("alice", "pw"))
        .await
        .unwrap();
    assert_eq!(app.session().user(), Some(alice()));

    app.session().logout().await.unwrap();
    assert_eq!(app.session().user(), None);
}
