//! End-to-end tests against a loopback HTTP responder. Each test spins
//! up a listener with canned responses and inspects the raw requests
//! the client produced.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use blablabil_api::auth::AuthApi;
use blablabil_api::notifications::NotificationsApi;
use blablabil_api::trips::{TripRole, TripsApi};
use blablabil_api::users::UsersApi;
use blablabil_api::{ApiClient, ApiConfig};
use blablabil_core::CredentialStore;
use blablabil_infrastructure::MemoryCredentialStore;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

struct Loopback {
    base_url: String,
    requests: mpsc::UnboundedReceiver<String>,
}

impl Loopback {
    /// Starts a listener that answers one connection per canned
    /// response, recording each raw request.
    async fn serve(responses: Vec<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut responses = responses.into_iter();
            while let Ok((mut stream, _)) = listener.accept().await {
                let raw = read_request(&mut stream).await;
                let _ = tx.send(raw);
                let response = responses
                    .next()
                    .unwrap_or_else(|| json_response(200, "{}"));
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            base_url,
            requests: rx,
        }
    }

    /// Starts a listener that reads the request and then never answers.
    async fn serve_hanging() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let raw = read_request(&mut stream).await;
                let _ = tx.send(raw);
                tokio::time::sleep(Duration::from_secs(60)).await;
                drop(stream);
            }
        });

        Self {
            base_url,
            requests: rx,
        }
    }

    fn next_request(&mut self) -> String {
        self.requests.try_recv().expect("expected a recorded request")
    }

    fn saw_no_request(&mut self) -> bool {
        self.requests.try_recv().is_err()
    }
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = headers_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..end]);
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}

fn json_response(status: u16, body: &str) -> String {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    };
    format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn sample_user_json() -> &'static str {
    r#"{"id":"u-1","firstName":"Kari","lastName":"Nordmann","email":"kari@example.com","phone":"+4740000001"}"#
}

fn client_with(
    base_url: &str,
    store: Arc<MemoryCredentialStore>,
) -> ApiClient {
    ApiClient::new(&ApiConfig::with_base_url(base_url), store).unwrap()
}

#[tokio::test]
async fn attaches_bearer_token_when_one_is_stored() {
    let mut server = Loopback::serve(vec![json_response(200, r#"{"trips":[]}"#)]).await;
    let store = Arc::new(MemoryCredentialStore::with_credentials(
        "tok-abc",
        sample_user_json(),
    ));
    let trips = TripsApi::new(client_with(&server.base_url, store));

    let result = trips.for_user("u-1", TripRole::All).await.unwrap();
    assert!(result.is_empty());

    let raw = server.next_request().to_lowercase();
    assert!(raw.contains("authorization: bearer tok-abc"));
    assert!(raw.contains("role=all"));
}

#[tokio::test]
async fn sends_no_authorization_header_without_a_token() {
    let mut server = Loopback::serve(vec![json_response(200, r#"{"trips":[]}"#)]).await;
    let store = Arc::new(MemoryCredentialStore::new());
    let trips = TripsApi::new(client_with(&server.base_url, store));

    trips.for_user("u-1", TripRole::Driver).await.unwrap();

    let raw = server.next_request().to_lowercase();
    assert!(!raw.contains("authorization:"));
}

#[tokio::test]
async fn unauthorized_response_purges_credentials_and_fires_callback() {
    let mut server = Loopback::serve(vec![json_response(
        401,
        r#"{"message":"Token expired"}"#,
    )])
    .await;
    let store = Arc::new(MemoryCredentialStore::with_credentials(
        "stale-token",
        sample_user_json(),
    ));
    let client = client_with(&server.base_url, store.clone());

    let fired = Arc::new(AtomicBool::new(false));
    let flag = fired.clone();
    client
        .set_unauthorized_callback(Arc::new(move || {
            flag.store(true, Ordering::SeqCst);
        }))
        .await;

    let users = UsersApi::new(client);
    let err = users.profile().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(fired.load(Ordering::SeqCst));
    assert_eq!(store.load_token().await, None);
    assert_eq!(store.load_user().await, None);
    let _ = server.next_request();
}

#[tokio::test]
async fn login_posts_credentials_and_decodes_the_pair() {
    let body = format!(r#"{{"token":"fresh-token","user":{}}}"#, sample_user_json());
    let mut server = Loopback::serve(vec![json_response(200, &body)]).await;
    let store = Arc::new(MemoryCredentialStore::new());
    let auth = AuthApi::new(client_with(&server.base_url, store));

    let response = auth.login("+4740000001", "hunter2").await.unwrap();
    assert_eq!(response.token, "fresh-token");
    assert_eq!(response.user.first_name, "Kari");

    let raw = server.next_request();
    assert!(raw.starts_with("POST /auth/login"));
    assert!(raw.contains(r#""phone":"+4740000001""#));
    assert!(raw.contains(r#""password":"hunter2""#));
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let mut server = Loopback::serve(vec![json_response(
        400,
        r#"{"message":"Not enough seats available"}"#,
    )])
    .await;
    let store = Arc::new(MemoryCredentialStore::new());
    let trips = TripsApi::new(client_with(&server.base_url, store));

    let err = trips.get("t-1").await.unwrap_err();
    assert_eq!(err.server_message(), Some("Not enough seats available"));
    assert_eq!(
        err.human_message("Something went wrong"),
        "Not enough seats available"
    );
    let _ = server.next_request();
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_caller_message() {
    let mut server = Loopback::serve(vec![json_response(500, "<html>oops</html>")]).await;
    let store = Arc::new(MemoryCredentialStore::new());
    let trips = TripsApi::new(client_with(&server.base_url, store));

    let err = trips.get("t-1").await.unwrap_err();
    assert_eq!(err.server_message(), None);
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(
        err.human_message("Something went wrong"),
        "Something went wrong"
    );
    let _ = server.next_request();
}

#[tokio::test]
async fn cancelling_a_scoped_client_aborts_the_in_flight_request() {
    let server = Loopback::serve_hanging().await;
    let store = Arc::new(MemoryCredentialStore::with_credentials(
        "tok-keep",
        sample_user_json(),
    ));
    let client = client_with(&server.base_url, store.clone());

    let cancel = CancellationToken::new();
    let trips = TripsApi::new(client.scoped(cancel.clone()));

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = trips.get("t-1").await.unwrap_err();
    assert!(err.is_cancelled());
    // Cancellation must not disturb the stored credentials.
    assert_eq!(store.load_token().await.as_deref(), Some("tok-keep"));
    assert!(store.load_user().await.is_some());
}

#[tokio::test]
async fn already_cancelled_scope_never_reaches_the_wire() {
    let mut server = Loopback::serve(vec![]).await;
    let store = Arc::new(MemoryCredentialStore::new());
    let client = client_with(&server.base_url, store);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let trips = TripsApi::new(client.scoped(cancel));

    let err = trips.get("t-1").await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(server.saw_no_request());
}

#[tokio::test]
async fn unscoped_clones_ignore_a_cancelled_token() {
    let mut server = Loopback::serve(vec![json_response(200, r#"{"trips":[]}"#)]).await;
    let store = Arc::new(MemoryCredentialStore::new());
    let client = client_with(&server.base_url, store);

    let cancel = CancellationToken::new();
    let _scoped = client.scoped(cancel.clone());
    cancel.cancel();

    // The original client carries no token and must be unaffected.
    let trips = TripsApi::new(client);
    trips.for_user("u-1", TripRole::All).await.unwrap();
    let _ = server.next_request();
}

#[tokio::test]
async fn profile_picture_upload_sends_a_multipart_form() {
    let mut server = Loopback::serve(vec![json_response(
        200,
        r#"{"profilePicture":"/uploads/avatar.jpg"}"#,
    )])
    .await;
    let store = Arc::new(MemoryCredentialStore::with_credentials(
        "tok",
        sample_user_json(),
    ));
    let users = UsersApi::new(client_with(&server.base_url, store));

    let url = users
        .upload_profile_picture("avatar.jpg", vec![0xFF, 0xD8, 0xFF])
        .await
        .unwrap();
    assert_eq!(url, "/uploads/avatar.jpg");

    let raw = server.next_request();
    assert!(raw.starts_with("POST /users/profile/picture"));
    assert!(raw.to_lowercase().contains("multipart/form-data"));
    assert!(raw.contains(r#"name="profilePicture""#));
    assert!(raw.contains(r#"filename="avatar.jpg""#));
}

#[tokio::test]
async fn mark_read_issues_a_bodyless_put() {
    let mut server = Loopback::serve(vec![json_response(200, "{}")]).await;
    let store = Arc::new(MemoryCredentialStore::new());
    let notifications = NotificationsApi::new(client_with(&server.base_url, store));

    notifications.mark_read("n-7").await.unwrap();

    let raw = server.next_request();
    assert!(raw.starts_with("PUT /notifications/n-7/read"));
}
