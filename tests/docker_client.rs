use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::task::JoinHandle;

use dockside::config::DockerConfig;
use dockside::errors::docker::DockerError;
use dockside::repositories::container_client::ContainerClient;
use dockside::repositories::docker_client::DockerClient;

/// Canned Docker daemon behind a real Unix socket: serves one prepared
/// HTTP/1.1 response per connection and records each request line.
struct StubDaemon {
    _dir: TempDir,
    socket_path: PathBuf,
    requests: JoinHandle<Vec<String>>,
}

impl StubDaemon {
    fn serve(responses: Vec<Vec<u8>>) -> StubDaemon {
        let dir = TempDir::new().unwrap();
        let socket_path = dir.path().join("docker.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();

        let requests = tokio::spawn(async move {
            let mut seen = Vec::new();
            for response in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                seen.push(read_request_line(&mut stream).await);
                stream.write_all(&response).await.unwrap();
                stream.flush().await.unwrap();
            }
            seen
        });

        StubDaemon {
            _dir: dir,
            socket_path,
            requests,
        }
    }

    async fn finish(self) -> Vec<String> {
        self.requests.await.unwrap()
    }
}

async fn read_request_line(stream: &mut UnixStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        buf.extend_from_slice(&chunk[..n]);
        if n == 0 || buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&buf)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

fn http_response(status_line: &str, body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
        status_line,
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

fn client_for(socket_path: &Path, timeout_secs: u64) -> DockerClient {
    DockerClient::new(&DockerConfig {
        socket_path: socket_path.to_str().unwrap().to_string(),
        request_timeout_secs: timeout_secs,
    })
}

fn log_frame(stream: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![stream, 0, 0, 0];
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

#[tokio::test]
async fn list_given_containers_then_maps_fields_and_preserves_daemon_order() {
    // Extra wire fields are present in real daemon answers and must be ignored.
    let body = br#"[
        {"Id":"bbb","Names":["/beta"],"Image":"redis:7","ImageID":"sha256:f00",
         "Command":"redis-server","State":"running","Status":"Up 2 hours","Created":1700000200},
        {"Id":"aaa","Names":["/alpha","/alias"],"Image":"nginx:latest",
         "Command":"nginx","State":"exited","Status":"Exited (0) 5 minutes ago","Created":1700000100}
    ]"#;
    let daemon = StubDaemon::serve(vec![http_response("200 OK", body)]);
    let client = client_for(&daemon.socket_path, 5);

    let containers = client.list_containers().await.unwrap();

    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0].id, "bbb");
    assert_eq!(containers[0].names, vec!["/beta"]);
    assert_eq!(containers[0].image, "redis:7");
    assert_eq!(containers[0].state, "running");
    assert_eq!(containers[0].status, "Up 2 hours");
    assert_eq!(containers[0].created, 1_700_000_200);
    assert_eq!(containers[1].id, "aaa");
    assert_eq!(containers[1].names, vec!["/alpha", "/alias"]);
    assert_eq!(containers[1].state, "exited");

    let requests = daemon.finish().await;
    assert_eq!(requests, vec!["GET /containers/json?all=1 HTTP/1.1"]);
}

#[tokio::test]
async fn list_given_daemon_failure_then_returns_daemon_error_with_status() {
    let daemon = StubDaemon::serve(vec![http_response(
        "500 Internal Server Error",
        br#"{"message":"something broke"}"#,
    )]);
    let client = client_for(&daemon.socket_path, 5);

    let err = client.list_containers().await.unwrap_err();

    match err {
        DockerError::Daemon { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("something broke"));
        }
        other => panic!("expected daemon error, got {:?}", other),
    }
}

#[tokio::test]
async fn list_given_malformed_json_then_returns_decode_error() {
    let daemon = StubDaemon::serve(vec![http_response("200 OK", b"not json at all")]);
    let client = client_for(&daemon.socket_path, 5);

    let err = client.list_containers().await.unwrap_err();

    assert!(matches!(err, DockerError::Decode { .. }));
}

#[tokio::test]
async fn start_given_daemon_accepts_then_posts_to_start_endpoint() {
    let daemon = StubDaemon::serve(vec![http_response("204 No Content", b"")]);
    let client = client_for(&daemon.socket_path, 5);

    client.start_container("abc123").await.unwrap();

    let requests = daemon.finish().await;
    assert_eq!(requests, vec!["POST /containers/abc123/start HTTP/1.1"]);
}

#[tokio::test]
async fn start_given_already_running_then_304_is_success() {
    let daemon = StubDaemon::serve(vec![http_response("304 Not Modified", b"")]);
    let client = client_for(&daemon.socket_path, 5);

    assert!(client.start_container("abc123").await.is_ok());
}

#[tokio::test]
async fn stop_given_already_stopped_then_304_is_success() {
    let daemon = StubDaemon::serve(vec![http_response("304 Not Modified", b"")]);
    let client = client_for(&daemon.socket_path, 5);

    assert!(client.stop_container("abc123").await.is_ok());
}

#[tokio::test]
async fn restart_given_304_then_returns_daemon_error() {
    // Unlike start/stop there is no already-restarted state.
    let daemon = StubDaemon::serve(vec![http_response("304 Not Modified", b"")]);
    let client = client_for(&daemon.socket_path, 5);

    let err = client.restart_container("abc123").await.unwrap_err();

    assert!(matches!(err, DockerError::Daemon { status: 304, .. }));
}

#[tokio::test]
async fn restart_given_daemon_accepts_then_succeeds() {
    let daemon = StubDaemon::serve(vec![http_response("204 No Content", b"")]);
    let client = client_for(&daemon.socket_path, 5);

    client.restart_container("abc123").await.unwrap();

    let requests = daemon.finish().await;
    assert_eq!(requests, vec!["POST /containers/abc123/restart HTTP/1.1"]);
}

#[tokio::test]
async fn stop_given_unknown_container_then_daemon_error_carries_status_and_body() {
    let body = br#"{"message":"No such container: missing"}"#;
    let daemon = StubDaemon::serve(vec![http_response("404 Not Found", body)]);
    let client = client_for(&daemon.socket_path, 5);

    let err = client.stop_container("missing").await.unwrap_err();

    match err {
        DockerError::Daemon { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, r#"{"message":"No such container: missing"}"#);
        }
        other => panic!("expected daemon error, got {:?}", other),
    }
}

#[tokio::test]
async fn lifecycle_given_empty_id_then_fails_before_any_network_call() {
    // The socket does not exist: touching it would surface a transport error.
    let dir = TempDir::new().unwrap();
    let client = client_for(&dir.path().join("missing.sock"), 5);

    for result in [
        client.start_container("").await,
        client.stop_container("").await,
        client.restart_container("").await,
        client.container_logs("").await.map(|_| ()),
    ] {
        assert!(matches!(
            result.unwrap_err(),
            DockerError::InvalidArgument { .. }
        ));
    }
}

#[tokio::test]
async fn logs_given_multiplexed_stream_then_returns_deframed_text() {
    let mut body = log_frame(1, b"starting up\n");
    body.extend(log_frame(2, b"warning: low disk\n"));
    body.extend(log_frame(1, b"ready\n"));
    let daemon = StubDaemon::serve(vec![http_response("200 OK", &body)]);
    let client = client_for(&daemon.socket_path, 5);

    let logs = client.container_logs("abc123").await.unwrap();

    assert_eq!(logs, "starting up\nwarning: low disk\nready\n");

    let requests = daemon.finish().await;
    assert_eq!(
        requests,
        vec!["GET /containers/abc123/logs?stdout=1&stderr=1&tail=100 HTTP/1.1"]
    );
}

#[tokio::test]
async fn logs_given_truncated_trailing_header_then_returns_complete_frames() {
    let mut body = log_frame(1, b"first\n");
    body.extend(log_frame(2, b"second\n"));
    body.extend_from_slice(&[1, 0, 0, 0, 0]);
    let daemon = StubDaemon::serve(vec![http_response("200 OK", &body)]);
    let client = client_for(&daemon.socket_path, 5);

    let logs = client.container_logs("abc123").await.unwrap();

    assert_eq!(logs, "first\nsecond\n");
}

#[tokio::test]
async fn logs_given_unknown_container_then_returns_daemon_error() {
    let daemon = StubDaemon::serve(vec![http_response(
        "404 Not Found",
        br#"{"message":"No such container: gone"}"#,
    )]);
    let client = client_for(&daemon.socket_path, 5);

    let err = client.container_logs("gone").await.unwrap_err();

    assert!(matches!(err, DockerError::Daemon { status: 404, .. }));
}

#[tokio::test]
async fn request_given_unreachable_socket_then_returns_transport_error() {
    let dir = TempDir::new().unwrap();
    let client = client_for(&dir.path().join("missing.sock"), 5);

    let err = client.list_containers().await.unwrap_err();

    assert!(matches!(err, DockerError::Transport { .. }));
}

#[tokio::test]
async fn request_given_stalled_daemon_then_cancels_after_timeout() {
    let dir = TempDir::new().unwrap();
    let socket_path = dir.path().join("docker.sock");
    let listener = UnixListener::bind(&socket_path).unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let _ = read_request_line(&mut stream).await;
        tokio::time::sleep(Duration::from_secs(30)).await;
    });
    let client = client_for(&socket_path, 1);

    let err = client.list_containers().await.unwrap_err();

    assert!(matches!(err, DockerError::Canceled { timeout_secs: 1 }));
}

#[tokio::test]
async fn scenario_stopped_container_can_be_listed_started_and_stopped_again() {
    let list_body = br#"[{"Id":"abc123","Names":["/worker"],"Image":"busybox",
        "State":"exited","Status":"Exited (0) 2 hours ago","Created":1700000000}]"#;
    let daemon = StubDaemon::serve(vec![
        http_response("200 OK", list_body),
        http_response("204 No Content", b""),
        http_response("304 Not Modified", b""),
    ]);
    let client = client_for(&daemon.socket_path, 5);

    let containers = client.list_containers().await.unwrap();
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].id, "abc123");
    assert_eq!(containers[0].state, "exited");

    client.start_container("abc123").await.unwrap();
    // Contrived timing: the daemon reports it already stopped again.
    client.stop_container("abc123").await.unwrap();

    let requests = daemon.finish().await;
    assert_eq!(
        requests,
        vec![
            "GET /containers/json?all=1 HTTP/1.1",
            "POST /containers/abc123/start HTTP/1.1",
            "POST /containers/abc123/stop HTTP/1.1",
        ]
    );
}
