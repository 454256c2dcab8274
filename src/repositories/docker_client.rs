use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{Method, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::UnixStream;
use tracing::{debug, warn};

use crate::config::DockerConfig;
use crate::errors::docker::DockerError;
use crate::models::docker::{ContainerInfo, ContainerRecord};
use crate::repositories::container_client::ContainerClient;

/// Size of the stream-multiplexing header the daemon prefixes to each log
/// frame: one stream-type byte, three reserved zero bytes, a big-endian
/// u32 payload length.
const LOG_FRAME_HEADER_LEN: usize = 8;

const LIST_CONTAINERS_URI: &str = "/containers/json?all=1";

/// Docker Engine API client speaking HTTP/1.1 directly over the daemon's
/// Unix socket, without an SDK.
///
/// Every operation opens its own connection and lets it drop once the
/// response body has been read. The value holds no connection state, so it
/// is cheap to clone and safe to call from concurrent tasks.
#[derive(Debug, Clone)]
pub struct DockerClient {
    socket_path: String,
    request_timeout: Duration,
}

impl DockerClient {
    /// Construction performs no I/O; the socket is dialed on first use.
    pub fn new(config: &DockerConfig) -> DockerClient {
        DockerClient {
            socket_path: config.socket_path.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// One request/response exchange against the daemon, bounded as a whole
    /// (dial, request, body) by the configured timeout.
    async fn request(
        &self,
        method: Method,
        uri: &str,
    ) -> Result<(StatusCode, Bytes), DockerError> {
        match tokio::time::timeout(self.request_timeout, self.exchange(method, uri)).await {
            Ok(result) => result,
            Err(_) => Err(DockerError::Canceled {
                timeout_secs: self.request_timeout.as_secs(),
            }),
        }
    }

    async fn exchange(
        &self,
        method: Method,
        uri: &str,
    ) -> Result<(StatusCode, Bytes), DockerError> {
        let stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|e| self.transport_error(format!("connect failed: {}", e)))?;

        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .map_err(|e| self.transport_error(format!("HTTP handshake failed: {}", e)))?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                warn!("Docker socket connection error: {}", e);
            }
        });

        // The authority is a naming convention; the socket dial above never
        // resolves it.
        let request = hyper::Request::builder()
            .method(method)
            .uri(uri)
            .header("Host", "docker")
            .body(Empty::<Bytes>::new())
            .map_err(|e| self.transport_error(format!("failed to build request: {}", e)))?;

        let response = sender
            .send_request(request)
            .await
            .map_err(|e| self.transport_error(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| self.transport_error(format!("failed to read response: {}", e)))?
            .to_bytes();

        Ok((status, body))
    }

    async fn lifecycle_action(
        &self,
        id: &str,
        action: &str,
        accepted: &[StatusCode],
    ) -> Result<(), DockerError> {
        validate_container_id(id)?;

        let uri = format!("/containers/{}/{}", urlencoding::encode(id), action);
        let (status, body) = self.request(Method::POST, &uri).await?;

        if accepted.contains(&status) {
            return Ok(());
        }
        Err(daemon_error(status, &body))
    }

    fn transport_error(&self, reason: String) -> DockerError {
        DockerError::Transport {
            path: self.socket_path.clone(),
            reason,
        }
    }
}

#[async_trait]
impl ContainerClient for DockerClient {
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>, DockerError> {
        debug!("Listing containers");
        // all=1 includes stopped containers, which the panel always wants.
        let (status, body) = self.request(Method::GET, LIST_CONTAINERS_URI).await?;
        if status != StatusCode::OK {
            return Err(daemon_error(status, &body));
        }

        let records: Vec<ContainerRecord> =
            serde_json::from_slice(&body).map_err(|e| DockerError::Decode {
                reason: e.to_string(),
            })?;

        // Daemon ordering is kept as-is.
        Ok(records.into_iter().map(ContainerInfo::from).collect())
    }

    async fn start_container(&self, id: &str) -> Result<(), DockerError> {
        debug!("Starting container: {}", id);
        // 304 means already running; repeated starts are safe.
        self.lifecycle_action(
            id,
            "start",
            &[StatusCode::NO_CONTENT, StatusCode::NOT_MODIFIED],
        )
        .await
    }

    async fn stop_container(&self, id: &str) -> Result<(), DockerError> {
        debug!("Stopping container: {}", id);
        // 304 means already stopped; repeated stops are safe.
        self.lifecycle_action(
            id,
            "stop",
            &[StatusCode::NO_CONTENT, StatusCode::NOT_MODIFIED],
        )
        .await
    }

    async fn restart_container(&self, id: &str) -> Result<(), DockerError> {
        debug!("Restarting container: {}", id);
        // A restart has no already-done state, so only 204 is success.
        self.lifecycle_action(id, "restart", &[StatusCode::NO_CONTENT])
            .await
    }

    async fn container_logs(&self, id: &str) -> Result<String, DockerError> {
        debug!("Fetching logs for container: {}", id);
        validate_container_id(id)?;

        let uri = format!(
            "/containers/{}/logs?stdout=1&stderr=1&tail=100",
            urlencoding::encode(id)
        );
        let (status, body) = self.request(Method::GET, &uri).await?;
        if status != StatusCode::OK {
            return Err(daemon_error(status, &body));
        }

        Ok(demux_log_stream(&body))
    }
}

fn validate_container_id(id: &str) -> Result<(), DockerError> {
    if id.is_empty() {
        return Err(DockerError::InvalidArgument {
            reason: "container id must not be empty".to_string(),
        });
    }
    Ok(())
}

fn daemon_error(status: StatusCode, body: &[u8]) -> DockerError {
    DockerError::Daemon {
        status: status.as_u16(),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

/// Strip the multiplexing headers from a log payload, concatenating the
/// stdout and stderr frame contents in arrival order.
///
/// A trailing header shorter than eight bytes ends the loop silently; a
/// payload cut short by the daemon contributes whatever bytes arrived.
fn demux_log_stream(raw: &[u8]) -> String {
    let mut text = Vec::with_capacity(raw.len());
    let mut rest = raw;

    while rest.len() >= LOG_FRAME_HEADER_LEN {
        let declared = u32::from_be_bytes([rest[4], rest[5], rest[6], rest[7]]) as usize;
        let payload = &rest[LOG_FRAME_HEADER_LEN..];
        let take = declared.min(payload.len());
        text.extend_from_slice(&payload[..take]);
        if take < declared {
            break;
        }
        rest = &payload[declared..];
    }

    String::from_utf8_lossy(&text).into_owned()
}
