use async_trait::async_trait;
use mockall::automock;

use crate::errors::docker::DockerError;
use crate::models::docker::ContainerInfo;

/// Container lifecycle operations consumed by the panel handlers. The
/// handlers see only this trait, so they stay free of Docker wire details.
#[automock]
#[async_trait]
pub trait ContainerClient {
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>, DockerError>;
    async fn start_container(&self, id: &str) -> Result<(), DockerError>;
    async fn stop_container(&self, id: &str) -> Result<(), DockerError>;
    async fn restart_container(&self, id: &str) -> Result<(), DockerError>;
    async fn container_logs(&self, id: &str) -> Result<String, DockerError>;
}
