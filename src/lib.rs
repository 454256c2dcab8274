pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod telemetry;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::handlers::docker::{
    container_logs, list_containers, restart_container, start_container, stop_container,
};
use crate::handlers::system::ping;
use crate::repositories::docker_client::DockerClient;
use crate::telemetry::init_telemetry;

pub async fn init() -> Result<()> {
    let config = Config::load()?;
    init_telemetry(&config.telemetry)?;

    let docker_client = Arc::new(DockerClient::new(&config.docker));

    let app = Router::new()
        .route("/ping", get(ping))
        .route("/panel/docker/list", get(list_containers::<DockerClient>))
        .route("/panel/docker/start", post(start_container::<DockerClient>))
        .route("/panel/docker/stop", post(stop_container::<DockerClient>))
        .route(
            "/panel/docker/restart",
            post(restart_container::<DockerClient>),
        )
        .route("/panel/docker/logs", get(container_logs::<DockerClient>))
        .with_state(docker_client);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
