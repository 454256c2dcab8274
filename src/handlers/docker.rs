use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use crate::errors::DocksideError;
use crate::models::docker::{ContainerActionRequest, ContainerInfo, LogsQuery};
use crate::models::response::GenericResponse;
use crate::repositories::container_client::ContainerClient;

pub async fn list_containers<C>(
    State(client): State<Arc<C>>,
) -> Result<GenericResponse<ContainerInfo>, DocksideError>
where
    C: ContainerClient + Send + Sync,
{
    let containers = client.list_containers().await?;
    Ok(GenericResponse::results(containers))
}

pub async fn start_container<C>(
    State(client): State<Arc<C>>,
    Json(request): Json<ContainerActionRequest>,
) -> Result<GenericResponse<String>, DocksideError>
where
    C: ContainerClient + Send + Sync,
{
    client.start_container(&request.id).await?;
    Ok(GenericResponse::success())
}

pub async fn stop_container<C>(
    State(client): State<Arc<C>>,
    Json(request): Json<ContainerActionRequest>,
) -> Result<GenericResponse<String>, DocksideError>
where
    C: ContainerClient + Send + Sync,
{
    client.stop_container(&request.id).await?;
    Ok(GenericResponse::success())
}

pub async fn restart_container<C>(
    State(client): State<Arc<C>>,
    Json(request): Json<ContainerActionRequest>,
) -> Result<GenericResponse<String>, DocksideError>
where
    C: ContainerClient + Send + Sync,
{
    client.restart_container(&request.id).await?;
    Ok(GenericResponse::success())
}

pub async fn container_logs<C>(
    State(client): State<Arc<C>>,
    Query(query): Query<LogsQuery>,
) -> Result<GenericResponse<String>, DocksideError>
where
    C: ContainerClient + Send + Sync,
{
    let logs = client.container_logs(&query.id).await?;
    Ok(GenericResponse::result(logs))
}
