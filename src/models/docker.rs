use serde::{Deserialize, Serialize};

/// Container summary handed to callers of the client.
///
/// Produced fresh on every list call; the daemon's container ID is the only
/// identity and is not stable across container recreation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerInfo {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
    pub state: String,
    pub status: String,
    pub created: i64,
}

/// Wire-format record as the daemon serializes it in `/containers/json`.
/// Exists only during decode; mapped into [`ContainerInfo`] and discarded.
#[derive(Debug, Deserialize)]
pub struct ContainerRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Names", default)]
    pub names: Vec<String>,
    #[serde(rename = "Image", default)]
    pub image: String,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Created", default)]
    pub created: i64,
}

impl From<ContainerRecord> for ContainerInfo {
    fn from(value: ContainerRecord) -> Self {
        ContainerInfo {
            id: value.id,
            names: value.names,
            image: value.image,
            state: value.state,
            status: value.status,
            created: value.created,
        }
    }
}

/// Body of the start/stop/restart panel endpoints.
#[derive(Debug, Deserialize)]
pub struct ContainerActionRequest {
    pub id: String,
}

/// Query string of the logs panel endpoint.
#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub id: String,
}
