use crate::models::response::GenericResponse;

// Liveness probe; answers whether the panel backend itself is reachable.
pub async fn ping() -> GenericResponse<String> {
    GenericResponse::success()
}
