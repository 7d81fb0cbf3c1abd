use axum::{extract::Path, Json};

use crate::disaster::{self, DisasterPoint};

/// Simulated hotspot cloud for a category. Public, no session needed.
pub async fn disaster_data(Path(disaster): Path<String>) -> Json<Vec<DisasterPoint>> {
    Json(disaster::generate(&disaster))
}
