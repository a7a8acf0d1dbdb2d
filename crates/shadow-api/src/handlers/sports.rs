//! Public sport catalog handler.

use axum::extract::State;
use axum::Json;

use shadow_models::SportsResponse;

use crate::state::AppState;

/// List supported sports in catalog order.
pub async fn list_sports(State(state): State<AppState>) -> Json<SportsResponse> {
    Json(SportsResponse {
        sports: state
            .catalog
            .list()
            .into_iter()
            .map(|s| s.to_string())
            .collect(),
    })
}
