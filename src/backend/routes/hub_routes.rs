/**
 * Hub Routes
 *
 * - `POST /hubs/cloudboard/negotiate` - SignalR negotiate
 * - `GET /hubs/cloudboard` - WebSocket upgrade
 *
 * These authenticate inside the handlers (header or `access_token` query)
 * instead of through `auth_middleware`.
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::hub::socket::{hub_socket, negotiate};
use crate::backend::server::state::AppState;

/// Path the hub is mounted at
pub const HUB_PATH: &str = "/hubs/cloudboard";

pub fn configure_hub_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/hubs/cloudboard/negotiate", post(negotiate))
        .route(HUB_PATH, get(hub_socket))
}
