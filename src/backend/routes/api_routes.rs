/**
 * API Route Handlers
 *
 * This module defines the REST API routes.
 *
 * # Routes
 *
 * ## Boards
 * - `GET|POST /api/cloudboard`
 * - `GET|PUT|DELETE /api/cloudboard/{id}`
 *
 * ## Nodes
 * - `GET|POST /api/node` (`GET` takes `?boardId=`)
 * - `GET|PUT|DELETE /api/node/{id}`
 * - `PATCH /api/node/{id}/position`
 * - `PATCH /api/node/{id}/properties`
 *
 * ## Connectors and Connections
 * - `POST /api/connector`, `GET|PUT|DELETE /api/connector/{id}`
 * - `POST /api/connection`, `GET|PUT|DELETE /api/connection/{id}`
 *
 * ## Sorting Applications
 * - `GET|POST /api/sorting-applications`
 * - `GET|PUT|DELETE /api/sorting-applications/{id}`
 */

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::backend::cloudboard::handlers::{boards, connections, connectors, nodes};
use crate::backend::server::state::AppState;
use crate::backend::sorting::handlers as sorting;

/// Configure API routes
///
/// All of these routes require authentication; the caller layers
/// `auth_middleware` over the returned router.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Boards
        .route("/api/cloudboard", get(boards::list_boards).post(boards::create_board))
        .route(
            "/api/cloudboard/{id}",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        // Nodes
        .route("/api/node", get(nodes::list_nodes).post(nodes::create_node))
        .route(
            "/api/node/{id}",
            get(nodes::get_node)
                .put(nodes::update_node)
                .delete(nodes::delete_node),
        )
        .route("/api/node/{id}/position", patch(nodes::update_node_position))
        .route("/api/node/{id}/properties", patch(nodes::update_node_properties))
        // Connectors
        .route("/api/connector", post(connectors::create_connector))
        .route(
            "/api/connector/{id}",
            get(connectors::get_connector)
                .put(connectors::update_connector)
                .delete(connectors::delete_connector),
        )
        // Connections
        .route("/api/connection", post(connections::create_connection))
        .route(
            "/api/connection/{id}",
            get(connections::get_connection)
                .put(connections::update_connection)
                .delete(connections::delete_connection),
        )
        // Sorting applications
        .route(
            "/api/sorting-applications",
            get(sorting::list_applications).post(sorting::create_application),
        )
        .route(
            "/api/sorting-applications/{id}",
            get(sorting::get_application)
                .put(sorting::update_application)
                .delete(sorting::delete_application),
        )
}
