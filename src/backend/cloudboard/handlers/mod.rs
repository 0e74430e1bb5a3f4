//! REST handlers for the board graph
//!
//! Every handler runs behind `auth_middleware`. Writes are committed first,
//! then announced to the board's hub group through `HubNotifier`.
//!
//! - **`boards`** - `/api/cloudboard`
//! - **`nodes`** - `/api/node`
//! - **`connectors`** - `/api/connector`
//! - **`connections`** - `/api/connection`

pub mod boards;
pub mod connections;
pub mod connectors;
pub mod nodes;

use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};

/// Updates carry the id twice; the two must agree
pub(crate) fn ensure_matching_id(path_id: Uuid, body_id: Uuid) -> BackendResult<()> {
    if path_id != body_id {
        return Err(BackendError::validation(format!(
            "Route id {} does not match body id {}",
            path_id, body_id
        )));
    }
    Ok(())
}
