//! Database operations for boards
//!
//! Free functions over a `SqlitePool` (or an open transaction), one file per
//! table. Rows are decoded by hand with `Row::get`; values stored as text
//! (node kinds, connector enums) that fail to parse surface as
//! `sqlx::Error::Decode`.
//!
//! Cascades are left to the foreign keys (`ON DELETE CASCADE`). Deletes that
//! remove dependent connections report their ids so callers can notify
//! board members.

pub mod boards;
pub mod connections;
pub mod connectors;
pub mod nodes;

use uuid::Uuid;

/// Turn a shared parsing error into a row decoding error
pub(crate) fn decode_error(err: crate::shared::SharedError) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

/// Ids and dependents removed by a cascading delete
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    /// Board the removed rows belonged to
    pub board_id: Uuid,
    /// Connections removed along with the row
    pub connection_ids: Vec<Uuid>,
}
