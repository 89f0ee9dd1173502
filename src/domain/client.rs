//! Client (end user) entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A client of the platform, identified by telegram id.
///
/// Created lazily the first time an id authenticates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i32,
    pub telegram_id: i64,
    pub created_at: DateTime<Utc>,
}
