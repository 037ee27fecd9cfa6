use sea_orm::DeleteResult;
use serde::{Deserialize, Serialize};

/// Request body for create and update. Absent fields decode to their zero
/// value, and `id` is echoed back but never written.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MoviePayload {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct DeleteOutcome {
    pub rows_affected: u64,
}

impl From<DeleteResult> for DeleteOutcome {
    fn from(result: DeleteResult) -> Self {
        Self { rows_affected: result.rows_affected }
    }
}
