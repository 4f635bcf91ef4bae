use serde::{Deserialize, Serialize};

/// An authenticated user together with the group whose currency settings apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub email: String,
    pub user_group_id: i32,
}

