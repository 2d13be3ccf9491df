//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One entry of `GET /api/rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub owner: String,
    pub users: Vec<String>,
    pub created_at: String,
}

/// Response of `GET /api/rooms/{room_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub owner: String,
    pub users: Vec<String>,
    pub history_len: usize,
    pub created_at: String,
}
