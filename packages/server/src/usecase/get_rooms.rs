//! UseCases: read-only room views for the HTTP API.

use std::sync::Arc;

use crate::domain::{RoomDetail, RoomId, RoomRegistry, RoomSummary};

use super::error::GetRoomDetailError;

/// Lists every live room.
pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.registry.room_summaries().await
    }
}

/// Resolves one room from its wire identifier.
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, room_id: &str) -> Result<RoomDetail, GetRoomDetailError> {
        let room_id = RoomId::parse(room_id).ok_or(GetRoomDetailError::RoomNotFound)?;
        self.registry
            .room_detail(&room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
