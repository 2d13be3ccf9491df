//! Conversions between domain types and wire DTOs.

use parlor_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatRecord, RoomDetail, RoomSummary, Username};
use crate::infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto};
use crate::infrastructure::dto::websocket::{ChatMessageEvent, EventType};

impl From<ChatRecord> for ChatMessageEvent {
    fn from(record: ChatRecord) -> Self {
        Self {
            r#type: EventType::Message,
            username: record.username.into_string(),
            text: record.text.into_string(),
            ts: record.ts.value(),
        }
    }
}

impl From<RoomSummary> for RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            owner: summary.owner.into_string(),
            users: summary.users.into_iter().map(Username::into_string).collect(),
            created_at: timestamp_to_rfc3339(summary.created_at.value()),
        }
    }
}

impl From<RoomDetail> for RoomDetailDto {
    fn from(detail: RoomDetail) -> Self {
        Self {
            id: detail.id.to_string(),
            owner: detail.owner.into_string(),
            users: detail.users.into_iter().map(Username::into_string).collect(),
            history_len: detail.history_len,
            created_at: timestamp_to_rfc3339(detail.created_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageText, RoomId, Timestamp, Username};

    #[test]
    fn test_chat_record_to_message_event() {
        // given (precondition):
        let record = ChatRecord {
            username: Username::sanitize(Some("alice")),
            text: MessageText::sanitize(Some("hello")),
            ts: Timestamp::new(1000),
        };

        // when (operation):
        let event: ChatMessageEvent = record.into();

        // then (expected result):
        assert_eq!(event.r#type, EventType::Message);
        assert_eq!(event.username, "alice");
        assert_eq!(event.text, "hello");
        assert_eq!(event.ts, 1000);
    }

    #[test]
    fn test_room_summary_to_dto() {
        // given (precondition): 2023-01-01 00:00:00 UTC
        let summary = RoomSummary {
            id: RoomId::parse("7").unwrap(),
            owner: Username::sanitize(Some("alice")),
            users: vec![
                Username::sanitize(Some("alice")),
                Username::sanitize(Some("bob")),
            ],
            created_at: Timestamp::new(1_672_531_200_000),
        };

        // when (operation):
        let dto: RoomSummaryDto = summary.into();

        // then (expected result): wire-string id, formatted timestamp
        assert_eq!(dto.id, "7");
        assert_eq!(dto.owner, "alice");
        assert_eq!(dto.users, vec!["alice", "bob"]);
        assert!(dto.created_at.starts_with("2023-01-01T00:00:00"));
    }

    #[test]
    fn test_room_detail_to_dto() {
        // given (precondition):
        let detail = RoomDetail {
            id: RoomId::parse("3").unwrap(),
            owner: Username::sanitize(Some("carol")),
            users: vec![Username::sanitize(Some("carol"))],
            history_len: 12,
            created_at: Timestamp::new(1_672_531_200_000),
        };

        // when (operation):
        let dto: RoomDetailDto = detail.into();

        // then (expected result):
        assert_eq!(dto.id, "3");
        assert_eq!(dto.history_len, 12);
        assert_eq!(dto.users, vec!["carol"]);
    }
}
