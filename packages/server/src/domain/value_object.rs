//! Value objects for the relay domain.
//!
//! Client-supplied strings never enter the domain raw: display names and
//! message texts are sanitized on construction, so every place that holds
//! a `Username` or `MessageText` can rely on the length bounds.

use std::fmt;

use uuid::Uuid;

/// Maximum length of a display name, in characters.
pub const MAX_USERNAME_CHARS: usize = 30;

/// Maximum length of a chat message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Display name assigned when a client supplies none.
pub const PLACEHOLDER_USERNAME: &str = "anonymous";

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// A sanitized display name.
///
/// Names are client-supplied, unverified and collision-tolerant; the only
/// guarantees are the length bound and that the name is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Sanitize a client-supplied display name: truncate to
    /// [`MAX_USERNAME_CHARS`] characters, fall back to the placeholder
    /// when absent or empty.
    pub fn sanitize(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if !s.is_empty() => Self(truncate_chars(s, MAX_USERNAME_CHARS)),
            _ => Self::placeholder(),
        }
    }

    /// Sanitize an optional target-owner name. `None` when absent or
    /// empty — the client is acting as an owner, not seeking one.
    pub fn sanitize_target(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some(s) if !s.is_empty() => Some(Self(truncate_chars(s, MAX_USERNAME_CHARS))),
            _ => None,
        }
    }

    /// The name used before a client's first join names it.
    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_USERNAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sanitized chat message text: at most [`MAX_MESSAGE_CHARS`] characters,
/// empty when the client sent none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn sanitize(raw: Option<&str>) -> Self {
        Self(truncate_chars(raw.unwrap_or(""), MAX_MESSAGE_CHARS))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Monotonically assigned room identifier.
///
/// Serialized on the wire as a decimal string; identifiers are never
/// reused after a room is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(u64);

impl RoomId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parse the wire representation back into an identifier.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<u64>().ok().map(Self)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque connection identifier, stable for the connection's lifetime.
///
/// Server-generated; never exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_username_keeps_short_names() {
        // given (precondition):
        let raw = Some("alice");

        // when (operation):
        let username = Username::sanitize(raw);

        // then (expected result):
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn test_sanitize_username_defaults_when_absent_or_empty() {
        // given (precondition): no name, and an empty name

        // when (operation):
        let absent = Username::sanitize(None);
        let empty = Username::sanitize(Some(""));

        // then (expected result): both fall back to the placeholder
        assert_eq!(absent.as_str(), PLACEHOLDER_USERNAME);
        assert_eq!(empty.as_str(), PLACEHOLDER_USERNAME);
    }

    #[test]
    fn test_sanitize_username_truncates_to_thirty_chars() {
        // given (precondition): a 31-character name
        let raw = "a".repeat(31);

        // when (operation):
        let username = Username::sanitize(Some(&raw));

        // then (expected result): truncated, not rejected
        assert_eq!(username.as_str().chars().count(), MAX_USERNAME_CHARS);
    }

    #[test]
    fn test_sanitize_username_truncates_by_characters_not_bytes() {
        // given (precondition): multibyte characters past the bound
        let raw = "é".repeat(40);

        // when (operation):
        let username = Username::sanitize(Some(&raw));

        // then (expected result): 30 characters survive intact
        assert_eq!(username.as_str().chars().count(), MAX_USERNAME_CHARS);
        assert!(username.as_str().chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_sanitize_target_is_none_when_absent_or_empty() {
        // given (precondition): no target, and an empty target

        // when (operation):
        let absent = Username::sanitize_target(None);
        let empty = Username::sanitize_target(Some(""));

        // then (expected result): the client acts as an owner
        assert_eq!(absent, None);
        assert_eq!(empty, None);
    }

    #[test]
    fn test_sanitize_target_truncates_like_a_username() {
        // given (precondition):
        let raw = "b".repeat(45);

        // when (operation):
        let target = Username::sanitize_target(Some(&raw));

        // then (expected result):
        let target = target.expect("non-empty target should be kept");
        assert_eq!(target.as_str().chars().count(), MAX_USERNAME_CHARS);
    }

    #[test]
    fn test_sanitize_message_text_truncates_to_limit() {
        // given (precondition): 1001 characters
        let raw = "x".repeat(MAX_MESSAGE_CHARS + 1);

        // when (operation):
        let text = MessageText::sanitize(Some(&raw));

        // then (expected result):
        assert_eq!(text.as_str().chars().count(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn test_sanitize_message_text_defaults_to_empty() {
        // given (precondition): no text

        // when (operation):
        let text = MessageText::sanitize(None);

        // then (expected result): empty, not a placeholder
        assert_eq!(text.as_str(), "");
    }

    #[test]
    fn test_room_id_round_trips_through_the_wire_form() {
        // given (precondition):
        let id = RoomId::new(42);

        // when (operation):
        let wire = id.to_string();
        let parsed = RoomId::parse(&wire);

        // then (expected result):
        assert_eq!(wire, "42");
        assert_eq!(parsed, Some(id));
    }

    #[test]
    fn test_room_id_parse_rejects_garbage() {
        // given (precondition):

        // when (operation):
        let parsed = RoomId::parse("not-a-number");

        // then (expected result):
        assert_eq!(parsed, None);
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // given (precondition):

        // when (operation):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (expected result):
        assert_ne!(a, b);
    }
}
