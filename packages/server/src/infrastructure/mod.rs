//! Concrete adapters: the in-memory registry, WebSocket client sinks,
//! and wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod repository;
