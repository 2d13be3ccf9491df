//! Wire-facing data transfer objects.
//!
//! DTOs are organized by protocol:
//! - `websocket`: JSON frames over the relay channel
//! - `http`: REST observation endpoints

pub mod conversion;
pub mod http;
pub mod websocket;
