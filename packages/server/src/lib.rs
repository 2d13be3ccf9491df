//! Parlor relay server library.
//!
//! A real-time message relay: clients connect over a persistent
//! WebSocket, join a room keyed by an owner display name, exchange short
//! text messages, and receive presence notifications. Dead connections
//! are reclaimed by a heartbeat sweep.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
