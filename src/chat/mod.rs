//! Chat assistant module
//!
//! WebSocket client for the AI coach. Sessions are created and listed over
//! REST; messages within a session stream over a WebSocket.

mod socket;

pub use socket::{ChatEvent, ChatSocket};
