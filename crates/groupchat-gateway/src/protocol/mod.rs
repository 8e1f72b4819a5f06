//! Wire protocol definitions
//!
//! JSON frames exchanged with clients over the WebSocket.

mod frames;

pub use frames::{ClientFrame, ServerFrame};
