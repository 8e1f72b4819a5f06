//! In-memory collaborator adapters
//!
//! The real persistence layer and membership service live outside this
//! subsystem, behind the ports in `groupchat-core`. These adapters back
//! the single-process binary and the test suites.

mod memory;

pub use memory::{MemoryMembership, MemoryMessageStore};
