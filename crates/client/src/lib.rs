//! Line-protocol client for the Boomer agent.
//!
//! # Architecture
//!
//! ```text
//! stdin ──→ protocol (Handshake / TurnSnapshot)
//!             └─→ Session ──→ runtime::Runtime ──→ Command ──→ stdout
//! ```
//!
//! The binary is the composition root: it loads [`ClientConfig`] from the
//! environment, installs logging on stderr and hands stdin/stdout to a
//! [`Session`]. Everything here also works over in-memory readers and
//! writers, which is how the tests drive it.
pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ProtocolError};
pub use session::Session;
