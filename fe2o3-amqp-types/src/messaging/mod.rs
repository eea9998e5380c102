//! Types defined in AMQP 1.0 specification Part 3: Messaging

pub mod message;
pub use message::{Body, Message};

/* -------------------------- 3.2 Messaging Format -------------------------- */
mod format;
pub use format::*;
