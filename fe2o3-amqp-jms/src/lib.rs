#![deny(missing_debug_implementations)]

//! A JMS-shaped message facade over `fe2o3-amqp-types` AMQP 1.0 messages.
//!
//! This crate does not speak the wire itself; it wraps an already-decoded
//! [`fe2o3_amqp_types::messaging::Message`] (or builds one from scratch) and
//! exposes the getters, setters, and body-shape accessors a JMS provider
//! needs, translating between JMS conventions (durable flags, 0-9 priority,
//! string message ids) and the AMQP sections that carry them.

pub mod destination;
pub mod error;
pub mod id;
pub mod message;

mod section;

pub use destination::{DestinationKind, DestinationSource, JmsDestination};
pub use error::{Error, Result};
pub use id::IdCodecError;
pub use message::{BodyKind, JmsBody, JmsMessage, SendContext};
