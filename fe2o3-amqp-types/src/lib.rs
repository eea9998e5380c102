#![deny(missing_docs, missing_debug_implementations)]

//! Implements the AMQP 1.0 data types needed to carry JMS-style messages, as defined in the
//! [specification](http://docs.oasis-open.org/amqp/core/v1.0/os/amqp-core-overview-v1.0-os.html).

#[cfg(feature = "primitive")]
pub mod primitives;

#[cfg(feature = "transport")]
pub mod definitions;

#[cfg(feature = "messaging")]
pub mod messaging;
