//! Types defined in AMQP 1.0 specification Part 2.8: Definitions

use serde_amqp::primitives::UInt;

/// 2.8.6 Milliseconds
pub type Milliseconds = UInt;

/// 2.8.10 Sequence No
pub type SequenceNo = UInt;
