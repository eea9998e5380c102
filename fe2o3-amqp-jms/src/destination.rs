//! Translation between a typed JMS destination and the AMQP `to`/`reply-to`
//! address plus its annotation hint.

/// Message-Annotation key that carries the destination-kind hint for `to`.
pub const ANNOTATION_JMS_DEST: &str = "x-opt-jms-dest";

/// Message-Annotation key that carries the destination-kind hint for `reply-to`.
pub const ANNOTATION_JMS_REPLY_TO: &str = "x-opt-jms-reply-to";

/// The four JMS destination kinds, encoded on the wire as a small integer in
/// `x-opt-jms-dest` / `x-opt-jms-reply-to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    /// A point-to-point queue.
    Queue = 0,
    /// A publish/subscribe topic.
    Topic = 1,
    /// A session-scoped temporary queue.
    TempQueue = 2,
    /// A session-scoped temporary topic.
    TempTopic = 3,
}

impl DestinationKind {
    /// The small integer this kind is encoded as on the wire.
    pub fn code(self) -> i8 {
        self as i8
    }

    /// Recovers a [`DestinationKind`] from its wire code, if recognized.
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Self::Queue),
            1 => Some(Self::Topic),
            2 => Some(Self::TempQueue),
            3 => Some(Self::TempTopic),
            _ => None,
        }
    }
}

/// A typed JMS destination: an AMQP address string plus the kind it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JmsDestination {
    /// Which of the four JMS destination kinds this is.
    pub kind: DestinationKind,
    /// The AMQP node address.
    pub address: String,
}

impl JmsDestination {
    /// Creates a new [`JmsDestination`].
    pub fn new(kind: DestinationKind, address: impl Into<String>) -> Self {
        Self {
            kind,
            address: address.into(),
        }
    }
}

/// Exposes the consumer's own destination kind, used as the default when an
/// incoming message carries no destination-kind annotation.
pub trait DestinationSource {
    /// The destination kind this consumer was created against.
    fn default_destination_kind(&self) -> DestinationKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_kind_code_round_trips() {
        for kind in [
            DestinationKind::Queue,
            DestinationKind::Topic,
            DestinationKind::TempQueue,
            DestinationKind::TempTopic,
        ] {
            assert_eq!(DestinationKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn unrecognized_code_is_none() {
        assert_eq!(DestinationKind::from_code(99), None);
    }
}
