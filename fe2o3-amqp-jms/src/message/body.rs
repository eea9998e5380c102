//! The body-shape tag shared by the five typed body facades (§4.D).
//!
//! The base facade holds the common state; body-shape-specific behavior
//! branches on this tag instead of living in a class per shape. Only the
//! cursor-bearing variants (`Bytes`, `Stream`) carry their own state — the
//! actual body content lives in the base facade's AMQP message, not here.

use std::cell::Cell;

/// The six body shapes, and the integer each is announced as via the
/// `x-opt-jms-msg-type` message-annotation (§3.2-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Opaque/none: body absent or arbitrary, no body accessor.
    Opaque = 0,
    /// A serialized object graph, stored as opaque bytes.
    Object = 1,
    /// A map of string keys to AMQP primitives.
    Map = 2,
    /// An opaque byte sequence with a cursor-based read API.
    Bytes = 3,
    /// An ordered, heterogeneous sequence with a cursor-based read API.
    Stream = 4,
    /// A single UTF-8 string.
    Text = 5,
}

impl BodyKind {
    /// The wire code written into `x-opt-jms-msg-type`.
    pub fn annotation_code(self) -> i8 {
        self as i8
    }

    /// Recovers a [`BodyKind`] from its wire code, if recognized.
    pub fn from_annotation_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Self::Opaque),
            1 => Some(Self::Object),
            2 => Some(Self::Map),
            3 => Some(Self::Bytes),
            4 => Some(Self::Stream),
            5 => Some(Self::Text),
            _ => None,
        }
    }
}

/// The body-shape tag plus the minimal per-shape state (read cursors).
///
/// This is the "shape over inheritance" encoding from §9: one tagged variant
/// instead of a facade class per body kind.
#[derive(Debug, Clone)]
pub enum JmsBody {
    /// See [`BodyKind::Opaque`].
    Opaque,
    /// See [`BodyKind::Object`].
    Object,
    /// See [`BodyKind::Map`].
    Map,
    /// See [`BodyKind::Bytes`]. The cursor starts at the head of the buffer
    /// and is reset to zero by `reset()`/on a fresh write (§4.E).
    Bytes {
        /// Current read offset into the body's bytes.
        read_position: Cell<usize>,
    },
    /// See [`BodyKind::Stream`]. The cursor indexes into the sequence.
    Stream {
        /// Current read offset into the body's sequence.
        read_position: Cell<usize>,
    },
    /// See [`BodyKind::Text`].
    Text,
}

impl JmsBody {
    /// Constructs the tag for a given [`BodyKind`], initializing any cursor
    /// state to its starting position.
    pub fn new(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Opaque => Self::Opaque,
            BodyKind::Object => Self::Object,
            BodyKind::Map => Self::Map,
            BodyKind::Bytes => Self::Bytes {
                read_position: Cell::new(0),
            },
            BodyKind::Stream => Self::Stream {
                read_position: Cell::new(0),
            },
            BodyKind::Text => Self::Text,
        }
    }

    /// The [`BodyKind`] this tag carries.
    pub fn kind(&self) -> BodyKind {
        match self {
            Self::Opaque => BodyKind::Opaque,
            Self::Object => BodyKind::Object,
            Self::Map => BodyKind::Map,
            Self::Bytes { .. } => BodyKind::Bytes,
            Self::Stream { .. } => BodyKind::Stream,
            Self::Text => BodyKind::Text,
        }
    }

    /// Resets the read cursor to the head of the body, for variants that have one.
    /// A no-op for variants without a cursor.
    pub fn reset(&self) {
        match self {
            Self::Bytes { read_position } | Self::Stream { read_position } => {
                read_position.set(0)
            }
            _ => {}
        }
    }
}
