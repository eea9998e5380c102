//! The message facade: a JMS-shaped API over an in-memory AMQP message.
//!
//! [`JmsMessage`] is the shared base value (§9 "shape over inheritance"); the
//! body shape it currently carries is a [`JmsBody`] tag rather than a
//! subclass. Operations that care about body shape branch on that tag; every
//! other operation here applies uniformly regardless of it.

mod body;

pub use body::{BodyKind, JmsBody};

use std::cell::Cell;
use std::collections::BTreeMap;

use fe2o3_amqp_types::messaging::{
    message::Maybe, AmqpSequence, AmqpValue, ApplicationProperties, Body, Data, Header, Message,
    MessageAnnotations, MessageId, Properties,
};
use fe2o3_amqp_types::primitives::SimpleValue;
use serde_amqp::primitives::{Binary, OrderedMap, Symbol, Timestamp};
use serde_amqp::Value;

use crate::destination::{DestinationKind, DestinationSource, JmsDestination};
use crate::error::{Error, Result};
use crate::id;
use crate::section::{section_opt, with_section_field};

/// Message-Annotation key announcing which body variant this message carries.
pub const ANNOTATION_JMS_MSG_TYPE: &str = "x-opt-jms-msg-type";

/// Message-Annotation key marking a correlation-id as an application-chosen
/// string rather than a former JMSMessageID.
pub const ANNOTATION_APP_CORRELATION_ID: &str = "x-opt-app-correlation-id";

/// Application-Property key under which the ttl override round-trips.
pub const JMS_AMQP_TTL: &str = "JMS_AMQP_TTL";

type WireMessage = Message<Maybe<Value>>;

/// Parameters a producer-side facade needs from the surrounding session, kept
/// as plain interface parameters rather than a connection handle so the
/// facade can be constructed standalone in tests (§9 "Connection back-reference").
pub trait SendContext {
    /// The preferred content-type symbol for serialized object bodies, if any.
    fn preferred_object_content_type(&self) -> Option<Symbol> {
        None
    }
}

/// The JMS-shaped facade over one exclusively-owned AMQP message.
#[derive(Debug, Clone)]
pub struct JmsMessage {
    amqp: WireMessage,
    body: JmsBody,
    receive_time: Option<i64>,
    expiration_cache: Cell<Option<i64>>,
}

/* --------------------------- construction (§3.3, §4.E) -------------------------- */

impl JmsMessage {
    /// Creates an empty outgoing facade: Header with `durable=true`, the type
    /// annotation set, no Properties section (§3.2-3, P1).
    pub fn new_for_send(_ctx: &dyn SendContext, kind: BodyKind) -> Self {
        let mut annotations = MessageAnnotations::default();
        annotations.insert(
            Symbol::new(ANNOTATION_JMS_MSG_TYPE),
            Value::Byte(kind.annotation_code()),
        );

        let amqp = Message {
            header: Some(Header {
                durable: true,
                ..Default::default()
            }),
            delivery_annotations: None,
            message_annotations: Some(annotations),
            properties: None,
            application_properties: None,
            body: empty_body(),
            footer: None,
        };

        JmsMessage {
            amqp,
            body: JmsBody::new(kind),
            receive_time: None,
            expiration_cache: Cell::new(None),
        }
    }

    /// Wraps a decoded AMQP message for delivery to a consumer, recording the
    /// receive time used to synthesize `expiration` (§3.2-8).
    pub fn wrap_incoming(amqp: WireMessage, receive_time_millis: i64) -> Self {
        let kind = annotation_i8(
            amqp.message_annotations.as_ref(),
            ANNOTATION_JMS_MSG_TYPE,
        )
        .and_then(BodyKind::from_annotation_code)
        .unwrap_or_else(|| {
            tracing::debug!("incoming message carries no recognized {ANNOTATION_JMS_MSG_TYPE} annotation, defaulting to Opaque");
            BodyKind::Opaque
        });

        JmsMessage {
            amqp,
            body: JmsBody::new(kind),
            receive_time: Some(receive_time_millis),
            expiration_cache: Cell::new(None),
        }
    }

    /// The body-shape tag this facade currently carries.
    pub fn body_kind(&self) -> BodyKind {
        self.body.kind()
    }
}

fn empty_body() -> Body<Maybe<Value>> {
    Body::Value(AmqpValue(Maybe::Nothing))
}

/* ------------------------------- header fields (§4.C) ------------------------------ */

impl JmsMessage {
    fn header(&self) -> Option<&Header> {
        self.amqp.header.as_ref()
    }

    fn header_mut(&mut self) -> &mut Header {
        self.amqp.header.get_or_insert_with(Header::default)
    }

    /// `getDurable`.
    pub fn get_durable(&self) -> bool {
        section_opt(&self.amqp.header, false, |h| h.durable)
    }

    /// `setDurable`. Clears the field (leaves the section, if any) when set
    /// to `false`, the AMQP default (§3.2-2).
    pub fn set_durable(&mut self, durable: bool) {
        let creates = durable;
        with_section_field(&mut self.amqp.header, creates, |h| h.durable = durable);
    }

    /// `getPriority`. Any wire value `>= 9` is reported as `9` (§3.2-4).
    pub fn get_priority(&self) -> i32 {
        section_opt(&self.amqp.header, 4, |h| {
            let raw = h.priority.0 as i32;
            raw.min(9)
        })
    }

    /// `setPriority`. Clamps to `[0, 9]`; exactly `4` clears the field
    /// without creating a section (§3.2-4).
    pub fn set_priority(&mut self, priority: i32) {
        let clamped = priority.clamp(0, 9) as u8;
        let creates = clamped != 4;
        with_section_field(&mut self.amqp.header, creates, |h| {
            h.priority = clamped.into()
        });
    }

    /// `getDeliveryCount` (§3.2-5).
    pub fn get_delivery_count(&self) -> i32 {
        section_opt(&self.amqp.header, 0, |h| h.delivery_count as i32) + 1
    }

    /// `getRedelivered` (§3.2-5).
    pub fn get_redelivered(&self) -> bool {
        section_opt(&self.amqp.header, 0, |h| h.delivery_count) > 0
    }

    /// `getRedeliveryCount`, the raw wire `delivery-count` (§3.2-5).
    pub fn get_redelivery_count(&self) -> i32 {
        section_opt(&self.amqp.header, 0, |h| h.delivery_count as i32)
    }

    /// `setRedelivered`. `false` resets the count to zero; `true` on an
    /// already-redelivered message leaves the count unchanged (§3.2-5).
    pub fn set_redelivered(&mut self, redelivered: bool) {
        if redelivered {
            let already = section_opt(&self.amqp.header, 0, |h| h.delivery_count) > 0;
            if !already {
                with_section_field(&mut self.amqp.header, true, |h| h.delivery_count = 1);
            }
        } else {
            with_section_field(&mut self.amqp.header, false, |h| h.delivery_count = 0);
        }
    }

    /// `setRedeliveryCount`.
    pub fn set_redelivery_count(&mut self, count: i32) -> Result<()> {
        if count < 0 {
            return Err(Error::MessageFormat(format!(
                "redelivery count {count} must not be negative"
            )));
        }
        let creates = count != 0;
        with_section_field(&mut self.amqp.header, creates, |h| {
            h.delivery_count = count as u32
        });
        Ok(())
    }
}

fn annotation_i8(annotations: Option<&MessageAnnotations>, key: &str) -> Option<i8> {
    let annotations = annotations?;
    match annotations.get(&Symbol::new(key))? {
        Value::Byte(v) => Some(*v),
        _ => None,
    }
}

fn annotation_bool(annotations: Option<&MessageAnnotations>, key: &str) -> Option<bool> {
    let annotations = annotations?;
    match annotations.get(&Symbol::new(key))? {
        Value::Bool(v) => Some(*v),
        _ => None,
    }
}

/* ---------------------------- ttl / expiration (§3.2-7, §3.2-8) --------------------------- */

impl JmsMessage {
    fn application_properties_mut(&mut self) -> &mut ApplicationProperties {
        self.amqp
            .application_properties
            .get_or_insert_with(ApplicationProperties::default)
    }

    /// `getTtl`. Reads the override stashed in Application-Properties, never
    /// the Header (`onSend` is what finalizes Header.ttl).
    pub fn get_ttl(&self) -> i64 {
        self.amqp
            .application_properties
            .as_ref()
            .and_then(|p| p.get(JMS_AMQP_TTL))
            .and_then(|v| match v {
                SimpleValue::UInt(u) => Some(*u as i64),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// `setTtl`. `0` clears the override; any other value must fit in an
    /// unsigned 32-bit millisecond count.
    pub fn set_ttl(&mut self, ttl: i64) -> Result<()> {
        if !(0..=u32::MAX as i64).contains(&ttl) {
            return Err(Error::MessageFormat(format!(
                "ttl {ttl} is out of range for an unsigned 32-bit millisecond count"
            )));
        }
        if ttl == 0 {
            if let Some(props) = self.amqp.application_properties.as_mut() {
                props.remove(JMS_AMQP_TTL);
            }
        } else {
            self.application_properties_mut()
                .insert(JMS_AMQP_TTL.to_string(), SimpleValue::UInt(ttl as u32));
        }
        Ok(())
    }

    /// `getExpiration`. Backed by `Properties.absolute-expiry-time`; when
    /// absent on a received message with `Header.ttl` set, synthesizes and
    /// memoizes `receive-time + ttl` (§3.2-8).
    pub fn get_expiration(&self) -> i64 {
        if let Some(explicit) = self
            .amqp
            .properties
            .as_ref()
            .and_then(|p| p.absolute_expiry_time.as_ref())
        {
            return explicit.milliseconds();
        }
        if let Some(cached) = self.expiration_cache.get() {
            return cached;
        }
        if let (Some(header), Some(receive_time)) = (self.header(), self.receive_time) {
            if let Some(ttl) = header.ttl {
                let synthesized = receive_time + ttl as i64;
                tracing::trace!(receive_time, ttl, synthesized, "synthesizing expiration from receive-time and header ttl");
                self.expiration_cache.set(Some(synthesized));
                return synthesized;
            }
        }
        0
    }

    /// `setExpiration`. `0` clears the field without creating a Properties
    /// section.
    pub fn set_expiration(&mut self, expiration: i64) -> Result<()> {
        if expiration < 0 {
            return Err(Error::MessageFormat(format!(
                "expiration {expiration} must not be negative"
            )));
        }
        let creates = expiration != 0;
        with_section_field(&mut self.amqp.properties, creates, |p| {
            p.absolute_expiry_time = if expiration == 0 {
                None
            } else {
                Some(Timestamp::from_milliseconds(expiration))
            };
        });
        Ok(())
    }
}

/* --------------------------------- message id (§4.A, §4.C) -------------------------------- */

impl JmsMessage {
    fn properties_mut(&mut self) -> &mut Properties {
        self.amqp.properties.get_or_insert_with(Properties::default)
    }

    /// `getMessageId`.
    pub fn get_message_id(&self) -> Option<String> {
        let wire = self.amqp.properties.as_ref()?.message_id.as_ref()?;
        Some(id::encode(wire))
    }

    /// `setMessageId`. An `ID:`-prefixed string is decoded through the full
    /// id grammar; anything else is stored as a plain string id (§4.A, §4.C).
    pub fn set_message_id(&mut self, message_id: Option<String>) -> Result<()> {
        match message_id {
            None => {
                with_section_field(&mut self.amqp.properties, false, |p| p.message_id = None);
                Ok(())
            }
            Some(raw) => {
                let wire = parse_id_setter_input(&raw)?;
                self.properties_mut().message_id = Some(wire);
                Ok(())
            }
        }
    }

    /// `getCorrelationId`. When the application-correlation annotation marks
    /// this id as an arbitrary application string, it is returned verbatim
    /// without an `ID:` prefix (§4.A).
    pub fn get_correlation_id(&self) -> Option<String> {
        let wire = self.amqp.properties.as_ref()?.correlation_id.as_ref()?;
        let is_app_chosen =
            annotation_bool(self.amqp.message_annotations.as_ref(), ANNOTATION_APP_CORRELATION_ID)
                .unwrap_or(false);
        if is_app_chosen {
            if let MessageId::String(s) = wire {
                return Some(s.clone());
            }
        }
        Some(id::encode(wire))
    }

    /// `setCorrelationId`. A plain string (no `ID:` prefix) is treated as an
    /// application-chosen correlation id and marked with
    /// `x-opt-app-correlation-id=true`; an `ID:`-prefixed string is decoded
    /// as a former JMSMessageID and the annotation is cleared (§4.A, §4.C).
    pub fn set_correlation_id(&mut self, correlation_id: Option<String>) -> Result<()> {
        match correlation_id {
            None => {
                with_section_field(&mut self.amqp.properties, false, |p| {
                    p.correlation_id = None
                });
                self.remove_message_annotation(ANNOTATION_APP_CORRELATION_ID);
                Ok(())
            }
            Some(raw) => {
                if raw.starts_with("ID:") {
                    let wire = id::decode(&raw)?;
                    self.properties_mut().correlation_id = Some(wire);
                    self.remove_message_annotation(ANNOTATION_APP_CORRELATION_ID);
                } else {
                    self.properties_mut().correlation_id = Some(MessageId::String(raw));
                    self.set_message_annotation(ANNOTATION_APP_CORRELATION_ID, Value::Bool(true));
                }
                Ok(())
            }
        }
    }

    /// `getCorrelationIdBytes`.
    pub fn get_correlation_id_bytes(&self) -> Option<Vec<u8>> {
        match self.amqp.properties.as_ref()?.correlation_id.as_ref()? {
            MessageId::Binary(b) => Some(b.to_vec()),
            _ => None,
        }
    }

    /// `setCorrelationIdBytes`. Writes the binary id directly and clears the
    /// application-correlation annotation (§4.C).
    pub fn set_correlation_id_bytes(&mut self, bytes: Option<Vec<u8>>) {
        match bytes {
            None => with_section_field(&mut self.amqp.properties, false, |p| {
                p.correlation_id = None
            }),
            Some(b) => {
                self.properties_mut().correlation_id = Some(MessageId::Binary(Binary::from(b)));
            }
        }
        self.remove_message_annotation(ANNOTATION_APP_CORRELATION_ID);
    }
}

fn parse_id_setter_input(raw: &str) -> Result<MessageId> {
    if raw.starts_with("ID:") {
        Ok(id::decode(raw)?)
    } else {
        Ok(MessageId::String(raw.to_string()))
    }
}

/* ----------------------------- remaining Properties fields (§4.C) ---------------------------- */

impl JmsMessage {
    /// `getGroupId`.
    pub fn get_group_id(&self) -> Option<String> {
        self.amqp.properties.as_ref()?.group_id.clone()
    }

    /// `setGroupId`. `None` clears without creating a Properties section.
    pub fn set_group_id(&mut self, group_id: Option<String>) {
        let creates = group_id.is_some();
        with_section_field(&mut self.amqp.properties, creates, move |p| {
            p.group_id = group_id
        });
    }

    /// `getReplyToGroupId`.
    pub fn get_reply_to_group_id(&self) -> Option<String> {
        self.amqp.properties.as_ref()?.reply_to_group_id.clone()
    }

    /// `setReplyToGroupId`. `None` clears without creating a Properties section.
    pub fn set_reply_to_group_id(&mut self, reply_to_group_id: Option<String>) {
        let creates = reply_to_group_id.is_some();
        with_section_field(&mut self.amqp.properties, creates, move |p| {
            p.reply_to_group_id = reply_to_group_id
        });
    }

    /// `getGroupSequence`. The wire field is unsigned 32-bit; JMS sees the
    /// same bit pattern reinterpreted as signed (§3.2-6).
    pub fn get_group_sequence(&self) -> i32 {
        self.amqp
            .properties
            .as_ref()
            .and_then(|p| p.group_sequence)
            .map(|u| u as i32)
            .unwrap_or(0)
    }

    /// `setGroupSequence`. `0` clears the field, resolving the spec's open
    /// question in favor of the general default-elision rule (§3.2-2, §9).
    pub fn set_group_sequence(&mut self, value: i32) {
        let bits = value as u32;
        let creates = bits != 0;
        with_section_field(&mut self.amqp.properties, creates, move |p| {
            p.group_sequence = if bits == 0 { None } else { Some(bits) };
        });
    }

    /// `getType`, backed by `Properties.subject`.
    pub fn get_type(&self) -> Option<String> {
        self.amqp.properties.as_ref()?.subject.clone()
    }

    /// `setType`.
    pub fn set_type(&mut self, jms_type: Option<String>) {
        let creates = jms_type.is_some();
        with_section_field(&mut self.amqp.properties, creates, move |p| {
            p.subject = jms_type
        });
    }

    /// `getUserId`, decoded from the UTF-8 bytes stored in `Properties.user-id`.
    pub fn get_user_id(&self) -> Option<String> {
        let bytes = self.amqp.properties.as_ref()?.user_id.as_ref()?;
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    /// `setUserId`, stored as UTF-8 bytes.
    pub fn set_user_id(&mut self, user_id: Option<String>) {
        let creates = user_id.is_some();
        with_section_field(&mut self.amqp.properties, creates, move |p| {
            p.user_id = user_id.map(|s| Binary::from(s.into_bytes()))
        });
    }

    /// `getTimestamp`, backed by `Properties.creation-time` (milliseconds
    /// since epoch).
    pub fn get_timestamp(&self) -> i64 {
        self.amqp
            .properties
            .as_ref()
            .and_then(|p| p.creation_time.as_ref())
            .map(|t| t.milliseconds())
            .unwrap_or(0)
    }

    /// `setTimestamp`. `0` clears the field.
    pub fn set_timestamp(&mut self, timestamp: i64) -> Result<()> {
        if timestamp < 0 {
            return Err(Error::MessageFormat(format!(
                "timestamp {timestamp} must not be negative"
            )));
        }
        let creates = timestamp != 0;
        with_section_field(&mut self.amqp.properties, creates, move |p| {
            p.creation_time = if timestamp == 0 {
                None
            } else {
                Some(Timestamp::from_milliseconds(timestamp))
            };
        });
        Ok(())
    }
}

/* ------------------------------- destinations (§4.B, §4.C) ------------------------------ */

impl JmsMessage {
    /// `getDestination`. Falls back to the consumer's own destination kind
    /// when the `x-opt-jms-dest` hint is absent (§4.B).
    pub fn get_destination(&self, consumer: &dyn DestinationSource) -> Option<JmsDestination> {
        let address = self.amqp.properties.as_ref()?.to.clone()?;
        let kind = annotation_i8(
            self.amqp.message_annotations.as_ref(),
            crate::destination::ANNOTATION_JMS_DEST,
        )
        .and_then(DestinationKind::from_code)
        .unwrap_or_else(|| consumer.default_destination_kind());
        Some(JmsDestination { kind, address })
    }

    /// `setDestination`.
    pub fn set_destination(&mut self, destination: Option<JmsDestination>) {
        match destination {
            None => {
                with_section_field(&mut self.amqp.properties, false, |p| p.to = None);
                self.remove_message_annotation(crate::destination::ANNOTATION_JMS_DEST);
            }
            Some(dest) => {
                self.properties_mut().to = Some(dest.address);
                self.set_message_annotation(
                    crate::destination::ANNOTATION_JMS_DEST,
                    Value::Byte(dest.kind.code()),
                );
            }
        }
    }

    /// `getReplyTo`.
    pub fn get_reply_to(&self, consumer: &dyn DestinationSource) -> Option<JmsDestination> {
        let address = self.amqp.properties.as_ref()?.reply_to.clone()?;
        let kind = annotation_i8(
            self.amqp.message_annotations.as_ref(),
            crate::destination::ANNOTATION_JMS_REPLY_TO,
        )
        .and_then(DestinationKind::from_code)
        .unwrap_or_else(|| consumer.default_destination_kind());
        Some(JmsDestination { kind, address })
    }

    /// `setReplyTo`.
    pub fn set_reply_to(&mut self, reply_to: Option<JmsDestination>) {
        match reply_to {
            None => {
                with_section_field(&mut self.amqp.properties, false, |p| p.reply_to = None);
                self.remove_message_annotation(crate::destination::ANNOTATION_JMS_REPLY_TO);
            }
            Some(dest) => {
                self.properties_mut().reply_to = Some(dest.address);
                self.set_message_annotation(
                    crate::destination::ANNOTATION_JMS_REPLY_TO,
                    Value::Byte(dest.kind.code()),
                );
            }
        }
    }
}

/* ------------------------------- message annotations (§4.C) ------------------------------ */

impl JmsMessage {
    /// `messageAnnotationExists`.
    pub fn message_annotation_exists(&self, name: &str) -> bool {
        self.amqp
            .message_annotations
            .as_ref()
            .map(|a| a.contains_key(&Symbol::new(name)))
            .unwrap_or(false)
    }

    /// `getMessageAnnotation`.
    pub fn get_message_annotation(&self, name: &str) -> Option<&Value> {
        self.amqp
            .message_annotations
            .as_ref()
            .and_then(|a| a.get(&Symbol::new(name)))
    }

    /// `setMessageAnnotation`.
    pub fn set_message_annotation(&mut self, name: impl Into<String>, value: Value) {
        self.amqp
            .message_annotations
            .get_or_insert_with(MessageAnnotations::default)
            .insert(Symbol::new(name.into()), value);
    }

    /// `removeMessageAnnotation`.
    pub fn remove_message_annotation(&mut self, name: &str) {
        if let Some(annotations) = self.amqp.message_annotations.as_mut() {
            annotations.remove(&Symbol::new(name));
        }
    }

    /// `clearMessageAnnotations`. Unlike a single-field clear, this drops the
    /// whole section.
    pub fn clear_message_annotations(&mut self) {
        self.amqp.message_annotations = None;
    }
}

/* ----------------------------- application properties (§4.C) ---------------------------- */

impl JmsMessage {
    /// `getPropertyNames`.
    pub fn get_property_names(&self) -> Vec<String> {
        self.amqp
            .application_properties
            .as_ref()
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// `hasProperty`. A `None` key is not an error here; it simply reports `false`.
    pub fn has_property(&self, key: Option<&str>) -> bool {
        match (key, self.amqp.application_properties.as_ref()) {
            (Some(key), Some(props)) => props.contains_key(key),
            _ => false,
        }
    }

    /// `getProperty`. A `None` key is not an error here; it simply reports `None`.
    pub fn get_property(&self, key: Option<&str>) -> Option<SimpleValue> {
        let key = key?;
        self.amqp
            .application_properties
            .as_ref()
            .and_then(|p| p.get(key))
            .cloned()
    }

    /// `setProperty`. A `None` key is an [`Error::IllegalArgument`], distinct
    /// from a message-format error (§4.C, §7).
    pub fn set_property(&mut self, key: Option<String>, value: SimpleValue) -> Result<()> {
        let key = key.ok_or_else(|| {
            tracing::debug!("rejected application property with a null key");
            Error::IllegalArgument("application property key must not be null".to_string())
        })?;
        self.application_properties_mut().insert(key, value);
        Ok(())
    }

    /// `clearProperties`. Drops the whole Application-Properties section.
    pub fn clear_properties(&mut self) {
        self.amqp.application_properties = None;
    }
}

/* ------------------------------- lifecycle ops (§4.C, §4.E) ------------------------------ */

impl JmsMessage {
    /// `onSend(producerTtl)`. Finalizes Header fields immediately before the
    /// transport encodes the message (§3.2-7, P5).
    pub fn on_send(&mut self, producer_ttl: i64) -> Result<()> {
        tracing::trace!(producer_ttl, "finalizing header fields before send");
        let override_ttl = self
            .amqp
            .application_properties
            .as_ref()
            .and_then(|p| p.get(JMS_AMQP_TTL))
            .and_then(|v| match v {
                SimpleValue::UInt(u) => Some(*u),
                _ => None,
            });

        match override_ttl {
            Some(ttl) => self.header_mut().ttl = Some(ttl),
            None if producer_ttl > 0 => {
                let ttl = producer_ttl.min(u32::MAX as i64) as u32;
                self.header_mut().ttl = Some(ttl);
            }
            None => {
                if let Some(header) = self.amqp.header.as_mut() {
                    header.ttl = None;
                }
            }
        }

        self.set_message_annotation(ANNOTATION_JMS_MSG_TYPE, Value::Byte(self.body.kind().annotation_code()));

        let durable = self.get_durable();
        self.header_mut().durable = durable;

        Ok(())
    }

    /// `copy()`. Deep-clones the AMQP message, the receive-time cache, and
    /// any synthesized expiration; there is no connection reference to share
    /// in this standalone facade (§4.C).
    pub fn copy(&self) -> Self {
        JmsMessage {
            amqp: self.amqp.clone(),
            body: self.body.clone(),
            receive_time: self.receive_time,
            expiration_cache: Cell::new(self.expiration_cache.get()),
        }
    }

    /// `clearBody()`. Detaches the body; no other section is touched.
    pub fn clear_body(&mut self) {
        self.amqp.body = empty_body();
        self.body.reset();
    }
}

/* -------------------------------- typed body facades (§4.D) ------------------------------- */

impl JmsMessage {
    fn require_kind(&self, expected: BodyKind) -> Result<()> {
        if self.body.kind() != expected {
            return Err(Error::IllegalArgument(format!(
                "message body is {:?}, not {:?}",
                self.body.kind(),
                expected
            )));
        }
        Ok(())
    }

    /// Text body getter. Accepts both an `AmqpValue(String)` and a `Data`
    /// section read as UTF-8, for compatibility with peers that sent the
    /// latter (§4.D).
    pub fn get_text(&self) -> Result<Option<String>> {
        self.require_kind(BodyKind::Text)?;
        Ok(match &self.amqp.body {
            Body::Value(AmqpValue(Maybe::Just(Value::String(s)))) => Some(s.clone()),
            Body::Value(AmqpValue(Maybe::Nothing)) => None,
            Body::Data(Data(bytes)) => String::from_utf8(bytes.to_vec()).ok(),
            _ => None,
        })
    }

    /// Text body setter. Always writes an `AmqpValue(String)` (§4.D).
    pub fn set_text(&mut self, text: Option<String>) -> Result<()> {
        self.require_kind(BodyKind::Text)?;
        self.amqp.body = match text {
            Some(s) => Body::Value(AmqpValue(Maybe::Just(Value::String(s)))),
            None => empty_body(),
        };
        Ok(())
    }

    /// Bytes body setter. Replaces the `Data` section and resets the read
    /// cursor to the head of the buffer (§4.D, §4.E).
    pub fn set_bytes(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.require_kind(BodyKind::Bytes)?;
        self.amqp.body = Body::Data(Data(Binary::from(bytes)));
        self.body.reset();
        Ok(())
    }

    /// Bytes body cursor-based read: copies up to `buf.len()` bytes starting
    /// at the current cursor position, advances the cursor, and returns the
    /// number of bytes copied (`0` at end of body) (§4.E).
    pub fn read_bytes(&self, buf: &mut [u8]) -> Result<usize> {
        self.require_kind(BodyKind::Bytes)?;
        let JmsBody::Bytes { read_position } = &self.body else {
            return Err(Error::Internal("bytes body missing its cursor".to_string()));
        };
        let data = match &self.amqp.body {
            Body::Data(Data(bytes)) => bytes.as_ref(),
            _ => return Ok(0),
        };
        let pos = read_position.get();
        if pos >= data.len() {
            return Ok(0);
        }
        let n = buf.len().min(data.len() - pos);
        buf[..n].copy_from_slice(&data[pos..pos + n]);
        read_position.set(pos + n);
        Ok(n)
    }

    /// Resets the bytes/stream read cursor to the head of the body (§4.E).
    pub fn reset(&self) {
        self.body.reset();
    }

    /// Map body setter. Keys are unique strings; insertion order is not
    /// meaningful (§4.D).
    pub fn set_map(&mut self, map: BTreeMap<String, SimpleValue>) -> Result<()> {
        self.require_kind(BodyKind::Map)?;
        let mut wire = OrderedMap::default();
        for (k, v) in map {
            wire.insert(Value::String(k), Value::from(v));
        }
        self.amqp.body = Body::Value(AmqpValue(Maybe::Just(Value::Map(wire))));
        Ok(())
    }

    /// Map body getter.
    pub fn get_map(&self) -> Result<BTreeMap<String, SimpleValue>> {
        self.require_kind(BodyKind::Map)?;
        let mut out = BTreeMap::new();
        if let Body::Value(AmqpValue(Maybe::Just(Value::Map(wire)))) = &self.amqp.body {
            for (k, v) in wire.as_inner() {
                let key = match k {
                    Value::String(s) => s.clone(),
                    other => {
                        return Err(Error::Internal(format!(
                            "non-string map body key: {other:?}"
                        )))
                    }
                };
                let value = SimpleValue::try_from(v.clone())
                    .map_err(|_| Error::Internal(format!("non-primitive map body value for {key}")))?;
                out.insert(key, value);
            }
        }
        Ok(out)
    }

    /// Stream body setter: an ordered, heterogeneous sequence of primitives (§4.D).
    pub fn set_stream(&mut self, items: Vec<SimpleValue>) -> Result<()> {
        self.require_kind(BodyKind::Stream)?;
        let values = items.into_iter().map(|v| Maybe::Just(Value::from(v))).collect();
        self.amqp.body = Body::Sequence(AmqpSequence(values));
        self.body.reset();
        Ok(())
    }

    /// Stream body cursor-based read: returns the next element, advancing
    /// the cursor, or `None` at the end of the sequence (§4.D, §4.E).
    pub fn read_stream_element(&self) -> Result<Option<SimpleValue>> {
        self.require_kind(BodyKind::Stream)?;
        let JmsBody::Stream { read_position } = &self.body else {
            return Err(Error::Internal("stream body missing its cursor".to_string()));
        };
        let items = match &self.amqp.body {
            Body::Sequence(AmqpSequence(items)) => items,
            _ => return Ok(None),
        };
        let pos = read_position.get();
        let Some(Maybe::Just(value)) = items.get(pos) else {
            return Ok(None);
        };
        read_position.set(pos + 1);
        SimpleValue::try_from(value.clone())
            .map(Some)
            .map_err(|_| Error::Internal(format!("non-primitive stream element at index {pos}")))
    }

    /// Object body setter: a serializer-opaque byte blob (§4.D). The facade
    /// stores and retrieves bytes only; serialization is an external
    /// collaborator.
    pub fn set_object_bytes(&mut self, bytes: Vec<u8>, content_type: Option<Symbol>) -> Result<()> {
        self.require_kind(BodyKind::Object)?;
        self.amqp.body = Body::Data(Data(Binary::from(bytes)));
        if let Some(content_type) = content_type {
            self.properties_mut().content_type = Some(content_type);
        }
        Ok(())
    }

    /// Object body getter.
    pub fn get_object_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.require_kind(BodyKind::Object)?;
        Ok(match &self.amqp.body {
            Body::Data(Data(bytes)) => Some(bytes.to_vec()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests;
