use super::*;
use crate::destination::{DestinationKind, JmsDestination};

struct NullSendContext;
impl SendContext for NullSendContext {}

struct QueueConsumer;
impl DestinationSource for QueueConsumer {
    fn default_destination_kind(&self) -> DestinationKind {
        DestinationKind::Queue
    }
}

#[test]
fn new_for_send_has_no_properties_section_and_is_durable() {
    let msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    assert!(msg.get_durable());
    assert_eq!(msg.get_priority(), 4);
    assert!(msg.amqp.properties.is_none());
    assert_eq!(msg.body_kind(), BodyKind::Text);
}

#[test]
fn priority_clamps_above_nine_and_four_clears_the_field() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    msg.set_priority(15);
    assert_eq!(msg.get_priority(), 9);

    msg.set_priority(4);
    assert_eq!(msg.get_priority(), 4);
    // the section survives (durable still lives there), but the field reads back as the default
    assert_eq!(msg.header().unwrap().priority.0, 4);
}

#[test]
fn ttl_override_wins_over_producer_default_ttl_on_send() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    msg.set_ttl(5_000).unwrap();
    msg.on_send(60_000).unwrap();
    assert_eq!(msg.header().unwrap().ttl, Some(5_000));
}

#[test]
fn producer_ttl_applies_when_no_override_is_set() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    msg.on_send(60_000).unwrap();
    assert_eq!(msg.header().unwrap().ttl, Some(60_000));
}

#[test]
fn zero_producer_ttl_and_no_override_means_no_ttl() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    msg.on_send(0).unwrap();
    assert_eq!(msg.header().unwrap().ttl, None);
}

#[test]
fn delivery_count_and_redelivered_track_together() {
    let amqp = Message {
        header: None,
        delivery_annotations: None,
        message_annotations: None,
        properties: None,
        application_properties: None,
        body: empty_body(),
        footer: None,
    };
    let mut msg = JmsMessage::wrap_incoming(amqp, 0);
    assert_eq!(msg.get_delivery_count(), 1);
    assert!(!msg.get_redelivered());

    msg.set_redelivered(true);
    assert!(msg.get_redelivered());
    assert_eq!(msg.get_delivery_count(), 2);

    msg.set_redelivered(false);
    assert!(!msg.get_redelivered());
    assert_eq!(msg.get_delivery_count(), 1);
}

#[test]
fn correlation_id_distinguishes_app_chosen_from_former_message_id() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);

    msg.set_correlation_id(Some("order-42".to_string())).unwrap();
    assert_eq!(msg.get_correlation_id().as_deref(), Some("order-42"));
    assert!(msg.message_annotation_exists(ANNOTATION_APP_CORRELATION_ID));

    msg.set_correlation_id(Some("ID:AMQP_ULONG:7".to_string())).unwrap();
    assert_eq!(msg.get_correlation_id().as_deref(), Some("ID:AMQP_ULONG:7"));
    assert!(!msg.message_annotation_exists(ANNOTATION_APP_CORRELATION_ID));
}

#[test]
fn message_id_round_trips_through_the_binary_tag() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    msg.set_message_id(Some("ID:AMQP_BINARY:0A09080706050403".to_string()))
        .unwrap();
    assert_eq!(
        msg.get_message_id().as_deref(),
        Some("ID:AMQP_BINARY:0A09080706050403")
    );
}

#[test]
fn group_sequence_reinterprets_bits_and_zero_clears() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    msg.set_group_sequence(-1);
    assert_eq!(msg.get_group_sequence(), -1);
    assert_eq!(
        msg.amqp.properties.as_ref().unwrap().group_sequence,
        Some(u32::MAX)
    );

    msg.set_group_sequence(0);
    assert_eq!(msg.get_group_sequence(), 0);
    assert_eq!(msg.amqp.properties.as_ref().unwrap().group_sequence, None);
}

#[test]
fn expiration_is_synthesized_once_from_receive_time_and_ttl_then_memoized() {
    let amqp = Message {
        header: Some(Header {
            ttl: Some(30_000),
            ..Default::default()
        }),
        delivery_annotations: None,
        message_annotations: None,
        properties: None,
        application_properties: None,
        body: empty_body(),
        footer: None,
    };
    let msg = JmsMessage::wrap_incoming(amqp, 1_000);
    assert_eq!(msg.get_expiration(), 31_000);
    // calling again must hit the memoized value, not recompute
    assert_eq!(msg.get_expiration(), 31_000);
}

#[test]
fn explicit_expiration_wins_over_synthesis() {
    let amqp = Message {
        header: Some(Header {
            ttl: Some(30_000),
            ..Default::default()
        }),
        delivery_annotations: None,
        message_annotations: None,
        properties: Some(Properties {
            absolute_expiry_time: Some(Timestamp::from_milliseconds(99_999)),
            ..Properties::new()
        }),
        application_properties: None,
        body: empty_body(),
        footer: None,
    };
    let msg = JmsMessage::wrap_incoming(amqp, 1_000);
    assert_eq!(msg.get_expiration(), 99_999);
}

#[test]
fn destination_round_trips_with_its_kind_annotation() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    msg.set_destination(Some(JmsDestination::new(DestinationKind::Topic, "orders")));
    let consumer = QueueConsumer;
    let dest = msg.get_destination(&consumer).unwrap();
    assert_eq!(dest.kind, DestinationKind::Topic);
    assert_eq!(dest.address, "orders");
}

#[test]
fn destination_without_annotation_falls_back_to_consumer_default_kind() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    msg.properties_mut().to = Some("orders".to_string());
    let consumer = QueueConsumer;
    let dest = msg.get_destination(&consumer).unwrap();
    assert_eq!(dest.kind, DestinationKind::Queue);
}

#[test]
fn text_body_round_trips() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    msg.set_text(Some("hello".to_string())).unwrap();
    assert_eq!(msg.get_text().unwrap().as_deref(), Some("hello"));
    msg.clear_body();
    assert_eq!(msg.get_text().unwrap(), None);
}

#[test]
fn bytes_body_cursor_reads_advance_and_reset() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Bytes);
    msg.set_bytes(vec![1, 2, 3, 4, 5]).unwrap();

    let mut buf = [0u8; 2];
    assert_eq!(msg.read_bytes(&mut buf).unwrap(), 2);
    assert_eq!(buf, [1, 2]);
    assert_eq!(msg.read_bytes(&mut buf).unwrap(), 2);
    assert_eq!(buf, [3, 4]);
    assert_eq!(msg.read_bytes(&mut buf).unwrap(), 1);
    assert_eq!(msg.read_bytes(&mut buf).unwrap(), 0);

    msg.reset();
    assert_eq!(msg.read_bytes(&mut buf).unwrap(), 2);
    assert_eq!(buf, [1, 2]);
}

#[test]
fn map_body_round_trips_primitive_values() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Map);
    let mut map = BTreeMap::new();
    map.insert("count".to_string(), SimpleValue::UInt(3));
    map.insert("name".to_string(), SimpleValue::String("widget".to_string()));
    msg.set_map(map.clone()).unwrap();
    assert_eq!(msg.get_map().unwrap(), map);
}

#[test]
fn stream_body_cursor_reads_each_element_once() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Stream);
    msg.set_stream(vec![SimpleValue::UInt(1), SimpleValue::UInt(2)])
        .unwrap();
    assert_eq!(msg.read_stream_element().unwrap(), Some(SimpleValue::UInt(1)));
    assert_eq!(msg.read_stream_element().unwrap(), Some(SimpleValue::UInt(2)));
    assert_eq!(msg.read_stream_element().unwrap(), None);
}

#[test]
fn wrong_body_kind_accessor_is_rejected() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    assert!(msg.set_bytes(vec![1]).is_err());
}

#[test]
fn copy_is_a_deep_clone_independent_of_the_original() {
    let mut msg = JmsMessage::new_for_send(&NullSendContext, BodyKind::Text);
    msg.set_text(Some("original".to_string())).unwrap();
    let mut copied = msg.copy();
    copied.set_text(Some("changed".to_string())).unwrap();
    assert_eq!(msg.get_text().unwrap().as_deref(), Some("original"));
    assert_eq!(copied.get_text().unwrap().as_deref(), Some("changed"));
}
