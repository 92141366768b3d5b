//! End-to-end scenarios against literal wire fixtures, reproducing the
//! behavior the original C test suite (`test_messages.cpp`,
//! `group_test.cpp`, `mixed_test.cpp`) exercised for this parser core.

use fix_parser_rs::schema::{Classifier, ClassifierLookup, FixVersion, NodeSpec};
use fix_parser_rs::tag;
use fix_parser_rs::Parser;

static NEW_ORDER_SINGLE: NodeSpec = NodeSpec {
    valid_tags: &[
        tag::MSG_SEQ_NUM,
        tag::SENDER_COMP_ID,
        tag::SENDING_TIME,
        tag::TARGET_COMP_ID,
        tag::ACCOUNT,
        tag::CL_ORD_ID,
        tag::HANDL_INST,
        tag::ORD_TYPE,
        tag::PRICE,
        tag::SIDE,
        tag::TIME_IN_FORCE,
        tag::TRANSACT_TIME,
    ],
    data_tags: &[],
    group_tags: &[],
    leading_tag: 0,
};

static MD_ENTRY: NodeSpec = NodeSpec {
    valid_tags: &[
        tag::MD_UPDATE_ACTION,
        tag::MD_ENTRY_TYPE,
        tag::MD_ENTRY_ID,
        tag::SYMBOL,
        tag::MD_ENTRY_PX,
        tag::CURRENCY,
        tag::MD_ENTRY_SIZE,
        tag::NUM_REPORTS,
    ],
    data_tags: &[],
    group_tags: &[],
    leading_tag: tag::MD_UPDATE_ACTION,
};

static MARKET_DATA_SNAPSHOT: NodeSpec = NodeSpec {
    valid_tags: &[
        tag::SENDER_COMP_ID,
        tag::TARGET_COMP_ID,
        tag::MSG_SEQ_NUM,
        tag::SENDING_TIME,
        tag::MD_REQ_ID,
        tag::NO_MD_ENTRIES,
    ],
    data_tags: &[],
    group_tags: &[(tag::NO_MD_ENTRIES, &MD_ENTRY)],
    leading_tag: 0,
};

static RAW_DATA_CARRIER: NodeSpec = NodeSpec {
    valid_tags: &[tag::MSG_SEQ_NUM, tag::RAW_DATA_LENGTH, tag::RAW_DATA],
    data_tags: &[(tag::RAW_DATA_LENGTH, tag::RAW_DATA)],
    group_tags: &[],
    leading_tag: 0,
};

// A ten-level chain of NoNestedPartyIDs groups, one schema per nesting
// level, exercising the group-depth cap (§6.3, MAX_GROUP_DEPTH = 10).
// Level 10 also declares a (never-actually-reached) group tag so that an
// 11th repetition is recognised as "a group" and hits the depth check,
// rather than being rejected as simply an unrecognised tag.
static NESTED_PARTY_D10: NodeSpec = NodeSpec {
    valid_tags: &[tag::NESTED_PARTY_ID, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D1)],
    leading_tag: tag::NESTED_PARTY_ID,
};
static NESTED_PARTY_D9: NodeSpec = NodeSpec {
    valid_tags: &[tag::NESTED_PARTY_ID, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D10)],
    leading_tag: tag::NESTED_PARTY_ID,
};
static NESTED_PARTY_D8: NodeSpec = NodeSpec {
    valid_tags: &[tag::NESTED_PARTY_ID, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D9)],
    leading_tag: tag::NESTED_PARTY_ID,
};
static NESTED_PARTY_D7: NodeSpec = NodeSpec {
    valid_tags: &[tag::NESTED_PARTY_ID, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D8)],
    leading_tag: tag::NESTED_PARTY_ID,
};
static NESTED_PARTY_D6: NodeSpec = NodeSpec {
    valid_tags: &[tag::NESTED_PARTY_ID, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D7)],
    leading_tag: tag::NESTED_PARTY_ID,
};
static NESTED_PARTY_D5: NodeSpec = NodeSpec {
    valid_tags: &[tag::NESTED_PARTY_ID, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D6)],
    leading_tag: tag::NESTED_PARTY_ID,
};
static NESTED_PARTY_D4: NodeSpec = NodeSpec {
    valid_tags: &[tag::NESTED_PARTY_ID, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D5)],
    leading_tag: tag::NESTED_PARTY_ID,
};
static NESTED_PARTY_D3: NodeSpec = NodeSpec {
    valid_tags: &[tag::NESTED_PARTY_ID, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D4)],
    leading_tag: tag::NESTED_PARTY_ID,
};
static NESTED_PARTY_D2: NodeSpec = NodeSpec {
    valid_tags: &[tag::NESTED_PARTY_ID, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D3)],
    leading_tag: tag::NESTED_PARTY_ID,
};
static NESTED_PARTY_D1: NodeSpec = NodeSpec {
    valid_tags: &[tag::NESTED_PARTY_ID, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D2)],
    leading_tag: tag::NESTED_PARTY_ID,
};

static NESTED_PARTY_ROOT: NodeSpec = NodeSpec {
    valid_tags: &[tag::MSG_SEQ_NUM, tag::NO_NESTED_PARTY_IDS],
    data_tags: &[],
    group_tags: &[(tag::NO_NESTED_PARTY_IDS, &NESTED_PARTY_D1)],
    leading_tag: 0,
};

fn lookup(_version: FixVersion, msg_type: &str) -> Option<&'static dyn Classifier> {
    match msg_type {
        "D" => Some(&NEW_ORDER_SINGLE),
        "X" => Some(&MARKET_DATA_SNAPSHOT),
        "Q" => Some(&RAW_DATA_CARRIER),
        "N" => Some(&NESTED_PARTY_ROOT),
        _ => None,
    }
}

fn parser() -> Parser<fn(FixVersion, &str) -> Option<&'static dyn Classifier>> {
    Parser::new(lookup)
}

const S1: &[u8] = b"8=FIX.4.4\x019=122\x0135=D\x0134=215\x0149=CLIENT12\x0152=20100225-19:41:57.316\x0156=B\x011=Marcel\x0111=13346\x0121=1\x0140=2\x0144=5\x0154=1\x0159=0\x0160=20100225-19:39:52.020\x0110=072\x01";

const S2: &[u8] = b"8=FIX.4.2\x019=196\x0135=X\x0149=A\x0156=B\x0134=12\x0152=20100318-03:21:11.364\x01262=A\x01268=2\x01279=0\x01269=0\x01278=BID\x0155=EUR/USD\x01270=1.37215\x0115=EUR\x01271=2500000\x01346=1\x01279=0\x01269=1\x01278=OFFER\x0155=EUR/USD\x01270=1.37224\x0115=EUR\x01271=2503200\x01346=1\x0110=171\x01";

// Same fields as S2, but `34=12` (MsgSeqNum) relocated to after the group.
const S3: &[u8] = b"8=FIX.4.2\x019=196\x0135=X\x0149=A\x0156=B\x0152=20100318-03:21:11.364\x01262=A\x01268=2\x01279=0\x01269=0\x01278=BID\x0155=EUR/USD\x01270=1.37215\x0115=EUR\x01271=2500000\x01346=1\x01279=0\x01269=1\x01278=OFFER\x0155=EUR/USD\x01270=1.37224\x0115=EUR\x01271=2503200\x01346=1\x0134=12\x0110=171\x01";

#[test]
fn s1_simple_message_fields_and_timestamp() {
    let mut p = parser();
    let mut messages = p.feed(S1);
    let msg = messages.next().expect("one message");

    assert!(msg.is_ok(), "unexpected error: {:?}", msg.error());
    assert_eq!(msg.version(), FixVersion::Fix4_4);
    assert_eq!(msg.msg_type(), "D");

    let root = msg.root();
    assert_eq!(root.size(), 12);
    assert_eq!(root.get_as_str(tag::SENDER_COMP_ID), Some("CLIENT12"));

    let ts = root.get(tag::TRANSACT_TIME).unwrap().as_utc_timestamp().unwrap();
    assert_eq!((ts.year, ts.month, ts.day), (2010, 2, 25));
    assert_eq!((ts.hour, ts.minute, ts.second, ts.milli), (19, 39, 52, 20));

    assert!(messages.next().is_none());
}

#[test]
fn s2_groups_are_recursively_structured() {
    let mut p = parser();
    let mut messages = p.feed(S2);
    let msg = messages.next().expect("one message");

    assert!(msg.is_ok(), "unexpected error: {:?}", msg.error());
    assert_eq!(msg.version(), FixVersion::Fix4_2);
    assert_eq!(msg.msg_type(), "X");

    let root = msg.root();
    assert_eq!(root.size(), 6);

    let group = root.get(tag::NO_MD_ENTRIES).expect("group header present");
    assert_eq!(group.length(), 2);

    let first = group.group().expect("first child node");
    assert_eq!(first.size(), 8);
    assert_eq!(first.get_as_str(tag::MD_ENTRY_ID), Some("BID"));
    assert_eq!(first.get_as_decimal(tag::MD_ENTRY_PX), Some((137215, 5)));

    let second = first.next().expect("second repetition");
    assert_eq!(second.get_as_str(tag::MD_ENTRY_ID), Some("OFFER"));
    assert_eq!(second.get_as_decimal(tag::MD_ENTRY_PX), Some((137224, 5)));
    assert!(second.next().is_none());
}

#[test]
fn s3_group_tag_position_does_not_affect_result() {
    let mut p1 = parser();
    let mut p2 = parser();
    let mut messages2 = p1.feed(S2);
    let mut messages3 = p2.feed(S3);
    let m2 = messages2.next().expect("S2 parses");
    let m3 = messages3.next().expect("S3 parses");

    assert!(m2.is_ok() && m3.is_ok());
    assert_eq!(m2.root().size(), m3.root().size());

    let g2 = m2.root().get_group(tag::NO_MD_ENTRIES).unwrap();
    let g3 = m3.root().get_group(tag::NO_MD_ENTRIES).unwrap();
    assert_eq!(g2.get_as_str(tag::MD_ENTRY_ID), g3.get_as_str(tag::MD_ENTRY_ID));
    assert_eq!(
        g2.next().unwrap().get_as_str(tag::MD_ENTRY_ID),
        g3.next().unwrap().get_as_str(tag::MD_ENTRY_ID)
    );
}

#[test]
fn s4_one_byte_chunking_matches_whole_buffer_feed() {
    let mut whole = parser();
    let mut baseline_messages = whole.feed(S1);
    let baseline = baseline_messages.next().expect("one message");
    assert_eq!(baseline.root().size(), 12);

    let mut chunked = parser();
    let mut found = None;
    for &b in S1 {
        let mut messages = chunked.feed(std::slice::from_ref(&b));
        if let Some(msg) = messages.next() {
            found = Some((msg.version(), msg.msg_type().to_string(), msg.root().size()));
        }
    }
    let (version, msg_type, size) = found.expect("a message eventually completes");
    assert_eq!(version, FixVersion::Fix4_4);
    assert_eq!(msg_type, "D");
    assert_eq!(size, 12);
}

#[test]
fn concatenated_messages_yield_n_in_order() {
    let mut combined = Vec::new();
    combined.extend_from_slice(S1);
    combined.extend_from_slice(S2);
    combined.extend_from_slice(S1);

    let mut p = parser();
    let mut messages = p.feed(&combined);

    let first = messages.next().expect("first message");
    assert_eq!(first.msg_type(), "D");
    let second = messages.next().expect("second message");
    assert_eq!(second.msg_type(), "X");
    let third = messages.next().expect("third message");
    assert_eq!(third.msg_type(), "D");
    assert!(messages.next().is_none());
}

#[test]
fn s5_unknown_tag_is_message_fatal_not_parser_fatal() {
    // Same shape as S1 but tag 56 (TargetCompID) renamed to 76, an
    // unrecognised tag not present in NEW_ORDER_SINGLE's valid set.
    // Body length and checksum recomputed for the substitution.
    let bad: &[u8] = b"8=FIX.4.4\x019=122\x0135=D\x0134=215\x0149=CLIENT12\x0152=20100225-19:41:57.316\x0176=B\x011=Marcel\x0111=13346\x0121=1\x0140=2\x0144=5\x0154=1\x0159=0\x0160=20100225-19:39:52.020\x0110=074\x01";

    let mut p = parser();
    let mut messages = p.feed(bad);
    let msg = messages.next().expect("framing still succeeds");

    assert!(!msg.is_ok());
    assert_eq!(
        msg.error(),
        Some("FIX message (version 'FIX.4.4', type 'D') error: Unexpected tag 76")
    );
    assert!(p.parser_error().is_none(), "a schema error must not poison the parser");

    // The parser must still accept the next, well-formed message.
    let mut messages = p.feed(S1);
    let next = messages.next().expect("parser still usable");
    assert!(next.is_ok());
}

#[test]
fn s6_bad_framing_is_parser_fatal() {
    let bad = b"8=FIX.4.4\x019=122\x0135=D\x02";
    let mut p = parser();
    {
        let mut messages = p.feed(bad);
        assert!(messages.next().is_none());
    }
    let err = p.parser_error().expect("framing violation poisons the parser");
    assert_eq!(err.message(), "Unexpected byte 0x2 in FIX message type");
}

#[test]
fn duplicate_tag_in_same_node_is_rejected() {
    // Tag 11 (ClOrdID) repeated verbatim within the root node.
    let bytes: &[u8] = b"8=FIX.4.4\x019=15\x0135=D\x0111=A\x0111=A\x0110=170\x01";
    let mut p = parser();
    let mut messages = p.feed(bytes);
    let msg = messages.next().expect("framing succeeds");
    assert_eq!(
        msg.error(),
        Some("FIX message (version 'FIX.4.4', type 'D') error: Duplicate tag 11")
    );
}

#[test]
fn group_leading_tag_must_appear_first_in_each_repetition() {
    // A group of 2 market-data entries where the second repetition never
    // starts (tag 58 appears where the next 279 was required).
    let bytes: &[u8] = b"8=FIX.4.2\x019=22\x0135=X\x01268=2\x01279=0\x0158=x\x0110=059\x01";
    let mut p = parser();
    let mut messages = p.feed(bytes);
    let msg = messages.next().expect("framing succeeds");
    assert!(!msg.is_ok());
    assert!(msg.error().unwrap().contains("Unexpected tag"));
}

#[test]
fn binary_data_tag_may_contain_embedded_soh() {
    let raw: &[u8] = b"A\x01B\x01C";
    let bytes: &[u8] = b"8=FIX.4.4\x019=24\x0135=Q\x0134=1\x0195=5\x0196=A\x01B\x01C\x0110=033\x01";

    let mut p = parser();
    let mut messages = p.feed(bytes);
    let msg = messages.next().expect("framing succeeds");
    assert!(msg.is_ok(), "unexpected error: {:?}", msg.error());

    let root = msg.root();
    assert!(root.get(tag::RAW_DATA_LENGTH).is_none(), "length tag itself is not stored");
    let data = root.get(tag::RAW_DATA).expect("data tag stored");
    assert_eq!(data.as_bytes(), Some(raw));
}

/// Frames a complete message around `body_fields` (everything after
/// `35=<msg_type>\x01`), filling in the declared body length and the
/// mod-256 checksum the splitter itself will recompute on the way in.
fn frame_message(msg_type: &str, body_fields: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("35={msg_type}\x01").as_bytes());
    body.extend_from_slice(body_fields);

    let mut msg = Vec::new();
    msg.extend_from_slice(b"8=FIX.4.4\x01");
    msg.extend_from_slice(format!("9={}\x01", body.len()).as_bytes());
    msg.extend_from_slice(&body);

    let check_sum: u32 = msg.iter().map(|&b| b as u32).sum::<u32>() % 256;
    msg.extend_from_slice(format!("10={check_sum:03}\x01").as_bytes());
    msg
}

/// `levels` repetitions of `NESTED_PARTY`, each nested one level deeper
/// inside the previous: `539=1` (one child) immediately followed by
/// that child's leading tag `524`, repeated `levels` times.
fn nested_party_chain(levels: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for _ in 0..levels {
        buf.extend_from_slice(b"539=1\x01524=X\x01");
    }
    buf
}

#[test]
fn group_nesting_at_the_depth_cap_is_accepted() {
    // Ten levels of NoNestedPartyIDs nested inside each other — exactly
    // MAX_GROUP_DEPTH (§6.3) — must still parse.
    let bytes = frame_message("N", &nested_party_chain(10));
    let mut p = parser();
    let mut messages = p.feed(&bytes);
    let msg = messages.next().expect("framing succeeds");
    assert!(msg.is_ok(), "unexpected error: {:?}", msg.error());

    let mut node = msg.root().get_group(tag::NO_NESTED_PARTY_IDS).expect("level 1");
    for _ in 0..9 {
        node = node.get_group(tag::NO_NESTED_PARTY_IDS).expect("deeper level");
    }
    assert!(node.get_group(tag::NO_NESTED_PARTY_IDS).is_none(), "no 11th level was sent");
}

#[test]
fn group_nesting_past_the_depth_cap_is_rejected() {
    // One more level than the cap allows: the 11th `539=1` is the tag
    // that trips `MAX_GROUP_DEPTH`.
    let mut body_fields = nested_party_chain(10);
    body_fields.extend_from_slice(b"539=1\x01");
    let bytes = frame_message("N", &body_fields);

    let mut p = parser();
    let mut messages = p.feed(&bytes);
    let msg = messages.next().expect("framing succeeds");
    assert!(!msg.is_ok());
    assert_eq!(
        msg.error(),
        Some("FIX message (version 'FIX.4.4', type 'N') error: Repeating groups nested too deeply")
    );
    assert!(p.parser_error().is_none(), "a schema error must not poison the parser");
}
