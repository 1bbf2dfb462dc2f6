//! Property-based round-trip tests.
//!
//! Every value that survives encoding must decode back to itself, both
//! through the attribute value and through its JSON text.

#![allow(clippy::float_cmp)]

use attrcodec::prelude::*;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Meta {
        owner: String => ["Owner"],
        revision: u32 => ["Revision", omit_empty],
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Entry {
        id: i64 => ["Id"],
        name: String => ["Name"],
        score: f64 => ["Score"],
        active: bool => ["Active"],
        payload: Vec<u8> => ["Payload"],
        tags: Vec<String> => ["Tags"],
        counts: HashMap<String, i32> => ["Counts"],
        limit: Option<u16> => ["Limit"],
        meta: Meta => [embed],
    }
}

fn arb_meta() -> impl Strategy<Value = Meta> {
    (".*", any::<u32>()).prop_map(|(owner, revision)| Meta { owner, revision })
}

fn arb_entry() -> impl Strategy<Value = Entry> {
    (
        any::<i64>(),
        ".*",
        any::<f64>().prop_filter("finite", |f| f.is_finite()),
        any::<bool>(),
        prop::collection::vec(any::<u8>(), 0..64),
        prop::collection::vec(".*", 0..8),
        prop::collection::hash_map("[a-zA-Z_][a-zA-Z0-9_]*", any::<i32>(), 0..8),
        any::<Option<u16>>(),
        arb_meta(),
    )
        .prop_map(
            |(id, name, score, active, payload, tags, counts, limit, meta)| Entry {
                id,
                name,
                score,
                active,
                payload,
                tags,
                counts,
                limit,
                meta,
            },
        )
}

/// Strategy for attribute values that render and parse back unchanged.
fn arb_attribute() -> impl Strategy<Value = AttributeValue> {
    let leaf = prop_oneof![
        Just(AttributeValue::Null),
        any::<bool>().prop_map(AttributeValue::Bool),
        ".*".prop_map(AttributeValue::text),
        "-?[0-9]{1,20}(\\.[0-9]{1,6})?".prop_map(AttributeValue::number),
        prop::collection::vec(any::<u8>(), 0..32).prop_map(AttributeValue::Binary),
    ];

    leaf.prop_recursive(3, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(AttributeValue::List),
            prop::collection::btree_map(".*", inner, 0..8).prop_map(AttributeValue::Map),
        ]
    })
}

proptest! {
    #[test]
    fn record_roundtrip(entry in arb_entry()) {
        let bytes = encode(&entry).expect("encoding should succeed");
        let mut decoded = Entry::default();
        decode(&bytes, &mut decoded).expect("decoding should succeed");
        prop_assert_eq!(decoded, entry);
    }

    #[test]
    fn record_roundtrip_through_value(entry in arb_entry()) {
        let value = encode_to_value(&entry).expect("encoding should succeed");
        let mut decoded = Entry::default();
        decode_value(&value, &mut decoded).expect("decoding should succeed");
        prop_assert_eq!(decoded, entry);
    }

    #[test]
    fn float_roundtrip(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let value = encode_to_value(&f).expect("encoding should succeed");
        let mut decoded = 0f64;
        decode_value(&value, &mut decoded).expect("decoding should succeed");
        prop_assert_eq!(decoded, f);
    }

    #[test]
    fn integer_roundtrip(n in any::<i128>()) {
        let value = encode_to_value(&n).expect("encoding should succeed");
        let mut decoded = 0i128;
        decode_value(&value, &mut decoded).expect("decoding should succeed");
        prop_assert_eq!(decoded, n);
    }

    #[test]
    fn narrowing_reports_overflow(n in (i64::from(i32::MAX) + 1)..i64::MAX) {
        let value = encode_to_value(&n).expect("encoding should succeed");
        let mut narrow = 7i32;
        let err = decode_value(&value, &mut narrow).unwrap_err();
        prop_assert!(err.is_numeric_overflow());
        prop_assert_eq!(narrow, 7);
    }

    #[test]
    fn ordered_map_roundtrip(
        map in prop::collection::btree_map(".+", any::<i64>(), 1..16)
    ) {
        let bytes = encode(&map).expect("encoding should succeed");
        let mut decoded: BTreeMap<String, i64> = BTreeMap::new();
        decode(&bytes, &mut decoded).expect("decoding should succeed");
        prop_assert_eq!(decoded, map);
    }

    #[test]
    fn attribute_text_roundtrip(value in arb_attribute()) {
        let bytes = attrcodec::text::render(&value).expect("render should succeed");
        let parsed = attrcodec::text::parse(&bytes).expect("parse should succeed");
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn dynamic_mirrors_structure(value in arb_attribute()) {
        let mut generic = Dynamic::default();
        decode_value(&value, &mut generic).expect("decoding should succeed");
        prop_assert_eq!(generic.is_absent(), value.is_null());
    }
}
