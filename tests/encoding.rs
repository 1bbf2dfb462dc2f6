//! Encoding Tests
//!
//! Native values to attribute values and rendered text, checked by parsing
//! the output back as plain JSON.

use attrcodec::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;

fn render<T: Encode + ?Sized>(value: &T) -> Value {
    let bytes = encode(value).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Fixtures
// ============================================================================

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Foo {
        int1: i64 => ["Int1", omit_empty],
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct NestedString {
        string1: String => ["String1", omit_empty],
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Nested {
        next: Option<Box<Nested>> => ["Next"],
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Inline {
        int3: i64 => ["Int3"],
        foo_slice: Vec<Foo> => ["FooSlice"],
    }
}

record! {
    #[derive(Default)]
    struct Root {
        bool1: bool => ["Bool1", omit_empty],
        bool2: Option<bool> => ["Bool2", omit_empty],
        int1: i64 => ["Int1", omit_empty],
        int2: Option<i64> => ["Int2", omit_empty],
        float1: f64 => ["Float1", omit_empty],
        float2: Option<f64> => ["Float2", omit_empty],
        string1: String => ["String1", omit_empty],
        string2: Option<String> => ["String2", omit_empty],
        nested_struct1: Option<Box<NestedString>> => ["NestedStruct1", omit_empty],
        inline_struct: Inline => ["InlineStruct", omit_empty],
        map1: HashMap<String, Foo> => ["Map1", omit_empty],
        map2: HashMap<String, i64> => ["Map2", omit_empty],
        byte_slice1: Vec<u8> => ["ByteSlice1", omit_empty],
        slice1: Vec<Foo> => ["Slice1", omit_empty],
        array1: [Option<Box<Foo>>; 4] => ["Array1"],
        array2: [i64; 2] => ["Array2"],
        generic1: Option<Box<dyn Encode>> => ["Generic1", omit_empty],
        generic2: Option<Box<dyn Encode>> => ["Generic2", omit_empty],
        generic_array: Vec<Box<dyn Encode>> => ["GenericArray", omit_empty],
        deep_nesting: Option<Box<Nested>> => ["DeepNesting"],
    }
}

fn foo(int1: i64) -> Foo {
    Foo { int1 }
}

fn populated_root() -> Root {
    let mut root = Root {
        bool1: true,
        bool2: Some(false),
        int1: 10,
        int2: Some(20),
        float1: 25.25,
        float2: Some(50.5),
        string1: "foo".to_string(),
        string2: Some("bar".to_string()),
        nested_struct1: Some(Box::new(NestedString {
            string1: "baz".to_string(),
        })),
        inline_struct: Inline {
            int3: 30,
            foo_slice: vec![foo(100), foo(200)],
        },
        byte_slice1: vec![0x7b, 0x22, 0x53, 0x22, 0x3a, 0x22, 0x66, 0x6f, 0x6f, 0x22, 0x7d],
        slice1: vec![foo(700), foo(800)],
        array1: [
            Some(Box::new(foo(900))),
            Some(Box::new(foo(1000))),
            Some(Box::new(foo(1100))),
            Some(Box::new(Foo::default())),
        ],
        array2: [1300, 1400],
        generic1: Some(Box::new(1500)),
        generic2: Some(Box::new(NestedString {
            string1: "nublet".to_string(),
        })),
        generic_array: vec![Box::new(foo(1700)), Box::new("foobar"), Box::new(10)],
        deep_nesting: Some(Box::new(Nested {
            next: Some(Box::new(Nested {
                next: Some(Box::new(Nested {
                    next: Some(Box::new(Nested::default())),
                })),
            })),
        })),
        ..Default::default()
    };
    root.map1.insert("a".to_string(), foo(300));
    root.map1.insert("b".to_string(), foo(400));
    root.map2.insert("c".to_string(), 500);
    root.map2.insert("d".to_string(), 600);
    root.map2.insert("e".to_string(), 0);
    root
}

// ============================================================================
// Full Record
// ============================================================================

mod full_record {
    use super::*;

    #[test]
    fn test_every_field_present() {
        let out = render(&populated_root());
        assert_eq!(out["M"].as_object().unwrap().len(), 20);
    }

    #[test]
    fn test_scalars() {
        let out = render(&populated_root());
        let m = &out["M"];
        assert_eq!(m["Bool1"], json!({"BOOL": true}));
        assert_eq!(m["Bool2"], json!({"BOOL": false}));
        assert_eq!(m["Int1"], json!({"N": "10"}));
        assert_eq!(m["Int2"], json!({"N": "20"}));
        assert_eq!(m["Float1"], json!({"N": "25.25"}));
        assert_eq!(m["Float2"], json!({"N": "50.5"}));
        assert_eq!(m["String1"], json!({"S": "foo"}));
        assert_eq!(m["String2"], json!({"S": "bar"}));
    }

    #[test]
    fn test_nested_records() {
        let out = render(&populated_root());
        let m = &out["M"];
        assert_eq!(m["NestedStruct1"], json!({"M": {"String1": {"S": "baz"}}}));
        assert_eq!(
            m["InlineStruct"],
            json!({"M": {
                "Int3": {"N": "30"},
                "FooSlice": {"L": [
                    {"M": {"Int1": {"N": "100"}}},
                    {"M": {"Int1": {"N": "200"}}},
                ]},
            }})
        );
    }

    #[test]
    fn test_maps() {
        let out = render(&populated_root());
        let m = &out["M"];
        assert_eq!(
            m["Map1"],
            json!({"M": {
                "a": {"M": {"Int1": {"N": "300"}}},
                "b": {"M": {"Int1": {"N": "400"}}},
            }})
        );
        assert_eq!(
            m["Map2"],
            json!({"M": {"c": {"N": "500"}, "d": {"N": "600"}, "e": {"N": "0"}}})
        );
    }

    #[test]
    fn test_bytes_are_base64() {
        let out = render(&populated_root());
        assert_eq!(out["M"]["ByteSlice1"], json!({"B": "eyJTIjoiZm9vIn0="}));
    }

    #[test]
    fn test_sequences() {
        let out = render(&populated_root());
        let m = &out["M"];
        assert_eq!(
            m["Slice1"],
            json!({"L": [{"M": {"Int1": {"N": "700"}}}, {"M": {"Int1": {"N": "800"}}}]})
        );
        assert_eq!(
            m["Array1"],
            json!({"L": [
                {"M": {"Int1": {"N": "900"}}},
                {"M": {"Int1": {"N": "1000"}}},
                {"M": {"Int1": {"N": "1100"}}},
                {"M": {}},
            ]})
        );
        assert_eq!(m["Array2"], json!({"L": [{"N": "1300"}, {"N": "1400"}]}));
    }

    #[test]
    fn test_polymorphic_fields() {
        let out = render(&populated_root());
        let m = &out["M"];
        assert_eq!(m["Generic1"], json!({"N": "1500"}));
        assert_eq!(m["Generic2"], json!({"M": {"String1": {"S": "nublet"}}}));
        assert_eq!(
            m["GenericArray"],
            json!({"L": [
                {"M": {"Int1": {"N": "1700"}}},
                {"S": "foobar"},
                {"N": "10"},
            ]})
        );
    }

    #[test]
    fn test_deep_nesting() {
        let out = render(&populated_root());
        assert_eq!(
            out["M"]["DeepNesting"],
            json!({"M": {"Next": {"M": {"Next": {"M": {"Next": {"M": {"Next": {"NULL": true}}}}}}}}})
        );
    }

    #[test]
    fn test_empty_root_omits_empty_fields() {
        let out = render(&Root::default());
        let m = out["M"].as_object().unwrap();

        // Records are never empty; arrays and plain optionals always appear
        let mut keys: Vec<_> = m.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["Array1", "Array2", "DeepNesting", "InlineStruct"]);
        assert_eq!(m["DeepNesting"], json!({"NULL": true}));
        assert_eq!(
            m["Array1"],
            json!({"L": [{"NULL": true}, {"NULL": true}, {"NULL": true}, {"NULL": true}]})
        );
        assert_eq!(
            m["InlineStruct"],
            json!({"M": {"Int3": {"N": "0"}, "FooSlice": {"NULL": true}}})
        );
    }
}

// ============================================================================
// Null Conventions
// ============================================================================

mod null_conventions {
    use super::*;

    record! {
        #[derive(Debug, Default)]
        struct Lists {
            a: Vec<i32> => ["A"],
        }
    }

    record! {
        #[derive(Debug, Default)]
        struct Empty {
            empty: Vec<i32> => ["Empty"],
            empty_map: HashMap<String, i32> => ["EmptyMap"],
            absent_map: Option<HashMap<String, i32>> => ["AbsentMap"],
            text: String => ["Text"],
        }
    }

    #[test]
    fn test_empty_list_is_null() {
        let bytes = encode(&Lists::default()).unwrap();
        assert_eq!(bytes, br#"{"M":{"A":{"NULL":true}}}"#);

        let bytes = encode(&Lists { a: Vec::with_capacity(8) }).unwrap();
        assert_eq!(bytes, br#"{"M":{"A":{"NULL":true}}}"#);
    }

    #[test]
    fn test_empty_collections_and_strings_are_null() {
        let out = render(&Empty::default());
        let m = &out["M"];
        assert_eq!(m["Empty"], json!({"NULL": true}));
        assert_eq!(m["EmptyMap"], json!({"NULL": true}));
        assert_eq!(m["AbsentMap"], json!({"NULL": true}));
        assert_eq!(m["Text"], json!({"NULL": true}));
    }

    #[test]
    fn test_null_elements_stay_in_lists() {
        let out = render(&vec![None, Some(String::new()), Some("x".to_string())]);
        assert_eq!(out, json!({"L": [{"NULL": true}, {"NULL": true}, {"S": "x"}]}));
    }

    #[test]
    fn test_prebuilt_empty_containers_render_as_literals() {
        let list = encode(&AttributeValue::List(Vec::new())).unwrap();
        assert_eq!(list, br#"{"L":[]}"#);

        let map = encode(&AttributeValue::Map(AttributeMap::new())).unwrap();
        assert_eq!(map, br#"{"M":{}}"#);
    }
}

// ============================================================================
// Hooks
// ============================================================================

mod hooks {
    use super::*;
    use attrcodec::wire::HookKind;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct AliasedString(String);

    impl TextMarshal for AliasedString {
        fn marshal_text(&self) -> Result<String, HookError> {
            Ok(format!("{}-aliased", self.0))
        }

        fn unmarshal_text(&mut self, text: &str) -> Result<(), HookError> {
            let base = text
                .strip_suffix("-aliased")
                .ok_or("aliased string is missing its suffix")?;
            self.0 = format!("{base}-unaliased");
            Ok(())
        }
    }

    hooked!(AliasedString: text);

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Opaque(Vec<u8>);

    impl BinaryMarshal for Opaque {
        fn marshal_binary(&self) -> Result<Vec<u8>, HookError> {
            if self.0.len() > 4 {
                return Err("payload too large".into());
            }
            Ok(self.0.clone())
        }

        fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), HookError> {
            self.0 = data.to_vec();
            Ok(())
        }
    }

    hooked!(Opaque: binary);

    record! {
        #[derive(Debug, Default)]
        struct X {
            x: AliasedString => ["X"],
        }
    }

    record! {
        #[derive(Debug, Default)]
        struct Holder {
            opaque: Opaque => ["Opaque"],
            maybe: Option<Opaque> => ["Maybe"],
        }
    }

    #[test]
    fn test_text_hook_in_record() {
        let bytes = encode(&X { x: AliasedString("foo".to_string()) }).unwrap();
        assert_eq!(bytes, br#"{"M":{"X":{"S":"foo-aliased"}}}"#);
    }

    #[test]
    fn test_binary_hook_in_record() {
        let holder = Holder {
            opaque: Opaque(vec![1, 2]),
            maybe: None,
        };
        let out = render(&holder);
        assert_eq!(out["M"]["Opaque"], json!({"B": "AQI="}));
        assert_eq!(out["M"]["Maybe"], json!({"NULL": true}));

        let empty = render(&Holder::default());
        assert_eq!(empty["M"]["Opaque"], json!({"NULL": true}));
    }

    #[test]
    fn test_hook_failure_propagates_from_record() {
        let holder = Holder {
            opaque: Opaque(vec![0; 5]),
            maybe: None,
        };
        let err = encode(&holder).unwrap_err();
        assert!(matches!(err, EncodeError::Hook { kind: HookKind::Binary, .. }));
    }
}

// ============================================================================
// Errors
// ============================================================================

mod errors {
    use super::*;
    use std::collections::BTreeMap;

    record! {
        #[derive(Debug, Default)]
        struct Keyed {
            by_id: BTreeMap<u32, String>,
        }
    }

    #[test]
    fn test_non_string_keys_fail_inside_record() {
        let mut keyed = Keyed::default();
        keyed.by_id.insert(1, "one".to_string());
        let err = encode(&keyed).unwrap_err();
        assert!(matches!(err, EncodeError::NonStringKey { key_type: "u32" }));
    }

    #[test]
    fn test_empty_non_string_map_is_null() {
        let out = render(&Keyed::default());
        assert_eq!(out["M"]["by_id"], json!({"NULL": true}));
    }

    #[test]
    #[should_panic(expected = "NaN and infinite floats are not supported")]
    fn test_non_finite_float_in_record_panics() {
        let root = Root {
            float1: f64::INFINITY,
            ..Default::default()
        };
        let _ = encode(&root);
    }
}
