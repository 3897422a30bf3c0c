//! Integration tests for complete line → record decodes

use bytes::Bytes;
use fixcol_core::{
    decode, decode_new, decode_with_report, BoxError, DecodeConfig, DecodeError, FieldKind,
    LayoutSpec, RecordLayout, ScalarKind, Slot, Value,
};
use std::error::Error;
use std::sync::Arc;

const CONTACT_LINE: &str =
    "BobDolebob.dole@example.com123Grace StreetUnit 123TorontoOntarioM5A1A1true";

#[derive(Debug, Default, Clone, PartialEq)]
struct Contact {
    first_name: String,
    last_name: String,
    email: String,
    street_number: u32,
    street_name: String,
    unit: String,
    city: String,
    province: String,
    postal_code: String,
    active: bool,
}

fn contact_layout() -> RecordLayout<Contact> {
    RecordLayout::<Contact>::builder()
        .field("first_name", "0,3", |c: &mut Contact, v: String| c.first_name = v)
        .field("last_name", "3,7", |c: &mut Contact, v: String| c.last_name = v)
        .field("email", "7,27", |c: &mut Contact, v: String| c.email = v)
        .field("street_number", "27,30", |c: &mut Contact, v: u32| {
            c.street_number = v
        })
        .field("street_name", "30,42", |c: &mut Contact, v: String| c.street_name = v)
        .field("unit", "42,50", |c: &mut Contact, v: String| c.unit = v)
        .field("city", "50,57", |c: &mut Contact, v: String| c.city = v)
        .field("province", "57,64", |c: &mut Contact, v: String| c.province = v)
        .field("postal_code", "64,70", |c: &mut Contact, v: String| c.postal_code = v)
        .field("active", "70,74", |c: &mut Contact, v: bool| c.active = v)
        .build()
}

#[test]
fn test_contact_record() {
    let contact = decode_new(CONTACT_LINE, &contact_layout(), &DecodeConfig::new()).unwrap();

    assert_eq!(
        contact,
        Contact {
            first_name: "Bob".to_string(),
            last_name: "Dole".to_string(),
            email: "bob.dole@example.com".to_string(),
            street_number: 123,
            street_name: "Grace Street".to_string(),
            unit: "Unit 123".to_string(),
            city: "Toronto".to_string(),
            province: "Ontario".to_string(),
            postal_code: "M5A1A1".to_string(),
            active: true,
        }
    );
}

#[test]
fn test_decode_is_idempotent_across_targets() {
    let layout = contact_layout();
    let config = DecodeConfig::new();

    let mut first = Contact::default();
    let mut second = Contact {
        city: "stale".to_string(),
        ..Contact::default()
    };
    decode(CONTACT_LINE, &mut first, &layout, &config).unwrap();
    decode(CONTACT_LINE, &mut second, &layout, &config).unwrap();

    assert_eq!(first, second);

    // Decoding again into an already-populated target changes nothing
    layout.decode(CONTACT_LINE, &mut first, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_formatter_stops_decode() {
    let layout = RecordLayout::<Contact>::builder()
        .field("first_name", "0,3", |c: &mut Contact, v: String| c.first_name = v)
        .formatted_field("last_name", "3,7", "nope", |c: &mut Contact, v: String| {
            c.last_name = v
        })
        .field("email", "7,27", |c: &mut Contact, v: String| c.email = v)
        .build();

    let mut contact = Contact::default();
    let err = decode(CONTACT_LINE, &mut contact, &layout, &DecodeConfig::new()).unwrap_err();

    assert!(matches!(
        err,
        DecodeError::UnknownFormatter { ref field, ref name } if field == "last_name" && name == "nope"
    ));
    assert_eq!(contact.first_name, "Bob");
    assert_eq!(contact.last_name, "");
    assert_eq!(contact.email, "");
}

#[derive(Debug, Default)]
struct Notes {
    code: String,
    comment: String,
}

#[test]
fn test_untagged_field_never_mutated() {
    let layout = RecordLayout::<Notes>::builder()
        .field("code", "0,2", |n: &mut Notes, v: String| n.code = v)
        .descriptor(
            fixcol_core::FieldDescriptor::new("comment", ScalarKind::String).with_setter(
                |n: &mut Notes, _| {
                    n.comment = "overwritten".to_string();
                    true
                },
            ),
        )
        .build();

    let mut notes = Notes {
        code: String::new(),
        comment: "keep me".to_string(),
    };
    decode("AB", &mut notes, &layout, &DecodeConfig::new()).unwrap();

    assert_eq!(notes.code, "AB");
    assert_eq!(notes.comment, "keep me");
}

#[derive(Debug, Default)]
struct Single {
    val: String,
}

#[test]
fn test_formatter_runs_before_assignment() {
    let layout = RecordLayout::<Single>::builder()
        .formatted_field("val", "0", "upper", |s: &mut Single, v: String| s.val = v)
        .build();
    let config = DecodeConfig::new().with_formatter("upper", |s| Ok(s.to_uppercase()));

    let single = decode_new("abcdefg", &layout, &config).unwrap();
    assert_eq!(single.val, "ABCDEFG");
}

#[test]
fn test_formatter_runs_before_coercion() {
    #[derive(Debug, Default)]
    struct Amount {
        cents: u64,
    }

    let layout = RecordLayout::<Amount>::builder()
        .formatted_field("cents", "0", "strip-zeros", |a: &mut Amount, v: u64| {
            a.cents = v
        })
        .build();
    let config = DecodeConfig::new().with_standard_formatters();

    assert_eq!(decode_new("000150", &layout, &config).unwrap().cents, 150);
}

#[derive(Debug, thiserror::Error)]
#[error("expected digits only")]
struct NotDigits;

#[test]
fn test_formatter_error_preserves_source() {
    let layout = RecordLayout::<Single>::builder()
        .formatted_field("val", "0", "digits", |s: &mut Single, v: String| s.val = v)
        .build();
    let config = DecodeConfig::new().with_formatter("digits", |s| {
        if s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(s.to_string())
        } else {
            Err(Box::new(NotDigits) as BoxError)
        }
    });

    assert_eq!(decode_new("0123", &layout, &config).unwrap().val, "0123");

    let err = decode_new("12x", &layout, &config).unwrap_err();
    assert!(matches!(err, DecodeError::Formatter { ref name, .. } if name == "digits"));
    assert!(err.source().unwrap().downcast_ref::<NotDigits>().is_some());
}

#[test]
fn test_custom_delimiter() {
    let layout = RecordLayout::<Single>::builder()
        .field("val", "1-3", |s: &mut Single, v: String| s.val = v)
        .build();
    let config = DecodeConfig::new().with_delimiter("-");

    assert_eq!(decode_new("abcde", &layout, &config).unwrap().val, "bc");

    // The default delimiter does not understand "1-3"
    let err = decode_new("abcde", &layout, &DecodeConfig::new()).unwrap_err();
    assert!(matches!(err, DecodeError::FieldFormat { .. }));
}

#[test]
fn test_index_forms() {
    let config = DecodeConfig::new();
    let cases = [
        ("lkjasldthis is a testoi09asdfhj", "7,21"),
        ("lkjasldoi09asdfhjthis is a test", "17"),
        ("lkjasldoi09asdfhjthis is a test", "17,"),
        ("lkjasldoi09asdfhjthis is a test", "17,31"),
        ("this is a testlkjasldoi09asdfhj", ",14"),
        ("this is a testlkjasldoi09asdfhj", "0,14"),
    ];

    for (line, range) in cases {
        let layout = RecordLayout::<Single>::builder()
            .field("val", range, |s: &mut Single, v: String| s.val = v)
            .build();
        assert_eq!(
            decode_new(line, &layout, &config).unwrap().val,
            "this is a test",
            "range {:?}",
            range
        );
    }
}

#[test]
fn test_index_errors() {
    let config = DecodeConfig::new();
    let cases = [
        ("", "1", "start index out of bounds"),
        ("", "0,100", "end index out of bounds"),
        ("      ", "2,1", "end index must be greater or equal to start index"),
        ("abcdef", "-1,3", "start index out of bounds"),
        ("abcdef", "0,-2", "end index out of bounds"),
        ("abcdef", "-3", "start index out of bounds"),
        ("", "0,14,", "invalid range format"),
        ("abc", "x,1", "invalid start index"),
        ("abc", "0,y", "invalid end index"),
    ];

    for (line, range, message) in cases {
        let layout = RecordLayout::<Single>::builder()
            .field("val", range, |s: &mut Single, v: String| s.val = v)
            .build();
        let err = decode_new(line, &layout, &config).unwrap_err();
        let chain = format!("{} / {}", err, err.source().map(|s| s.to_string()).unwrap_or_default());
        assert!(chain.contains(message), "range {:?}: {}", range, chain);
    }
}

#[test]
fn test_empty_range_is_empty_string() {
    let layout = RecordLayout::<Single>::builder()
        .field("val", "3,3", |s: &mut Single, v: String| s.val = v)
        .build();

    let mut single = Single {
        val: "old".to_string(),
    };
    decode("abcdef", &mut single, &layout, &DecodeConfig::new()).unwrap();
    assert_eq!(single.val, "");
}

#[test]
fn test_read_only_field_keeps_earlier_assignments() {
    let layout = RecordLayout::<Notes>::builder()
        .field("code", "0,2", |n: &mut Notes, v: String| n.code = v)
        .read_only("comment", "2", ScalarKind::String)
        .build();

    let mut notes = Notes::default();
    let err = decode("ABxyz", &mut notes, &layout, &DecodeConfig::new()).unwrap_err();

    assert!(matches!(err, DecodeError::Assignment { ref field } if field == "comment"));
    assert_eq!(notes.code, "AB");
}

#[test]
fn test_unsupported_kind_is_skipped() {
    let layout = RecordLayout::<Notes>::builder()
        .raw_field("comment", "0,2", FieldKind::from("decimal"), |n: &mut Notes, _| {
            n.comment = "touched".to_string();
            true
        })
        .field("code", "2", |n: &mut Notes, v: String| n.code = v)
        .build();

    let mut notes = Notes::default();
    let report = decode_with_report("1.5", &mut notes, &layout, &DecodeConfig::new()).unwrap();

    assert_eq!(report.skipped, vec!["comment"]);
    assert_eq!(report.assigned, vec!["code"]);
    assert_eq!(notes.comment, "");
    assert_eq!(notes.code, "5");
}

#[derive(Debug, Default)]
struct Extract {
    flag: Option<bool>,
    count: Option<i16>,
    raw: Bytes,
    tail: Vec<u8>,
}

#[test]
fn test_optional_and_bytes_fields() {
    let layout = RecordLayout::<Extract>::builder()
        .field("flag", "0,1", |e: &mut Extract, v: Option<bool>| e.flag = v)
        .field("count", "1,4", |e: &mut Extract, v: Option<i16>| e.count = v)
        .field("raw", "4,7", |e: &mut Extract, v: Bytes| e.raw = v)
        .field("tail", "7", |e: &mut Extract, v: Vec<u8>| e.tail = v)
        .build();

    let extract = decode_new("T-42ABCxyz", &layout, &DecodeConfig::new()).unwrap();

    assert_eq!(extract.flag, Some(true));
    assert_eq!(extract.count, Some(-42));
    assert_eq!(extract.raw, Bytes::from_static(b"ABC"));
    assert_eq!(extract.tail, b"xyz".to_vec());
}

#[test]
fn test_width_overflow_is_conversion_error() {
    #[derive(Debug, Default)]
    struct Small {
        v: i8,
    }

    let layout = RecordLayout::<Small>::builder()
        .field("v", "0", |s: &mut Small, v: i8| s.v = v)
        .build();
    let config = DecodeConfig::new();

    assert_eq!(decode_new("127", &layout, &config).unwrap().v, 127);
    assert_eq!(decode_new("-128", &layout, &config).unwrap().v, -128);

    let err = decode_new("128", &layout, &config).unwrap_err();
    match err {
        DecodeError::Conversion { raw, source, .. } => {
            assert_eq!(raw, "128");
            assert_eq!(source.kind, FieldKind::Scalar(ScalarKind::I8));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[derive(Debug)]
enum Target {
    Record(Vec<(String, Value)>),
    Scalar,
}

#[test]
fn test_guard_rejects_non_record_target() {
    let layout = RecordLayout::<Target>::builder()
        .raw_field("a", "0,1", ScalarKind::String, |t: &mut Target, v| match t {
            Target::Record(fields) => {
                fields.push(("a".to_string(), v));
                true
            }
            Target::Scalar => false,
        })
        .guard(|t: &Target| match t {
            Target::Record(_) => Ok(()),
            Target::Scalar => Err("not a record".to_string()),
        })
        .build();
    let config = DecodeConfig::new();

    let mut scalar = Target::Scalar;
    let err = decode("x", &mut scalar, &layout, &config).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidTarget { ref reason } if reason == "not a record"));

    let mut record = Target::Record(Vec::new());
    decode("x", &mut record, &layout, &config).unwrap();
    assert!(matches!(record, Target::Record(ref f) if f.len() == 1));
}

#[test]
fn test_layout_spec_drives_decode() {
    let spec = LayoutSpec {
        delimiter: None,
        fields: vec![
            fixcol_core::FieldSpec {
                name: "last".to_string(),
                range: Some("0,8".to_string()),
                kind: FieldKind::from("string"),
                formatter: Some("trim".to_string()),
            },
            fixcol_core::FieldSpec {
                name: "salary".to_string(),
                range: Some("28,36".to_string()),
                kind: FieldKind::from("option<u32>"),
                formatter: Some("strip-zeros".to_string()),
            },
        ],
    };

    let layout = spec
        .to_builder(|field| {
            let name = field.name.clone();
            Slot::Writable(Arc::new(move |row: &mut Vec<(String, Value)>, value: Value| {
                row.push((name.clone(), value));
                true
            }))
        })
        .build();
    let config = spec.configure(DecodeConfig::new().with_standard_formatters());

    layout.check(&config).unwrap();

    let row = layout
        .decode_new("SMITH   JOHN      SALES     00050000", &config)
        .unwrap();
    assert_eq!(
        row,
        vec![
            ("last".to_string(), Value::String("SMITH".to_string())),
            (
                "salary".to_string(),
                Value::Optional(Box::new(Value::U32(50000)))
            ),
        ]
    );
}

#[test]
fn test_split_multibyte_character_is_range_error() {
    let layout = RecordLayout::<Single>::builder()
        .field("val", "0,1", |s: &mut Single, v: String| s.val = v)
        .build();

    let err = decode_new("éa", &layout, &DecodeConfig::new()).unwrap_err();
    assert!(matches!(err, DecodeError::FieldRange { .. }));
}
