/// List codec: `l<value>*e`.
use bencode_core::list;
use bencode_core::{decode, decode_with, encode, DecodeOptions, Decoder, Dictionary, ErrorKind, Value};

#[test]
fn decode_empty_list() {
    assert_eq!(decode(b"le").unwrap(), Value::List(vec![]));
}

#[test]
fn decode_preserves_order() {
    let value = decode(b"l4:spam4:eggse").unwrap();
    assert_eq!(
        value,
        Value::List(vec![Value::string("spam"), Value::string("eggs")])
    );
}

#[test]
fn into_list_takes_ownership() {
    let items = decode(b"l4:spami3ee").unwrap().into_list().unwrap();
    assert_eq!(items, vec![Value::string("spam"), Value::Integer(3)]);
    assert_eq!(Value::string("spam").into_list(), None);
}

#[test]
fn decode_mixed_kinds() {
    let value = decode(b"l4:spami42eli1eed3:cow3:mooee").unwrap();
    let items = value.as_list().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0].as_str(), Some("spam"));
    assert_eq!(items[1].as_integer(), Some(42));
    assert_eq!(items[2], Value::List(vec![Value::Integer(1)]));
    assert_eq!(items[3].get(b"cow").and_then(Value::as_str), Some("moo"));
}

#[test]
fn decode_nested_empty_lists() {
    let value = decode(b"llelleee").unwrap();
    assert_eq!(
        value,
        Value::List(vec![
            Value::List(vec![]),
            Value::List(vec![Value::List(vec![])]),
        ])
    );
}

#[test]
fn decode_reports_bytes_consumed() {
    let mut decoder = Decoder::from_slice(b"li1ei2eei3e");
    let (items, consumed) = list::decode(&mut decoder).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(consumed, 8);
}

#[test]
fn unterminated_list() {
    let err = decode(b"l4:spam").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    assert_eq!(err.offset(), Some(7));
}

#[test]
fn error_inside_element_carries_inner_offset() {
    let err = decode(b"li1ei03ee").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInteger);
    assert_eq!(err.offset(), Some(5));
}

#[test]
fn unknown_token_inside_list() {
    let err = decode(b"li1ex").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownTokenType);
    assert_eq!(err.offset(), Some(4));
}

#[test]
fn depth_limit() {
    let opts = DecodeOptions::default().with_max_depth(2);
    assert!(decode_with(b"llee", &opts).is_ok());

    let err = decode_with(b"llleee", &opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
    assert_eq!(err.offset(), Some(2));
}

#[test]
fn default_depth_limit_stops_runaway_nesting() {
    let mut input = vec![b'l'; 100_000];
    input.extend(vec![b'e'; 100_000]);
    let err = decode(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
}

#[test]
fn encode_empty_list() {
    assert_eq!(encode(&Value::List(vec![])), b"le");
}

#[test]
fn encode_in_order() {
    let value = Value::List(vec![
        Value::string("spam"),
        Value::string("eggs"),
        Value::Integer(-1),
        Value::Dict(Dictionary::new()),
    ]);
    assert_eq!(encode(&value), b"l4:spam4:eggsi-1edee");
}
