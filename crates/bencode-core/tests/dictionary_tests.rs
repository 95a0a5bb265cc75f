/// Dictionary codec: canonical key ordering on encode, permissive or strict
/// key checking on decode.
use bencode_core::dictionary;
use bencode_core::{
    canonical_key_order, decode, decode_with, encode, ByteString, DecodeOptions, Decoder,
    Dictionary, ErrorKind, KeyViolationKind, Value,
};
use std::cmp::Ordering;
use std::time::{Duration, Instant};

fn dict_of(pairs: &[(&[u8], Value)]) -> Dictionary {
    pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn decode_empty_dict() {
    assert_eq!(decode(b"de").unwrap(), Value::Dict(Dictionary::new()));
}

#[test]
fn decode_simple_dict() {
    let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get(b"cow").and_then(Value::as_str), Some("moo"));
    assert_eq!(dict.get(b"spam").and_then(Value::as_str), Some("eggs"));
    assert!(dict.is_canonical());
}

#[test]
fn decode_nested_values() {
    let value = decode(b"d4:infod6:lengthi1024e4:name4:testee").unwrap();
    let info = value.get(b"info").unwrap();
    assert_eq!(info.get(b"length").and_then(Value::as_integer), Some(1024));
    assert_eq!(info.get(b"name").and_then(Value::as_str), Some("test"));
}

#[test]
fn decode_reports_bytes_consumed() {
    let mut decoder = Decoder::from_slice(b"d1:ai1eei9e");
    let (dict, consumed) = dictionary::decode(&mut decoder).unwrap();
    assert_eq!(dict.len(), 1);
    assert_eq!(consumed, 8);
}

#[test]
fn non_string_key_is_malformed_length() {
    let err = decode(b"di1ei2ee").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedLength);
    assert_eq!(err.offset(), Some(1));
}

#[test]
fn missing_value_after_key() {
    let err = decode(b"d3:cowe").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownTokenType);
    assert_eq!(err.offset(), Some(6));

    let err = decode(b"d3:cow").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    assert_eq!(err.offset(), Some(6));
}

#[test]
fn unterminated_dict() {
    let err = decode(b"d3:cow3:moo").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    assert_eq!(err.offset(), Some(11));
}

// ============================================================================
// Key order: permissive reporting
// ============================================================================

#[test]
fn permissive_decode_reports_unsorted_key() {
    let decoded = decode_with(b"d1:bi1e1:ai2ee", &DecodeOptions::default()).unwrap();
    assert_eq!(decoded.key_violations.len(), 1);
    let violation = &decoded.key_violations[0];
    assert_eq!(violation.kind, KeyViolationKind::Unsorted);
    assert_eq!(violation.offset, 7);
    assert_eq!(violation.key.as_bytes(), b"a");

    // Values are still available, in decode order
    let dict = decoded.value.as_dict().unwrap();
    let keys: Vec<&[u8]> = dict.keys().map(ByteString::as_bytes).collect();
    assert_eq!(keys, vec![b"b".as_slice(), b"a".as_slice()]);
    assert!(!dict.is_canonical());
}

#[test]
fn permissive_decode_reports_duplicate_key() {
    let decoded = decode_with(b"d1:ai1e1:ai2ee", &DecodeOptions::default()).unwrap();
    assert_eq!(decoded.key_violations.len(), 1);
    assert_eq!(decoded.key_violations[0].kind, KeyViolationKind::Duplicate);

    let dict = decoded.value.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get(b"a").and_then(Value::as_integer), Some(1));
}

#[test]
fn duplicate_after_unsorted_key_is_still_a_duplicate() {
    let decoded = decode_with(b"d1:bi1e1:ai2e1:bi3ee", &DecodeOptions::default()).unwrap();
    let kinds: Vec<_> = decoded.key_violations.iter().map(|v| v.kind).collect();
    assert_eq!(kinds, vec![KeyViolationKind::Unsorted, KeyViolationKind::Duplicate]);
}

#[test]
fn violations_in_nested_dicts_are_collected() {
    let decoded =
        decode_with(b"d1:ad1:zi0e1:yi0ee1:bd1:ci0e1:ci1eee", &DecodeOptions::default()).unwrap();
    let offsets: Vec<usize> = decoded.key_violations.iter().map(|v| v.offset).collect();
    assert_eq!(offsets, vec![11, 28]);
}

#[test]
fn large_dict_after_one_unsorted_key_decodes_in_linear_time() {
    const N: usize = 40_000;
    let mut canonical = b"d".to_vec();
    for i in 0..N {
        canonical.extend_from_slice(format!("8:{i:08}i0e").as_bytes());
    }
    canonical.push(b'e');
    // Same size, but a leading "zz" key puts every later key out of order
    let mut skewed = b"d2:zzi0e".to_vec();
    skewed.extend_from_slice(&canonical[1..]);

    let opts = DecodeOptions::default();
    let started = Instant::now();
    let baseline = decode_with(&canonical, &opts).unwrap();
    let canonical_time = started.elapsed();

    let started = Instant::now();
    let decoded = decode_with(&skewed, &opts).unwrap();
    let skewed_time = started.elapsed();

    assert!(baseline.key_violations.is_empty());
    assert_eq!(decoded.key_violations.len(), 1);
    assert_eq!(decoded.key_violations[0].kind, KeyViolationKind::Unsorted);
    assert_eq!(decoded.key_violations[0].offset, 8);
    assert_eq!(decoded.value.as_dict().unwrap().len(), N + 1);
    assert!(
        skewed_time < canonical_time * 10 + Duration::from_millis(500),
        "unsorted dict took {skewed_time:?}, canonical took {canonical_time:?}"
    );
}

#[test]
fn canonical_input_has_no_violations() {
    let decoded =
        decode_with(b"d3:cow3:moo4:spam4:eggse", &DecodeOptions::default()).unwrap();
    assert!(decoded.key_violations.is_empty());
}

// ============================================================================
// Key order: strict mode
// ============================================================================

#[test]
fn strict_rejects_unsorted_key() {
    let err = decode_with(b"d1:bi1e1:ai2ee", &DecodeOptions::strict()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateOrUnsortedKey);
    assert_eq!(err.offset(), Some(7));
}

#[test]
fn strict_rejects_duplicate_key() {
    let err = decode_with(b"d1:ai1e1:ai2ee", &DecodeOptions::strict()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateOrUnsortedKey);
}

#[test]
fn strict_accepts_canonical_input() {
    let decoded =
        decode_with(b"d1:a1:x2:aa1:y1:bi0ee", &DecodeOptions::strict()).unwrap();
    assert_eq!(decoded.value.as_dict().unwrap().len(), 3);
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn encode_empty_dict() {
    assert_eq!(encode(&Value::Dict(Dictionary::new())), b"de");
}

#[test]
fn encode_sorts_keys_regardless_of_insertion_order() {
    let mut dict = Dictionary::new();
    dict.insert(b"spam", Value::string("eggs"));
    dict.insert(b"cow", Value::string("moo"));
    assert_eq!(encode(&Value::Dict(dict)), b"d3:cow3:moo4:spam4:eggse");
}

#[test]
fn encode_sorts_prefix_first_and_by_raw_bytes() {
    let dict = dict_of(&[
        (&b"ab"[..], Value::Integer(2)),
        (&b"\xff"[..], Value::Integer(4)),
        (&b"a"[..], Value::Integer(1)),
        (&b"B"[..], Value::Integer(0)),
        (&b"b"[..], Value::Integer(3)),
    ]);
    assert_eq!(
        encode(&Value::Dict(dict)),
        b"d1:Bi0e1:ai1e2:abi2e1:bi3e1:\xffi4ee"
    );
}

#[test]
fn encode_reorders_permissively_decoded_input() {
    let value = decode(b"d1:bi1e1:ai2ee").unwrap();
    assert_eq!(encode(&value), b"d1:ai2e1:bi1ee");
}

// ============================================================================
// Dictionary API
// ============================================================================

#[test]
fn insert_replaces_existing_key() {
    let mut dict = Dictionary::new();
    assert_eq!(dict.insert(b"k", 1i64), None);
    assert_eq!(dict.insert(b"k", 2i64), Some(Value::Integer(1)));
    assert_eq!(dict.len(), 1);
    assert_eq!(dict.get(b"k"), Some(&Value::Integer(2)));
}

#[test]
fn remove_and_contains() {
    let mut dict = dict_of(&[(&b"a"[..], Value::Integer(1)), (&b"b"[..], Value::Integer(2))]);
    assert!(dict.contains_key(b"a"));
    assert_eq!(dict.remove(b"a"), Some(Value::Integer(1)));
    assert!(!dict.contains_key(b"a"));
    assert_eq!(dict.remove(b"a"), None);
    assert_eq!(dict.len(), 1);
}

#[test]
fn remove_drops_every_duplicate() {
    let mut value = decode(b"d1:ai1e1:bi2e1:ai3e1:ci4ee").unwrap();
    let dict = value.as_dict_mut().unwrap();
    assert_eq!(dict.remove(b"a"), Some(Value::Integer(1)));
    assert_eq!(dict.len(), 2);
    assert!(!dict.contains_key(b"a"));
    // Later keys are still found at their shifted positions
    assert_eq!(dict.get(b"b"), Some(&Value::Integer(2)));
    assert_eq!(dict.get(b"c"), Some(&Value::Integer(4)));
    assert_eq!(encode(&value), b"d1:bi2e1:ci4ee");
}

#[test]
fn collect_keeps_first_position_and_last_value() {
    let pairs = (0..10_000i64)
        .rev()
        .map(|i| (format!("{i:05}").into_bytes(), Value::Integer(i)))
        .chain([(b"00005".to_vec(), Value::Integer(-5))]);
    let dict: Dictionary = pairs.collect();
    assert_eq!(dict.len(), 10_000);
    assert_eq!(dict.keys().next().map(ByteString::as_bytes), Some(&b"09999"[..]));
    assert_eq!(dict.get(b"00005"), Some(&Value::Integer(-5)));
    assert!(encode(&Value::Dict(dict)).starts_with(b"d5:00000i0e5:00001i1e"));
}

#[test]
fn into_dict_takes_ownership() {
    let dict = decode(b"d3:cow3:mooe").unwrap().into_dict().unwrap();
    assert_eq!(dict.get(b"cow").and_then(Value::as_str), Some("moo"));
    assert_eq!(Value::Integer(1).into_dict(), None);
}

#[test]
fn get_mut_edits_in_place() {
    let mut value = decode(b"d4:listlee").unwrap();
    value
        .as_dict_mut()
        .and_then(|d| d.get_mut(b"list"))
        .and_then(Value::as_list_mut)
        .unwrap()
        .push(Value::Integer(7));
    assert_eq!(encode(&value), b"d4:listli7eee");
}

#[test]
fn equality_ignores_insertion_order() {
    let a = dict_of(&[(&b"x"[..], Value::Integer(1)), (&b"y"[..], Value::Integer(2))]);
    let b = dict_of(&[(&b"y"[..], Value::Integer(2)), (&b"x"[..], Value::Integer(1))]);
    let c = dict_of(&[(&b"x"[..], Value::Integer(1)), (&b"y"[..], Value::Integer(3))]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn canonical_iter_yields_wire_order() {
    let dict = dict_of(&[(&b"zz"[..], Value::Integer(0)), (&b"z"[..], Value::Integer(1))]);
    let keys: Vec<&[u8]> = dict.canonical_iter().map(|(k, _)| k.as_bytes()).collect();
    assert_eq!(keys, vec![b"z".as_slice(), b"zz".as_slice()]);
}

#[test]
fn comparator_orders_by_bytes_then_length() {
    let a = ByteString::from_static(b"a");
    let ab = ByteString::from_static(b"ab");
    let b = ByteString::from_static(b"b");
    assert_eq!(canonical_key_order(&a, &ab), Ordering::Less);
    assert_eq!(canonical_key_order(&ab, &b), Ordering::Less);
    assert_eq!(canonical_key_order(&b, &a), Ordering::Greater);
    assert_eq!(canonical_key_order(&a, &a.clone()), Ordering::Equal);
}
