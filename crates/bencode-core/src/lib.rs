//! # bencode-core
//!
//! Pure-Rust encoder and decoder for **Bencode**, the self-delimiting
//! serialization format used by BitTorrent (`.torrent` files, tracker
//! responses, DHT messages).
//!
//! | Kind | Wire form | Example |
//! |------|-----------|---------|
//! | Byte string | `<len>:<bytes>` | `4:spam` |
//! | Integer | `i<digits>e` | `i-42e` |
//! | List | `l<values>e` | `l4:spami42ee` |
//! | Dictionary | `d(<key><value>)*e` | `d3:cow3:mooe` |
//!
//! ## Quick start
//!
//! ```rust
//! use bencode_core::{decode, encode};
//!
//! let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
//! assert_eq!(value.get(b"cow").and_then(|v| v.as_str()), Some("moo"));
//!
//! // Canonical input roundtrips byte for byte
//! assert_eq!(encode(&value), b"d3:cow3:moo4:spam4:eggse");
//! ```
//!
//! ## Untrusted input
//!
//! Decoding is bounded by [`DecodeOptions`]: byte strings longer than
//! `max_string_len` and containers nested deeper than `max_depth` are
//! rejected before any allocation or recursion. Dictionary key order is
//! checked on every decode; set `strict` to turn violations into errors.
//!
//! ```rust
//! use bencode_core::{decode_with, DecodeOptions, ErrorKind};
//!
//! let err = decode_with(b"d1:bi1e1:ai2ee", &DecodeOptions::strict()).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DuplicateOrUnsortedKey);
//! assert_eq!(err.offset(), Some(7));
//! ```
//!
//! ## Modules
//!
//! - [`bytestring`], [`integer`], [`list`], [`dictionary`] — one codec per
//!   grammar production, each with `decode` and `encode`
//! - [`decoder`] — the dispatcher and document entry points
//! - [`encoder`] — encode dispatch and entry points
//! - [`stream`] — byte source/sink collaborators
//! - [`options`] — decode limits and strict mode
//! - [`error`] — error types

pub mod bytestring;
pub mod decoder;
pub mod dictionary;
pub mod encoder;
pub mod error;
pub mod integer;
pub mod list;
pub mod options;
pub mod stream;
mod text;
pub mod value;

pub use bytestring::ByteString;
pub use decoder::{decode, decode_prefix, decode_reader, decode_with, Decoded, Decoder};
pub use dictionary::{canonical_key_order, Dictionary, KeyViolation, KeyViolationKind};
pub use encoder::{encode, encode_any, encode_to};
pub use error::{BencodeError, ErrorKind};
pub use options::DecodeOptions;
pub use value::Value;
