// Copyright 2026 The edgeway Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Type conversion for captured path variables.
//!
//! `FromPathParam` plays the role of an abstract "convert to T" operation:
//! one impl per target type, keyed on `T` the way conjure-http's
//! `DecodeParam<T>` trait keys header/path decoding on the target type.
//! User-defined types are expected to provide their own impl, typically by
//! delegating to [`deserialize_json_param`], the concrete stand-in for a
//! generic deserializer's `Deserialize<T>`.

use edgeway_error::Error;
use serde::de::DeserializeOwned;

/// Converts a captured path-variable string to a handler-declared parameter
/// type. Implemented for textual types, `bool`, the integer and floating
/// point families, `char`, and (by the implementor) user-defined types.
pub trait FromPathParam: Sized {
    /// Parse `text` (already a raw, still-encoded path segment) into `Self`.
    fn from_path_param(text: &str) -> Result<Self, Error>;
}

impl FromPathParam for String {
    fn from_path_param(text: &str) -> Result<Self, Error> {
        Ok(decode_url_component(text))
    }
}

impl FromPathParam for bool {
    fn from_path_param(text: &str) -> Result<Self, Error> {
        match text.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(Error::invalid_value(format!(
                "{other:?} is not a valid boolean"
            ))),
        }
    }
}

macro_rules! impl_from_path_param_for_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromPathParam for $ty {
                fn from_path_param(text: &str) -> Result<Self, Error> {
                    text.trim().parse::<$ty>().map_err(|e| {
                        Error::invalid_value(format!(
                            "{:?} is not a valid {}: {e}",
                            text,
                            stringify!($ty)
                        ))
                    })
                }
            }
        )*
    };
}

impl_from_path_param_for_int!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl FromPathParam for char {
    fn from_path_param(text: &str) -> Result<Self, Error> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok('\0'),
            (Some(c), None) => Ok(c),
            _ => {
                // Length > 1: parse as an integer code point and narrow.
                let code = text.trim().parse::<u32>().map_err(|e| {
                    Error::invalid_value(format!("{text:?} is not a valid character: {e}"))
                })?;
                char::from_u32(code)
                    .ok_or_else(|| Error::invalid_value(format!("{code} is not a valid char code")))
            }
        }
    }
}

/// Delegate helper for user-defined path-variable types: deserializes `text`
/// as a JSON literal. A user type implements [`FromPathParam`] by calling
/// this, e.g. `FromPathParam::from_path_param` for a newtype wrapping a
/// validated string would call `deserialize_json_param::<Inner>(text)` and
/// wrap the result.
pub fn deserialize_json_param<T>(text: &str) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    serde_json::from_str(text)
        .map_err(|e| Error::invalid_value(format!("failed to decode {text:?}: {e}")))
}

/// URL-decodes a path segment: `%XX` becomes the corresponding byte, a bare
/// or malformed `%` is kept literally, and `+` becomes a space (the usual
/// form-encoding convention).
pub fn decode_url_component(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() && is_hex_digit(bytes[i + 1]) && is_hex_digit(bytes[i + 2]) =>
            {
                let hi = hex_value(bytes[i + 1]);
                let lo = hex_value(bytes[i + 2]);
                out.push(hi * 16 + lo);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => unreachable!("guarded by is_hex_digit"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_accepts_case_insensitive_true_false_and_digits() {
        assert_eq!(bool::from_path_param("TRUE").unwrap(), true);
        assert_eq!(bool::from_path_param("1").unwrap(), true);
        assert_eq!(bool::from_path_param("False").unwrap(), false);
        assert_eq!(bool::from_path_param("0").unwrap(), false);
        assert!(bool::from_path_param("yes").is_err());
    }

    #[test]
    fn integer_rejects_overflow_and_garbage() {
        assert_eq!(u8::from_path_param("255").unwrap(), 255u8);
        assert!(u8::from_path_param("256").is_err());
        assert!(i32::from_path_param("12abc").is_err());
    }

    #[test]
    fn char_handles_length_zero_one_and_numeric_code() {
        assert_eq!(char::from_path_param("").unwrap(), '\0');
        assert_eq!(char::from_path_param("x").unwrap(), 'x');
        assert_eq!(char::from_path_param("65").unwrap(), 'A');
        assert!(char::from_path_param("abc").is_err());
    }

    #[test]
    fn url_decode_handles_percent_and_plus() {
        assert_eq!(decode_url_component("My%20File.txt"), "My File.txt");
        assert_eq!(decode_url_component("a+b"), "a b");
        assert_eq!(decode_url_component("100%25"), "100%");
    }

    #[test]
    fn url_decode_keeps_malformed_percent_literal() {
        assert_eq!(decode_url_component("50%"), "50%");
        assert_eq!(decode_url_component("50%2"), "50%2");
        assert_eq!(decode_url_component("50%zz"), "50%zz");
    }

    #[test]
    fn url_decode_round_trips_percent_encoded_bytes() {
        let original = "héllo wörld/slashes?and&stuff";
        let encoded: String = original
            .bytes()
            .map(|b| {
                if b.is_ascii_alphanumeric() {
                    (b as char).to_string()
                } else {
                    format!("%{b:02X}")
                }
            })
            .collect();
        assert_eq!(decode_url_component(&encoded), original);
    }
}
