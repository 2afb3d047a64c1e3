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

//! Body serialization.
//!
//! Every type usable as a `Response<T>` body implements [`WireBody`], which
//! stands in for an abstract serializer collaborator. Unit, primitive
//! scalars and strings get their natural textual form; anything else goes
//! through [`Json`], an explicit opt-in to JSON serialization (Rust has no
//! specialization, so "is this a primitive or not" has to be a type-level
//! choice rather than a runtime one, and the caller picks `Json<T>` the same
//! way `seamless::Json<T>` and conjure's typed `ResponseBody` make the
//! choice explicit at the handler boundary).

use edgeway_error::Error;
use serde::Serialize;

/// Converts a body value to the text carried in a [`crate::response::WireResponse`].
pub trait WireBody {
    /// Produce the wire text for this value.
    fn to_wire_text(&self) -> Result<String, Error>;
}

/// No body: a unit body renders to an empty string.
impl WireBody for () {
    fn to_wire_text(&self) -> Result<String, Error> {
        Ok(String::new())
    }
}

macro_rules! impl_wire_body_for_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WireBody for $ty {
                fn to_wire_text(&self) -> Result<String, Error> {
                    Ok(self.to_string())
                }
            }
        )*
    };
}

// "numbers as base-10, booleans as true/false, strings verbatim"
impl_wire_body_for_primitive!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
);

/// Wraps a user-defined type to select JSON serialization for the envelope
/// body. JSON is the only body representation the core commits to for
/// opaque textual artifacts; anything else is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> WireBody for Json<T>
where
    T: Serialize,
{
    fn to_wire_text(&self) -> Result<String, Error> {
        serde_json::to_string(&self.0)
            .map_err(|e| Error::handler_failure(format!("failed to serialize body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_body_is_empty() {
        assert_eq!(().to_wire_text().unwrap(), "");
    }

    #[test]
    fn bool_body_is_lowercase_literal() {
        assert_eq!(true.to_wire_text().unwrap(), "true");
        assert_eq!(false.to_wire_text().unwrap(), "false");
    }

    #[test]
    fn integer_body_is_base_10() {
        assert_eq!(42i64.to_wire_text().unwrap(), "42");
        assert_eq!((-7i32).to_wire_text().unwrap(), "-7");
    }

    #[test]
    fn string_body_is_verbatim() {
        assert_eq!("hello".to_string().to_wire_text().unwrap(), "hello");
    }

    #[derive(Serialize)]
    struct Widget {
        id: u32,
        name: String,
    }

    #[test]
    fn json_body_serializes_struct() {
        let body = Json(Widget {
            id: 1,
            name: "bolt".to_string(),
        });
        assert_eq!(body.to_wire_text().unwrap(), r#"{"id":1,"name":"bolt"}"#);
    }
}
