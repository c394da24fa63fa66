// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};

/// A string or number stored as its string representation.
///
/// Numeric types are not preserved: a value written as `42` reads back as the string `"42"`.
///
/// # Examples
///
/// ```
/// use stowage_backend::Scalar;
///
/// assert_eq!(Scalar::from(42).as_str(), "42");
/// assert_eq!(Scalar::from(1.5).as_str(), "1.5");
/// assert_eq!(Scalar::from("text").into_string(), "text");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scalar(String);

impl Scalar {
    /// Returns the string form of the value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the scalar and returns its string form.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Scalar {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        value.0
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

macro_rules! scalar_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool);

/// The shape of the value held at a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A single string-encoded value.
    Scalar,
    /// An ordered, append-only sequence of strings.
    List,
    /// An unordered collection of unique strings.
    Set,
    /// A mapping from field name to string value.
    Hash,
}

impl ValueKind {
    /// Returns a lowercase name for the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::List => "list",
            Self::Set => "set",
            Self::Hash => "hash",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
