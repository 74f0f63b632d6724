use std::fmt::Display;
use std::str::FromStr;

/// Conversion from a captured path segment into a typed handler argument.
///
/// Implemented for every [`FromStr`] type, so handlers can take `String`,
/// integers, or any domain type with a `FromStr` impl. The matcher itself only
/// guarantees the segment is alphanumeric; anything stricter is checked here.
pub trait FromParam: Sized {
    /// Parse one captured value.
    ///
    /// # Errors
    ///
    /// A human-readable reason when `raw` is not a valid `Self`.
    fn from_param(raw: &str) -> Result<Self, String>;
}

impl<T> FromParam for T
where
    T: FromStr,
    T::Err: Display,
{
    fn from_param(raw: &str) -> Result<Self, String> {
        raw.parse::<T>().map_err(|e| e.to_string())
    }
}
