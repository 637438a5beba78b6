//! Amenity flag coercion.
//!
//! Amenity flags (`has_toilet`, `has_wifi`, `has_sockets`, `can_take_calls`)
//! arrive as free-form form fields. They are coerced to `bool` with a fixed,
//! lossy rule: only a small set of truthy spellings map to `true`.

/// Spellings that coerce to `true`, compared case-insensitively.
pub const TRUTHY_VALUES: &[&str] = &["true", "yes", "y", "1"];

/// Coerce an optional form value into an amenity flag.
///
/// Returns `true` only when the value case-insensitively equals one of
/// [`TRUTHY_VALUES`]. Everything else, including an absent field, an empty
/// string, or a padded value such as `" yes"`, is `false`.
///
/// # Example
///
/// ```rust
/// # use cafe_core::coerce_flag;
/// assert!(coerce_flag(Some("YES")));
/// assert!(!coerce_flag(Some("no")));
/// assert!(!coerce_flag(None));
/// ```
#[must_use]
pub fn coerce_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| TRUTHY_VALUES.iter().any(|t| v.eq_ignore_ascii_case(t)))
}
