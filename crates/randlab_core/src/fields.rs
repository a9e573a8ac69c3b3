//! Named free-text parameter fields.
//!
//! [`Fields`] is the untyped input side of a generator or distribution spec:
//! a map from field name to the raw text a user typed. Typed accessors turn
//! the text into numbers and report [`RngError`]s naming the field.

use std::collections::BTreeMap;

use crate::error::{Result, RngError};

/// Raw text fields keyed by name.
///
/// Blank values count as absent, matching an empty form field.
///
/// # Examples
///
/// ```rust
/// use randlab_core::Fields;
///
/// let fields = Fields::new().with("x0", "1234").with("a", " 5 ");
/// assert_eq!(fields.require_u64("x0").unwrap(), 1234);
/// assert_eq!(fields.require_u64("a").unwrap(), 5);
/// assert!(fields.require_u64("m").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fields {
    values: BTreeMap<String, String>,
}

impl Fields {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field and returns the set, for chained construction.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Parses `name=value` assignments, as given on a command line.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an assignment without `=` or with an
    /// empty name.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Self::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (name, value) = assignment.split_once('=').ok_or_else(|| {
                RngError::invalid(assignment, "expected an assignment of the form name=value")
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(RngError::invalid(assignment, "field name is empty"));
            }
            fields.insert(name, value.trim());
        }
        Ok(fields)
    }

    /// Returns the trimmed text of a field, or `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Number of fields, blank ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field names not contained in `expected`.
    pub fn unknown<'a>(&'a self, expected: &[&str]) -> Vec<&'a str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|name| !expected.contains(name))
            .collect()
    }

    /// Reads a required non-negative integer.
    ///
    /// Integral decimal text such as `"7.0"` is accepted; `"7.5"`, negative
    /// values and non-finite values are not.
    pub fn require_u64(&self, name: &str) -> Result<u64> {
        let text = self.text(name).ok_or_else(|| RngError::missing(name))?;
        parse_u64(name, text)
    }

    /// Reads an optional non-negative integer.
    pub fn optional_u64(&self, name: &str) -> Result<Option<u64>> {
        self.text(name).map(|text| parse_u64(name, text)).transpose()
    }

    /// Reads a required integer that must fit in 32 bits.
    pub fn require_u32(&self, name: &str) -> Result<u32> {
        let value = self.require_u64(name)?;
        u32::try_from(value)
            .map_err(|_| RngError::invalid(name, format!("{} does not fit in 32 bits", value)))
    }

    /// Reads a required finite floating-point value.
    pub fn require_f64(&self, name: &str) -> Result<f64> {
        let text = self.text(name).ok_or_else(|| RngError::missing(name))?;
        let value: f64 = text
            .parse()
            .map_err(|_| RngError::invalid(name, format!("'{}' is not a number", text)))?;
        if !value.is_finite() {
            return Err(RngError::invalid(name, "must be finite"));
        }
        Ok(value)
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = Self::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

fn parse_u64(name: &str, text: &str) -> Result<u64> {
    if let Ok(value) = text.parse::<u64>() {
        return Ok(value);
    }
    if let Ok(value) = text.parse::<i128>() {
        if value < 0 {
            return Err(RngError::invalid(name, "must be non-negative"));
        }
        return Err(RngError::invalid(name, format!("{} is too large", value)));
    }

    let value: f64 = text
        .parse()
        .map_err(|_| RngError::invalid(name, format!("'{}' is not a number", text)))?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(RngError::invalid(name, format!("'{}' is not an integer", text)));
    }
    if value < 0.0 {
        return Err(RngError::invalid(name, "must be non-negative"));
    }
    if value >= u64::MAX as f64 {
        return Err(RngError::invalid(name, format!("'{}' is too large", text)));
    }
    Ok(value as u64)
}
