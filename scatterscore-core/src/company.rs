//! Company records as delivered by the data layer.
//!
//! A record is a stable identifier plus a tree of named fields. Nested
//! objects such as `financials` or `mineral_estimates` become
//! [`FieldValue::Record`] nodes addressed with dotted paths. Amounts are
//! expected in the reporting currency already; the engine never converts.

use std::collections::BTreeMap;

/// Identifier of a company, stable across runs.
pub type CompanyId = u64;

/// Named fields of a record or nested object.
pub type Fields = BTreeMap<String, FieldValue>;

/// A single value in a company record's field tree.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// Explicitly absent.
    #[default]
    Null,
    /// Boolean flag; never numeric.
    Bool(bool),
    /// Numeric value, possibly non-finite.
    Number(f64),
    /// Free text; never numeric.
    Text(String),
    /// Array of values; never numeric and not addressable by path.
    List(Vec<FieldValue>),
    /// Nested object.
    Record(Fields),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// One company and its field tree.
///
/// # Examples
/// ```
/// use scatterscore_core::{CompanyRecord, FieldValue};
///
/// let company = CompanyRecord::new(7)
///     .with_name("Example Gold")
///     .with_value("financials.market_cap_value", 1.5e9);
/// let financials = company.fields().get("financials").unwrap();
/// assert!(matches!(financials, FieldValue::Record(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanyRecord {
    /// Stable identifier.
    #[cfg_attr(feature = "serde", serde(rename = "company_id"))]
    pub id: CompanyId,
    /// Display name, when known.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "company_name", default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    fields: Fields,
}

impl CompanyRecord {
    /// Construct a record without fields.
    #[must_use]
    pub fn new(id: CompanyId) -> Self {
        Self {
            id,
            name: None,
            fields: Fields::new(),
        }
    }

    /// Construct a record from an existing field tree.
    #[must_use]
    pub const fn with_fields(id: CompanyId, fields: Fields) -> Self {
        Self {
            id,
            name: None,
            fields,
        }
    }

    /// Set the display name while returning `self` for chaining.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a value at `path` while returning `self` for chaining.
    #[must_use]
    pub fn with_value(mut self, path: &str, value: impl Into<FieldValue>) -> Self {
        self.set_value(path, value);
        self
    }

    /// Insert or replace the value at a dotted `path`.
    ///
    /// Intermediate objects are created as needed; a non-object value in the
    /// way is replaced by an object.
    pub fn set_value(&mut self, path: &str, value: impl Into<FieldValue>) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(leaf) = segments.pop() else {
            return;
        };
        let mut fields = &mut self.fields;
        for segment in segments {
            let entry = fields
                .entry(segment.to_owned())
                .or_insert_with(|| FieldValue::Record(Fields::new()));
            if !matches!(entry, FieldValue::Record(_)) {
                *entry = FieldValue::Record(Fields::new());
            }
            let FieldValue::Record(nested) = entry else {
                return;
            };
            fields = nested;
        }
        fields.insert(leaf.to_owned(), value.into());
    }

    /// Borrow the top-level fields.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }
}
