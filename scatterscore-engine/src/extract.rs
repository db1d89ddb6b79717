//! Read raw metric values off company records.
#![forbid(unsafe_code)]

use scatterscore_core::{CompanyRecord, FieldValue};

/// Return the finite number stored at a dotted `field_path`, if any.
///
/// Absence is a normal outcome: a missing segment, an explicit null, a
/// non-numeric value or a non-finite number all yield `None`.
///
/// # Examples
/// ```
/// use scatterscore_core::CompanyRecord;
/// use scatterscore_engine::extract;
///
/// let company = CompanyRecord::new(1).with_value("costs.aisc_last_year", 1250.0);
/// assert_eq!(extract(&company, "costs.aisc_last_year"), Some(1250.0));
/// assert_eq!(extract(&company, "costs.aic_last_year"), None);
/// ```
#[must_use]
pub fn extract(company: &CompanyRecord, field_path: &str) -> Option<f64> {
    let mut segments = field_path.split('.');
    let first = segments.next()?;
    let mut value = company.fields().get(first)?;
    for segment in segments {
        let FieldValue::Record(fields) = value else {
            return None;
        };
        value = fields.get(segment)?;
    }
    match value {
        FieldValue::Number(number) if number.is_finite() => Some(*number),
        _ => None,
    }
}
