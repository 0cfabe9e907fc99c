/*!
 Handlers for fields that hold a single plain value.

 Most of these only differ in the label and unit they print, so they read the label from the [`FieldCode`].
*/

use crate::{
    error::field::FieldError,
    fields::{expect_bool, expect_bytes, expect_int, expect_str, raw_lines, FieldCode},
    store::value::RecordValue,
    util::diagnostics::Diagnostics,
};

/// `Comments: hello`
pub fn text(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(vec![format!("{}: {}", field.label(), expect_str(value)?)])
}

/// `Open in list view: true`
pub fn flag(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(vec![format!("{}: {}", field.label(), expect_bool(value)?)])
}

/// `Finder window sidebar width: 200`
pub fn integer(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(vec![format!("{}: {}", field.label(), expect_int(value)?)])
}

/// `Logical size: 4096B`
pub fn size(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(vec![format!("{}: {}B", field.label(), expect_int(value)?)])
}

pub fn unknown_text(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(vec![format!("{} (unknown): {}", field.label(), expect_str(value)?)])
}

pub fn unknown_bool(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(vec![format!("{} (unknown): {}", field.label(), expect_bool(value)?)])
}

pub fn unknown_int(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(vec![format!("{} (unknown): {}", field.label(), expect_int(value)?)])
}

pub fn unknown_bytes(
    field: &FieldCode,
    value: &RecordValue,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    expect_bytes(value)?;
    Ok(raw_lines(
        &format!("{} (unknown)", field.label()),
        value,
        diagnostics,
    ))
}

/// Any value, shown the way the generic renderer shows it
pub fn raw(
    field: &FieldCode,
    value: &RecordValue,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(raw_lines(field.label(), value, diagnostics))
}
