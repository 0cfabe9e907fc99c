/*!
 Fields that hold a property list: `bwsp`, `icvp`, `lsvp`, `lsvC`, and `lsvP`.

 The property list is rendered one tab below a header line. Blobs that do not decode
 as a property list are shown the same way the generic renderer shows any other blob.
*/

use std::iter::once;

use plist::Value;

use crate::{
    error::field::FieldError,
    fields::{expect_bytes, FieldCode},
    store::value::RecordValue,
    util::{
        diagnostics::Diagnostics,
        plist::{parse_plist, render},
    },
};

pub fn property_list(
    field: &FieldCode,
    value: &RecordValue,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    let data = expect_bytes(value)?;
    let parsed = parse_plist(data).unwrap_or_else(|_| Value::Data(data.to_vec()));

    Ok(once(format!("{}:", field.label()))
        .chain(render(&parsed, 1, diagnostics))
        .collect())
}
