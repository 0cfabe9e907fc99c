/*!
 The `moDD` and `modD` modification date fields.

 Finder stores these as a count of 1/65536 second ticks since the Mac epoch. Some writers store
 a little-endian blob instead, whose meaning is not known, so it is shown as a plain number.
*/

use crate::{
    error::field::FieldError,
    fields::FieldCode,
    store::value::RecordValue,
    util::{
        bytes::{le_u64, to_hex_digits},
        dates::{format, from_ticks},
        diagnostics::Diagnostics,
    },
};

pub fn modified(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    let label = field.label();
    let line = match value {
        RecordValue::Int32(_) | RecordValue::Int64(_) => {
            let ticks = value.as_int().unwrap_or_default();
            match from_ticks(ticks) {
                Some(date) => format!("{label}: {}", format(&date)),
                None => format!("{label} (timestamp, format unknown): {ticks}"),
            }
        }
        RecordValue::Blob(data) => match le_u64(data) {
            Some(timestamp) => format!("{label} (timestamp, format unknown): {timestamp}"),
            None => format!("{label} (timestamp, unknown): {}", to_hex_digits(data)),
        },
        other => return Err(FieldError::InvalidType("int or bytes", other.kind())),
    };
    Ok(vec![line])
}
