/*!
 Fields that describe the list view.

 Newer systems store list view settings as property lists instead, see [`crate::fields::property_list`].
*/

use crate::{
    error::field::FieldError,
    fields::{expect_int, expect_sized, FieldCode},
    store::value::RecordValue,
    util::{bytes::to_hex, diagnostics::Diagnostics},
};

/// `lsvo`, 76 bytes whose layout is unknown
pub fn options(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    let data = expect_sized(value, &[76])?;
    Ok(vec![format!("{} (format unknown): {}", field.label(), to_hex(data))])
}

/// `lsvt`
pub fn text_size(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(vec![format!("{}: {}pt", field.label(), expect_int(value)?)])
}

/// `lssp`, probably the scroll position
pub fn scroll_position(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    let data = expect_sized(value, &[8])?;
    Ok(vec![format!(
        "{} (unknown, List view scroll position?): {}",
        field.label(),
        to_hex(data)
    )])
}

#[cfg(test)]
mod tests {
    use crate::{
        error::field::FieldError,
        fields::interpret_field,
        store::value::RecordValue,
        util::diagnostics::{Diagnostics, Warning},
    };

    #[test]
    fn can_interpret_text_size() {
        let lines = interpret_field("a", "lsvt", &RecordValue::Int32(12), &mut Diagnostics::new());
        assert_eq!(lines, vec!["List view text size: 12pt"]);
    }

    #[test]
    fn can_interpret_scroll_position() {
        let lines = interpret_field(
            "a",
            "lssp",
            &RecordValue::Blob(vec![0, 0, 0, 0, 0, 0, 0, 0x10]),
            &mut Diagnostics::new(),
        );
        assert_eq!(
            lines,
            vec!["lssp (unknown, List view scroll position?): 0x0000000000000010"]
        );
    }

    #[test]
    fn can_interpret_options() {
        let mut diagnostics = Diagnostics::new();
        let lines = interpret_field(
            "a",
            "lsvo",
            &RecordValue::Blob(vec![0xaa; 76]),
            &mut diagnostics,
        );

        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            format!("List view options (format unknown): 0x{}", "aa".repeat(76))
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn cant_interpret_short_options() {
        let mut diagnostics = Diagnostics::new();
        let lines = interpret_field("a", "lsvo", &RecordValue::Blob(vec![0; 2]), &mut diagnostics);

        assert_eq!(lines, vec!["List view options (unrecognized): 0x0000"]);
        assert_eq!(
            diagnostics.warnings(),
            &[Warning::Field {
                name: "a".to_string(),
                code: "lsvo".to_string(),
                error: FieldError::InvalidLength(2, &[76]),
            }]
        );
    }
}
