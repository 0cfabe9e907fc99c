/*!
 The `BKGD` field, which describes the background of a folder window.

 The value is a 12 byte blob that starts with a tag:

 - `DefB`: the default background
 - `ClrB`: a solid color, as three 16-bit channels
 - `PctB`: a picture, stored in the `pict` field
*/

use crate::{
    error::field::FieldError,
    fields::{expect_sized, tag, FieldCode},
    store::value::RecordValue,
    util::{bytes::to_hex_digits, diagnostics::Diagnostics},
};

/// Folder window backgrounds
#[derive(Debug, PartialEq, Eq)]
pub enum Background {
    Default,
    /// A color as 16-bit red, green, and blue channels
    Color([u8; 6]),
    Picture,
}

impl Background {
    pub fn from_bytes(data: &[u8]) -> Result<Self, FieldError> {
        match data.get(..4) {
            Some(b"DefB") => Ok(Self::Default),
            Some(b"ClrB") => {
                let mut color = [0; 6];
                color.copy_from_slice(data.get(4..10).ok_or(FieldError::InvalidLength(
                    data.len(),
                    &[12],
                ))?);
                Ok(Self::Color(color))
            }
            Some(b"PctB") => Ok(Self::Picture),
            _ => Err(FieldError::UnknownVariant(
                "background",
                tag(data.get(..4).unwrap_or(data)),
            )),
        }
    }
}

pub fn background(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    let line = match Background::from_bytes(expect_sized(value, &[12])?)? {
        Background::Default => format!("{}: Default", field.label()),
        Background::Color(color) => format!("{}: Color #{}", field.label(), to_hex_digits(&color)),
        Background::Picture => format!("{}: Picture, see \"Picture\" field", field.label()),
    };
    Ok(vec![line])
}
