/*!
 Fields that describe icons and the icon view.
*/

use crate::{
    error::field::FieldError,
    fields::{expect_bytes, expect_sized, tag, FieldCode},
    store::value::RecordValue,
    util::{bytes::to_hex, diagnostics::Diagnostics},
};

/// How icons are kept arranged
#[derive(Debug, PartialEq, Eq)]
pub enum Arrangement {
    None,
    Grid,
    Unknown(String),
}

impl Arrangement {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "none" => Self::None,
            "grid" => Self::Grid,
            other => Self::Unknown(other.to_string()),
        }
    }

    fn describe(&self) -> String {
        match self {
            Arrangement::None => "None".to_string(),
            Arrangement::Grid => "Snap to Grid".to_string(),
            Arrangement::Unknown(tag) => format!("(unknown) {tag}"),
        }
    }
}

/// Where icon labels are placed
#[derive(Debug, PartialEq, Eq)]
pub enum LabelPosition {
    Bottom,
    Right,
    Unknown(String),
}

impl LabelPosition {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "botm" => Self::Bottom,
            "rght" => Self::Right,
            other => Self::Unknown(other.to_string()),
        }
    }

    fn describe(&self) -> String {
        match self {
            LabelPosition::Bottom => "Bottom".to_string(),
            LabelPosition::Right => "Right".to_string(),
            LabelPosition::Unknown(tag) => format!("(unknown) {tag}"),
        }
    }
}

/// Icon view options in either of the layouts Finder has used
#[derive(Debug, PartialEq, Eq)]
pub enum IconViewOptions {
    /// The 18 byte `icvo` layout
    Legacy {
        flags: [u8; 8],
        size: i16,
        arrangement: Arrangement,
    },
    /// The 26 byte `icv4` layout
    Version4 {
        size: i16,
        arrangement: Arrangement,
        label_position: LabelPosition,
        flags: [u8; 12],
    },
}

impl IconViewOptions {
    pub fn from_bytes(data: &[u8]) -> Result<Self, FieldError> {
        match data.get(..4) {
            Some(b"icvo") => {
                if data.len() != 18 {
                    return Err(FieldError::InvalidLength(data.len(), &[18]));
                }
                let mut flags = [0; 8];
                flags.copy_from_slice(&data[4..12]);
                Ok(Self::Legacy {
                    flags,
                    size: i16::from_be_bytes([data[12], data[13]]),
                    arrangement: Arrangement::from_tag(&tag(&data[14..18])),
                })
            }
            Some(b"icv4") => {
                if data.len() != 26 {
                    return Err(FieldError::InvalidLength(data.len(), &[26]));
                }
                let mut flags = [0; 12];
                flags.copy_from_slice(&data[14..26]);
                Ok(Self::Version4 {
                    size: i16::from_be_bytes([data[4], data[5]]),
                    arrangement: Arrangement::from_tag(&tag(&data[6..10])),
                    label_position: LabelPosition::from_tag(&tag(&data[10..14])),
                    flags,
                })
            }
            _ => Err(FieldError::UnknownVariant(
                "icon view options",
                tag(data.get(..4).unwrap_or(data)),
            )),
        }
    }
}

/// `Iloc`: the icon position in pixels, then 8 unknown bytes
pub fn location(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    let data = expect_sized(value, &[16])?;
    let x = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    let y = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);

    Ok(vec![format!(
        "{}: x {x}px, y {y}px, {}",
        field.label(),
        to_hex(&data[8..16])
    )])
}

/// `dilc`: the desktop icon position, in thousandths of a percent of the screen
pub fn desktop_location(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    let data = expect_sized(value, &[32])?;
    let x = i32::from_be_bytes([data[16], data[17], data[18], data[19]]) as f64 / 1000.0;
    let y = i32::from_be_bytes([data[20], data[21], data[22], data[23]]) as f64 / 1000.0;

    Ok(vec![format!(
        "{}: x {x:.3}%, y {y:.3}%, {}, {}",
        field.label(),
        to_hex(&data[..16]),
        to_hex(&data[24..32])
    )])
}

/// `icgo` and `icsp`: 8 bytes of unknown meaning
pub fn unknown_block(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    let data = expect_sized(value, &[8])?;
    Ok(vec![format!("{} (unknown): {}", field.label(), to_hex(data))])
}

/// `icvo`
pub fn view_options(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    let options = IconViewOptions::from_bytes(expect_bytes(value)?)?;

    let mut lines = vec![format!("{}:", field.label())];
    match options {
        IconViewOptions::Legacy {
            flags,
            size,
            arrangement,
        } => {
            lines.push(format!("\tFlags (?): {}", to_hex(&flags)));
            lines.push(format!("\tSize: {size}px"));
            lines.push(format!("\tKeep arranged by: {}", arrangement.describe()));
        }
        IconViewOptions::Version4 {
            size,
            arrangement,
            label_position,
            flags,
        } => {
            lines.push(format!("\tSize: {size}px"));
            lines.push(format!("\tKeep arranged by: {}", arrangement.describe()));
            lines.push(format!("\tLabel position: {}", label_position.describe()));
            lines.push("\tFlags (partially known):".to_string());
            lines.push(format!("\t\tRaw flags: {}", to_hex(&flags)));
            lines.push(format!("\t\tShow item info: {}", flags[1] & 0x01 != 0));
            lines.push(format!("\t\tShow icon preview: {}", flags[11] & 0x01 != 0));
        }
    }
    Ok(lines)
}
