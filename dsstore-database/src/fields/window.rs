/*!
 Fields that describe the Finder window a folder opens in.
*/

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    error::field::FieldError,
    fields::{expect_sized, expect_str, tag, FieldCode},
    store::value::RecordValue,
    util::{bytes::to_hex, diagnostics::Diagnostics},
};

/// Finder view styles
#[derive(Debug, PartialEq, Eq)]
pub enum ViewStyle {
    /// `icnv`
    Icon,
    /// `clmv`
    Column,
    /// `glyv`
    Gallery,
    /// `Nlsv`
    List,
    /// `Flwv`
    Coverflow,
    Unknown(String),
}

impl ViewStyle {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "icnv" => Self::Icon,
            "clmv" => Self::Column,
            "glyv" => Self::Gallery,
            "Nlsv" => Self::List,
            "Flwv" => Self::Coverflow,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Like [`ViewStyle::from_tag`], but `fwi0` records do not know `glyv`
    pub fn from_window_tag(tag: &str) -> Self {
        match Self::from_tag(tag) {
            Self::Gallery => Self::Unknown(tag.to_string()),
            style => style,
        }
    }
}

impl Display for ViewStyle {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        match self {
            ViewStyle::Icon => write!(fmt, "Icon view"),
            ViewStyle::Column => write!(fmt, "Column view"),
            ViewStyle::Gallery => write!(fmt, "Gallery view"),
            ViewStyle::List => write!(fmt, "List view"),
            ViewStyle::Coverflow => write!(fmt, "Coverflow view"),
            ViewStyle::Unknown(tag) => write!(fmt, "(unrecognized) {tag}"),
        }
    }
}

/// Bounds of a window in screen points
#[derive(Debug, PartialEq, Eq)]
pub struct WindowRect {
    pub top: i16,
    pub left: i16,
    pub bottom: i16,
    pub right: i16,
}

impl WindowRect {
    /// Read four big-endian signed 16-bit bounds
    pub fn from_bytes(data: &[u8; 8]) -> Self {
        Self {
            top: i16::from_be_bytes([data[0], data[1]]),
            left: i16::from_be_bytes([data[2], data[3]]),
            bottom: i16::from_be_bytes([data[4], data[5]]),
            right: i16::from_be_bytes([data[6], data[7]]),
        }
    }
}

/// The 16 byte `fwi0` blob: the window rectangle, the view style tag, and four unknown bytes
pub fn window_info(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    let data = expect_sized(value, &[16])?;

    let mut bounds = [0; 8];
    bounds.copy_from_slice(&data[..8]);
    let rect = WindowRect::from_bytes(&bounds);
    let view = ViewStyle::from_window_tag(&tag(&data[8..12]));

    Ok(vec![
        format!("{}:", field.label()),
        format!(
            "\tWindow rectangle: top {}, left {}, bottom {}, right {}",
            rect.top, rect.left, rect.bottom, rect.right
        ),
        format!("View style (might be overtaken): {view}"),
        to_hex(&data[12..16]),
    ])
}

/// The `vstl` field, which may be stored as either a `type` or a `ustr`
pub fn view_style(
    field: &FieldCode,
    value: &RecordValue,
    _: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(vec![format!(
        "{}: {}",
        field.label(),
        ViewStyle::from_tag(expect_str(value)?)
    )])
}

#[cfg(test)]
mod tests {
    use crate::{
        error::field::FieldError,
        fields::{
            interpret_field,
            window::{ViewStyle, WindowRect},
        },
        store::value::RecordValue,
        util::diagnostics::{Diagnostics, Warning},
    };

    fn window(view: &[u8; 4]) -> RecordValue {
        let mut data = vec![];
        for bound in [44i16, 100, 600, -2] {
            data.extend(bound.to_be_bytes());
        }
        data.extend_from_slice(view);
        data.extend([0x00, 0x01, 0x00, 0x00]);
        RecordValue::Blob(data)
    }

    #[test]
    fn can_interpret_window_info() {
        let lines = interpret_field("a", "fwi0", &window(b"icnv"), &mut Diagnostics::new());

        assert_eq!(
            lines,
            vec![
                "Finder window information:",
                "\tWindow rectangle: top 44, left 100, bottom 600, right -2",
                "View style (might be overtaken): Icon view",
                "0x00010000",
            ]
        );
    }

    #[test]
    fn can_interpret_unknown_window_view() {
        let lines = interpret_field("a", "fwi0", &window(b"zzzz"), &mut Diagnostics::new());
        assert_eq!(lines[2], "View style (might be overtaken): (unrecognized) zzzz");
    }

    #[test]
    fn can_reject_gallery_in_window_info() {
        let lines = interpret_field("a", "fwi0", &window(b"glyv"), &mut Diagnostics::new());
        assert_eq!(lines[2], "View style (might be overtaken): (unrecognized) glyv");
    }

    #[test]
    fn cant_interpret_short_window_info() {
        let mut diagnostics = Diagnostics::new();
        let lines = interpret_field(
            "a",
            "fwi0",
            &RecordValue::Blob(vec![0; 4]),
            &mut diagnostics,
        );

        assert_eq!(lines, vec!["Finder window information (unrecognized): 0x00000000"]);
        assert_eq!(
            diagnostics.warnings(),
            &[Warning::Field {
                name: "a".to_string(),
                code: "fwi0".to_string(),
                error: FieldError::InvalidLength(4, &[16]),
            }]
        );
    }

    #[test]
    fn can_interpret_view_style() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            interpret_field("a", "vstl", &RecordValue::Type("glyv".to_string()), &mut diagnostics),
            vec!["View style: Gallery view"]
        );
        assert_eq!(
            interpret_field("a", "vstl", &RecordValue::Text("Nlsv".to_string()), &mut diagnostics),
            vec!["View style: List view"]
        );
        assert_eq!(
            interpret_field("a", "vstl", &RecordValue::Type("abcd".to_string()), &mut diagnostics),
            vec!["View style: (unrecognized) abcd"]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn can_read_rect() {
        let rect = WindowRect::from_bytes(&[0xff, 0xff, 0, 1, 0, 2, 0x80, 0]);
        assert_eq!(
            rect,
            WindowRect {
                top: -1,
                left: 1,
                bottom: 2,
                right: i16::MIN
            }
        );
    }

    #[test]
    fn can_map_view_styles() {
        assert_eq!(ViewStyle::from_tag("clmv"), ViewStyle::Column);
        assert_eq!(ViewStyle::from_tag("Flwv").to_string(), "Coverflow view");
        assert_eq!(ViewStyle::from_window_tag("icnv"), ViewStyle::Icon);
    }
}
