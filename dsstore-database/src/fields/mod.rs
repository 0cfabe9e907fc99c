/*!
 Turns record fields into human readable report lines.

 Every field code Finder is known to write maps to a [`FieldCode`] variant, and every variant maps to a handler.
 A handler that cannot make sense of a value returns a [`FieldError`]; the interpreter then records a
 [`Warning::Field`] and falls back to showing the raw value, so a bad field never hides the rest of a record.
*/

pub mod background;
pub mod icon;
pub mod list_view;
pub mod metadata;
pub mod modified;
pub mod property_list;
pub mod window;

use std::iter::once;

use crate::{
    error::field::FieldError,
    store::{record::Record, value::RecordValue},
    util::{
        diagnostics::{Diagnostics, Warning},
        plist::render_bytes,
    },
};

/// Renders one field value into report lines
pub type Handler =
    fn(&FieldCode, &RecordValue, &mut Diagnostics) -> Result<Vec<String>, FieldError>;

/// Field codes found in `.DS_Store` records
///
/// Read more about these fields [here](https://metacpan.org/dist/Mac-Finder-DSStore/view/DSStoreFormat.pod).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCode {
    /// `BKGD`, the folder background
    Background,
    /// `pict`, the background picture when `BKGD` says there is one
    Picture,
    /// `GRP0`
    Group,
    /// `ICVO`
    IconViewFlag,
    /// `LSVO`
    ListViewFlag,
    /// `Iloc`, the position of the icon in its parent window
    IconLocation,
    /// `dilc`, the position of an icon on the desktop
    DesktopIconLocation,
    /// `dscl`, whether the folder opens in list view
    OpenInListView,
    /// `cmmt`, Spotlight comments
    Comments,
    /// `extn`
    Extension,
    /// `fwi0`, window geometry and view style
    WindowInfo,
    /// `fwsw`
    SidebarWidth,
    /// `fwvh`
    WindowHeight,
    /// `icgo`
    IconGo,
    /// `icsp`
    IconScroll,
    /// `icvo`, icon view options in the `icvo` or `icv4` layouts
    IconViewOptions,
    /// `icvp`
    IconViewProperties,
    /// `info`
    Info,
    /// `logS` or `lg1S`
    LogicalSize,
    /// `phyS` or `ph1S`
    PhysicalSize,
    /// `lssp`
    ListScroll,
    /// `lsvo`
    ListViewOptions,
    /// `lsvt`
    ListTextSize,
    /// `bwsp`
    LayoutProperties,
    /// `lsvp`
    ListViewProperties,
    /// `lsvC`
    ListViewPropertiesAlternative,
    /// `lsvP`
    ListViewPropertiesOther,
    /// `moDD`
    ModificationDate,
    /// `modD`
    ModificationDateAlternative,
    /// `vSrn`
    ViewVersion,
    /// `vstl`
    ViewStyle,
    /// `ptbL`, where the Trash puts an item back to
    TrashLocation,
    /// `ptbN`, the name the Trash restores an item under
    TrashName,
    /// `pBBk`, a bookmark to the original item
    Bookmark,
    /// Any other code
    Unknown(String),
}

impl FieldCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "BKGD" => Self::Background,
            "pict" => Self::Picture,
            "GRP0" => Self::Group,
            "ICVO" => Self::IconViewFlag,
            "LSVO" => Self::ListViewFlag,
            "Iloc" => Self::IconLocation,
            "dilc" => Self::DesktopIconLocation,
            "dscl" => Self::OpenInListView,
            "cmmt" => Self::Comments,
            "extn" => Self::Extension,
            "fwi0" => Self::WindowInfo,
            "fwsw" => Self::SidebarWidth,
            "fwvh" => Self::WindowHeight,
            "icgo" => Self::IconGo,
            "icsp" => Self::IconScroll,
            "icvo" => Self::IconViewOptions,
            "icvp" => Self::IconViewProperties,
            "info" => Self::Info,
            "logS" | "lg1S" => Self::LogicalSize,
            "phyS" | "ph1S" => Self::PhysicalSize,
            "lssp" => Self::ListScroll,
            "lsvo" => Self::ListViewOptions,
            "lsvt" => Self::ListTextSize,
            "bwsp" => Self::LayoutProperties,
            "lsvp" => Self::ListViewProperties,
            "lsvC" => Self::ListViewPropertiesAlternative,
            "lsvP" => Self::ListViewPropertiesOther,
            "moDD" => Self::ModificationDate,
            "modD" => Self::ModificationDateAlternative,
            "vSrn" => Self::ViewVersion,
            "vstl" => Self::ViewStyle,
            "ptbL" => Self::TrashLocation,
            "ptbN" => Self::TrashName,
            "pBBk" => Self::Bookmark,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The name shown in front of the value
    ///
    /// Fields whose meaning is not known are labelled with their code.
    pub fn label(&self) -> &str {
        match self {
            Self::Background => "Background",
            Self::Picture => "Picture",
            Self::Group => "GRP0",
            Self::IconViewFlag => "ICVO",
            Self::ListViewFlag => "LSVO",
            Self::IconLocation => "Icon location",
            Self::DesktopIconLocation => "Icon location on desktop",
            Self::OpenInListView => "Open in list view",
            Self::Comments => "Comments",
            Self::Extension => "Extension",
            Self::WindowInfo => "Finder window information",
            Self::SidebarWidth => "Finder window sidebar width",
            Self::WindowHeight => {
                "Finder window vertical height (overrides Finder window information)"
            }
            Self::IconGo => "icgo",
            Self::IconScroll => "icsp",
            Self::IconViewOptions => "Icon view options",
            Self::IconViewProperties => "Icon view property list",
            Self::Info => "info",
            Self::LogicalSize => "Logical size",
            Self::PhysicalSize => "Physical size",
            Self::ListScroll => "lssp",
            Self::ListViewOptions => "List view options",
            Self::ListTextSize => "List view text size",
            Self::LayoutProperties => "Layout property list",
            Self::ListViewProperties => "List view properties",
            Self::ListViewPropertiesAlternative => "List view properties, alternative",
            Self::ListViewPropertiesOther => "List view properties, other alternative",
            Self::ModificationDate => "Modification date",
            Self::ModificationDateAlternative => "Modification date, alternative",
            Self::ViewVersion => "vSrn",
            Self::ViewStyle => "View style",
            Self::TrashLocation => "Trash put-back location",
            Self::TrashName => "Trash put-back name",
            Self::Bookmark => "Bookmark",
            Self::Unknown(code) => code.as_str(),
        }
    }

    /// The handler for values of this field
    pub fn handler(&self) -> Handler {
        match self {
            Self::Background => background::background,
            Self::Picture | Self::Bookmark => metadata::raw,
            Self::Group => metadata::unknown_text,
            Self::IconViewFlag | Self::ListViewFlag => metadata::unknown_bool,
            Self::IconLocation => icon::location,
            Self::DesktopIconLocation => icon::desktop_location,
            Self::OpenInListView => metadata::flag,
            Self::Comments | Self::Extension | Self::TrashLocation | Self::TrashName => {
                metadata::text
            }
            Self::WindowInfo => window::window_info,
            Self::SidebarWidth | Self::WindowHeight => metadata::integer,
            Self::IconGo | Self::IconScroll => icon::unknown_block,
            Self::IconViewOptions => icon::view_options,
            Self::Info => metadata::unknown_bytes,
            Self::LogicalSize | Self::PhysicalSize => metadata::size,
            Self::ListScroll => list_view::scroll_position,
            Self::ListViewOptions => list_view::options,
            Self::ListTextSize => list_view::text_size,
            Self::LayoutProperties
            | Self::IconViewProperties
            | Self::ListViewProperties
            | Self::ListViewPropertiesAlternative
            | Self::ListViewPropertiesOther => property_list::property_list,
            Self::ModificationDate | Self::ModificationDateAlternative => modified::modified,
            Self::ViewVersion => metadata::unknown_int,
            Self::ViewStyle => window::view_style,
            Self::Unknown(_) => unrecognized,
        }
    }
}

/// Interpret every field of a record, in field code order
pub fn interpret(record: &Record, diagnostics: &mut Diagnostics) -> Vec<String> {
    record
        .fields
        .iter()
        .flat_map(|(code, value)| interpret_field(&record.name, code, value, diagnostics))
        .collect()
}

/// Interpret a single field of the record called `name`
pub fn interpret_field(
    name: &str,
    code: &str,
    value: &RecordValue,
    diagnostics: &mut Diagnostics,
) -> Vec<String> {
    let field = FieldCode::from_code(code);
    match (field.handler())(&field, value, diagnostics) {
        Ok(lines) => lines,
        Err(error) => {
            diagnostics.warn(Warning::Field {
                name: name.to_string(),
                code: code.to_string(),
                error,
            });
            raw_lines(
                &format!("{} (unrecognized)", field.label()),
                value,
                diagnostics,
            )
        }
    }
}

/// Handler for codes we know nothing about
fn unrecognized(
    field: &FieldCode,
    value: &RecordValue,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<String>, FieldError> {
    Ok(raw_lines(
        &format!("{} (unrecognized)", field.label()),
        value,
        diagnostics,
    ))
}

/// Show `value` after `prefix`, inline if it fits on one line, otherwise as a nested block
pub(crate) fn raw_lines(
    prefix: &str,
    value: &RecordValue,
    diagnostics: &mut Diagnostics,
) -> Vec<String> {
    match value {
        RecordValue::Blob(data) => {
            let mut rendered = render_bytes(data, diagnostics);
            if rendered.len() == 1 {
                vec![format!("{prefix}: {}", rendered.remove(0))]
            } else {
                once(format!("{prefix}:"))
                    .chain(rendered.into_iter().map(|line| format!("\t{line}")))
                    .collect()
            }
        }
        other => vec![format!("{prefix}: {other}")],
    }
}

pub(crate) fn expect_bool(value: &RecordValue) -> Result<bool, FieldError> {
    value
        .as_bool()
        .ok_or(FieldError::InvalidType("bool", value.kind()))
}

pub(crate) fn expect_int(value: &RecordValue) -> Result<i64, FieldError> {
    value
        .as_int()
        .ok_or(FieldError::InvalidType("int", value.kind()))
}

pub(crate) fn expect_str(value: &RecordValue) -> Result<&str, FieldError> {
    value
        .as_str()
        .ok_or(FieldError::InvalidType("str", value.kind()))
}

pub(crate) fn expect_bytes(value: &RecordValue) -> Result<&[u8], FieldError> {
    value
        .as_bytes()
        .ok_or(FieldError::InvalidType("bytes", value.kind()))
}

/// A blob that must have one of the `accepted` lengths
pub(crate) fn expect_sized<'a>(
    value: &'a RecordValue,
    accepted: &'static [usize],
) -> Result<&'a [u8], FieldError> {
    let data = expect_bytes(value)?;
    if accepted.contains(&data.len()) {
        Ok(data)
    } else {
        Err(FieldError::InvalidLength(data.len(), accepted))
    }
}

/// A four character tag stored inside a blob
pub(crate) fn tag(data: &[u8]) -> String {
    String::from_utf8_lossy(data).to_string()
}
