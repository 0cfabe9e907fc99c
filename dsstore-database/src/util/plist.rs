/*!
 Renders property lists, and the byte blobs that may contain them, as indented text.

 Each nesting level adds one tab. Scalars render inline after their key or list marker;
 containers, and blobs that expand into several lines, render as a nested block.
*/

use std::io::Cursor;

use chrono::{DateTime, Utc};
use plist::Value;

use crate::{
    fields::interpret,
    store::DSStore,
    util::{
        bytes::{to_escaped, to_hex},
        diagnostics::{Diagnostics, Warning},
    },
};

/// Prefix of a binary property list
const BPLIST_MAGIC: &[u8] = b"bplist";
/// Prefix of a macOS alias or bookmark
const BOOKMARK_MAGIC: &[u8] = b"book";
/// Prefix of an embedded `.DS_Store` body, which omits the leading alignment word
const STORE_MAGIC: &[u8] = b"Bud1";
/// The alignment word an embedded store needs to be decoded as a file
const STORE_ALIGNMENT: [u8; 4] = [0x00, 0x00, 0x00, 0x01];
/// Embedded stores deeper than this are not decoded
pub const MAX_EMBEDDED_DEPTH: usize = 8;

/// Decode a property list from raw bytes
pub fn parse_plist(data: &[u8]) -> Result<Value, plist::Error> {
    Value::from_reader(Cursor::new(data))
}

/// Render a value at `depth` tabs
pub fn render(value: &Value, depth: usize, diagnostics: &mut Diagnostics) -> Vec<String> {
    let tabs = "\t".repeat(depth);
    match value {
        Value::Dictionary(dictionary) => {
            let mut lines = vec![];
            for (key, item) in dictionary {
                push_item(&mut lines, &format!("{tabs}{key}:"), item, depth, diagnostics);
            }
            lines
        }
        Value::Array(array) => {
            let mut lines = vec![];
            for item in array {
                push_item(&mut lines, &format!("{tabs}-"), item, depth, diagnostics);
            }
            lines
        }
        Value::Data(data) => indent(render_bytes(data, diagnostics), &tabs),
        scalar => vec![format!("{tabs}{}", render_scalar(scalar))],
    }
}

/// Render `item` under `prefix`, either inline or as a nested block one level deeper
fn push_item(
    lines: &mut Vec<String>,
    prefix: &str,
    item: &Value,
    depth: usize,
    diagnostics: &mut Diagnostics,
) {
    match item {
        Value::Dictionary(_) | Value::Array(_) => {
            lines.push(prefix.to_string());
            lines.extend(render(item, depth + 1, diagnostics));
        }
        Value::Data(data) => {
            let mut rendered = render_bytes(data, diagnostics);
            if rendered.len() == 1 {
                lines.push(format!("{prefix} {}", rendered.remove(0)));
            } else {
                lines.push(prefix.to_string());
                lines.extend(indent(rendered, &"\t".repeat(depth + 1)));
            }
        }
        scalar => lines.push(format!("{prefix} {}", render_scalar(scalar))),
    }
}

/// Render a value that has no children
fn render_scalar(value: &Value) -> String {
    match value {
        Value::Boolean(boolean) => boolean.to_string(),
        Value::Integer(integer) => match integer.as_signed() {
            Some(signed) => signed.to_string(),
            None => integer.as_unsigned().unwrap_or_default().to_string(),
        },
        Value::Real(real) => format!("{real:.6}"),
        Value::String(string) => string.clone(),
        Value::Date(date) => {
            DateTime::<Utc>::from(std::time::SystemTime::from(*date))
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
        }
        Value::Uid(uid) => format!("UID({})", uid.get()),
        other => format!("{other:?}"),
    }
}

/// Render a byte blob, expanding the formats we know how to read
///
/// - `bplist` followed by a two digit version: a nested property list
/// - `book`: a macOS alias, shown escaped
/// - `Bud1`: an embedded `.DS_Store`, shown as its records
/// - anything else, or anything that fails to decode: hex
pub fn render_bytes(data: &[u8], diagnostics: &mut Diagnostics) -> Vec<String> {
    if is_bplist(data) {
        if let Ok(value) = parse_plist(data) {
            return render(&value, 0, diagnostics);
        }
    } else if data.starts_with(BOOKMARK_MAGIC) {
        return vec![format!(
            "(in macOS alias type, unparsed) {}",
            to_escaped(data)
        )];
    } else if data.starts_with(STORE_MAGIC) {
        if let Some(lines) = render_embedded_store(data, diagnostics) {
            return lines;
        }
    }
    vec![to_hex(data)]
}

/// Whether `data` starts with `bplist` and a two digit version
fn is_bplist(data: &[u8]) -> bool {
    data.len() >= 8
        && data.starts_with(BPLIST_MAGIC)
        && data[6..8].iter().all(u8::is_ascii_digit)
}

/// Decode a store nested inside a blob, returning `None` if it is not valid or nested too deeply
fn render_embedded_store(data: &[u8], diagnostics: &mut Diagnostics) -> Option<Vec<String>> {
    if diagnostics.embedded_depth() >= MAX_EMBEDDED_DEPTH {
        diagnostics.warn(Warning::EmbeddedTooDeep(MAX_EMBEDDED_DEPTH));
        return None;
    }

    let mut nested = diagnostics.nested();
    let store = {
        let mut file = STORE_ALIGNMENT.to_vec();
        file.extend_from_slice(data);
        DSStore::parse_with(&file, &mut nested).ok()?
    };

    let mut lines = vec![];
    for record in store.records() {
        lines.push(record.name.clone());
        lines.extend(
            interpret(record, &mut nested)
                .into_iter()
                .map(|line| format!("\t{line}")),
        );
    }
    diagnostics.extend(nested);
    Some(lines)
}

fn indent(lines: Vec<String>, tabs: &str) -> Vec<String> {
    if tabs.is_empty() {
        return lines;
    }
    lines.into_iter().map(|line| format!("{tabs}{line}")).collect()
}

#[cfg(test)]
mod tests {
    use plist::{Dictionary, Value};

    use crate::{
        store::tests::fixture::{blob, boolean, entry, single_leaf},
        util::{
            diagnostics::{Diagnostics, Warning},
            plist::{render, render_bytes, MAX_EMBEDDED_DEPTH},
        },
    };

    fn to_bplist(value: &Value) -> Vec<u8> {
        let mut bytes = vec![];
        value.to_writer_binary(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn can_render_dictionary() {
        let mut inner = Dictionary::new();
        inner.insert("x".to_string(), Value::Integer(3i64.into()));
        let mut dictionary = Dictionary::new();
        dictionary.insert("flag".to_string(), Value::Boolean(true));
        dictionary.insert("inner".to_string(), Value::Dictionary(inner));
        dictionary.insert("scale".to_string(), Value::Real(1.5));

        let lines = render(&Value::Dictionary(dictionary), 1, &mut Diagnostics::new());

        assert_eq!(
            lines,
            vec!["\tflag: true", "\tinner:", "\t\tx: 3", "\tscale: 1.500000"]
        );
    }

    #[test]
    fn can_render_array() {
        let value = Value::Array(vec![
            Value::String("a".to_string()),
            Value::Array(vec![Value::Integer((-1i64).into())]),
        ]);

        let lines = render(&value, 0, &mut Diagnostics::new());

        assert_eq!(lines, vec!["- a", "-", "\t- -1"]);
    }

    #[test]
    fn can_render_nested_bplist() {
        let mut dictionary = Dictionary::new();
        dictionary.insert("ShowSidebar".to_string(), Value::Boolean(false));
        let bytes = to_bplist(&Value::Dictionary(dictionary));

        let lines = render_bytes(&bytes, &mut Diagnostics::new());

        assert_eq!(lines, vec!["ShowSidebar: false"]);
    }

    #[test]
    fn can_render_bytes_in_dictionary() {
        let mut nested = Dictionary::new();
        nested.insert("a".to_string(), Value::Integer(1i64.into()));
        nested.insert("b".to_string(), Value::Integer(2i64.into()));
        let mut outer = Dictionary::new();
        outer.insert("raw".to_string(), Value::Data(vec![0xca, 0xfe]));
        outer.insert(
            "plist".to_string(),
            Value::Data(to_bplist(&Value::Dictionary(nested))),
        );

        let lines = render(&Value::Dictionary(outer), 0, &mut Diagnostics::new());

        assert_eq!(lines, vec!["raw: 0xcafe", "plist:", "\ta: 1", "\tb: 2"]);
    }

    #[test]
    fn can_render_bookmark() {
        let lines = render_bytes(b"book\x00\x01", &mut Diagnostics::new());
        assert_eq!(
            lines,
            vec!["(in macOS alias type, unparsed) \"book\\x00\\x01\""]
        );
    }

    #[test]
    fn can_render_invalid_bplist_as_hex() {
        let lines = render_bytes(b"bplist00garbage", &mut Diagnostics::new());
        assert_eq!(lines, vec!["0x62706c697374303067617262616765"]);
    }

    #[test]
    fn can_render_bplist_prefix_without_version_as_hex() {
        let lines = render_bytes(b"bplistXY", &mut Diagnostics::new());
        assert_eq!(lines, vec!["0x62706c6973745859"]);
    }

    #[test]
    fn can_render_embedded_store() {
        let file = single_leaf(&[entry("inner", b"dscl", &boolean(true))]);
        // Embedded stores drop the alignment word
        let lines = render_bytes(&file[4..], &mut Diagnostics::new());

        assert_eq!(lines, vec!["inner", "\tOpen in list view: true"]);
    }

    #[test]
    fn can_render_broken_embedded_store_as_hex() {
        let lines = render_bytes(b"Bud1\x00", &mut Diagnostics::new());
        assert_eq!(lines, vec!["0x4275643100"]);
    }

    #[test]
    fn can_render_uid() {
        let value = Value::Uid(plist::Uid::new(7));
        assert_eq!(render(&value, 0, &mut Diagnostics::new()), vec!["UID(7)"]);
    }

    #[test]
    fn can_stop_at_embedded_depth_limit() {
        let mut file = single_leaf(&[entry("last", b"dscl", &boolean(true))]);
        for _ in 0..MAX_EMBEDDED_DEPTH + 1 {
            file = single_leaf(&[entry("n", b"pict", &blob(&file[4..]))]);
        }
        let mut diagnostics = Diagnostics::new();

        let lines = render_bytes(&file[4..], &mut diagnostics);

        let decoded = lines.iter().filter(|line| line.trim_start() == "n").count();
        assert_eq!(decoded, MAX_EMBEDDED_DEPTH);
        assert!(lines
            .iter()
            .any(|line| line.trim_start().starts_with("Picture: 0x42756431")));
        assert!(!lines.iter().any(|line| line.contains("last")));
        assert_eq!(
            diagnostics.warnings(),
            &[Warning::EmbeddedTooDeep(MAX_EMBEDDED_DEPTH)]
        );
    }
}
