use std::{fmt::Display, path::PathBuf};

use clap::{crate_version, Arg, ArgAction, ArgMatches, Command};

use crate::app::error::RuntimeError;

/// Default file to read when no path is given
pub const DEFAULT_PATH: &str = ".DS_Store";

// CLI Arg Names
pub const OPTION_PATH: &str = "path";
pub const OPTION_EXPORT_TYPE: &str = "format";
pub const OPTION_EXPORT_PATH: &str = "export-path";
pub const OPTION_DIAGNOSTIC: &str = "diagnostics";
pub const OPTION_QUIET: &str = "quiet";

// Other CLI Text
pub const SUPPORTED_FILE_TYPES: &str = "txt, json";
pub const ABOUT: &str = concat!(
    "The `dsstore-exporter` binary decodes the .DS_Store files macOS Finder\n",
    "writes into every folder it opens and prints their records as text or ndjson.\n",
    "Structural problems the decoder can work around are printed as warnings on stderr.",
);

/// Formats the report can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportType {
    /// One line per record name, followed by tab indented field lines
    Txt,
    /// One JSON object per record
    Json,
}

impl ExportType {
    /// Given user's input, return a variant if the input matches one
    pub fn from_cli(platform: &str) -> Option<Self> {
        match platform.to_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

impl Display for ExportType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportType::Txt => write!(fmt, "txt"),
            ExportType::Json => write!(fmt, "json"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Options {
    /// Path to the `.DS_Store` file to read
    pub store_path: PathBuf,
    /// `true` if no path was given and [`DEFAULT_PATH`] is used
    pub path_defaulted: bool,
    /// The format the report is written in
    pub export_type: ExportType,
    /// Where the report is written; `None` writes to stdout
    pub export_path: Option<PathBuf>,
    /// If true, print a summary of the file structure instead of the records
    pub diagnostic: bool,
    /// If true, do not print warnings
    pub quiet: bool,
}

impl Options {
    pub fn from_args(args: &ArgMatches) -> Result<Self, RuntimeError> {
        let paths: Vec<&String> = args
            .get_many::<String>(OPTION_PATH)
            .map(|values| values.collect())
            .unwrap_or_default();
        let export_type: Option<&String> = args.get_one(OPTION_EXPORT_TYPE);
        let export_path: Option<&String> = args.get_one(OPTION_EXPORT_PATH);
        let diagnostic = args.get_flag(OPTION_DIAGNOSTIC);
        let quiet = args.get_flag(OPTION_QUIET);

        // Only one file can be decoded per run
        if paths.len() > 1 {
            return Err(RuntimeError::InvalidOptions(format!(
                "Usage: {} [<.DS_Store file>]",
                env!("CARGO_PKG_NAME")
            )));
        }

        // Prevent diagnostics from being run alongside an export
        if diagnostic && (export_type.is_some() || export_path.is_some()) {
            return Err(RuntimeError::InvalidOptions(format!(
                "Diagnostics are enabled; --{OPTION_EXPORT_TYPE} and --{OPTION_EXPORT_PATH} are disallowed"
            )));
        }

        // Ensure that if an export type is specified, it is one we support
        let export_type = match export_type {
            Some(export_type_str) => {
                ExportType::from_cli(export_type_str).ok_or(RuntimeError::InvalidOptions(
                    format!("{export_type_str} is not a valid export type! Must be one of <{SUPPORTED_FILE_TYPES}>"),
                ))?
            }
            None => ExportType::Txt,
        };

        let (store_path, path_defaulted) = match paths.first() {
            Some(path) => (PathBuf::from(path.as_str()), false),
            None => (PathBuf::from(DEFAULT_PATH), true),
        };

        Ok(Options {
            store_path,
            path_defaulted,
            export_type,
            export_path: export_path.map(PathBuf::from),
            diagnostic,
            quiet,
        })
    }
}

/// Build the command line interface
pub fn get_command() -> Command {
    Command::new("dsstore-exporter")
        .version(crate_version!())
        .about(ABOUT)
        .arg_required_else_help(false)
        .arg(
            Arg::new(OPTION_PATH)
                .help(format!("Path to the .DS_Store file to decode\nIf omitted, {DEFAULT_PATH} in the current directory is used\n"))
                .action(ArgAction::Append)
                .num_args(0..)
                .value_name("path"),
        )
        .arg(
            Arg::new(OPTION_EXPORT_TYPE)
                .short('f')
                .long(OPTION_EXPORT_TYPE)
                .help("Specify a single file format to export the report as\nIf omitted, the report is written as txt\n")
                .display_order(1)
                .value_name(SUPPORTED_FILE_TYPES),
        )
        .arg(
            Arg::new(OPTION_EXPORT_PATH)
                .short('o')
                .long(OPTION_EXPORT_PATH)
                .help("Specify a file to write the report to\nIf omitted, the report is written to stdout\n")
                .display_order(2)
                .value_name("path/to/file"),
        )
        .arg(
            Arg::new(OPTION_DIAGNOSTIC)
                .short('d')
                .long(OPTION_DIAGNOSTIC)
                .help("Print a summary of the file structure instead of the records\n")
                .action(ArgAction::SetTrue)
                .display_order(0),
        )
        .arg(
            Arg::new(OPTION_QUIET)
                .short('q')
                .long(OPTION_QUIET)
                .help("Do not print warnings to stderr\n")
                .action(ArgAction::SetTrue)
                .display_order(3),
        )
}
