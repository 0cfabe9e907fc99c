use std::{
    fs::{read, File},
    io::{stdout, BufWriter, Write},
};

use dsstore_database::{
    store::{allocator::FREE_LIST_COUNT, DSStore},
    util::diagnostics::{Diagnostics, Warning},
};

use crate::{
    app::{
        error::RuntimeError,
        options::{ExportType, Options},
    },
    exporters::{exporter::Exporter, ndjson::NDJSON, txt::TXT},
};

/// Stores the application state and handles application lifecycle
pub struct Config {
    /// App configuration options
    pub options: Options,
    /// The decoded file
    pub store: DSStore,
    /// Warnings found while decoding the file structure
    pub diagnostics: Diagnostics,
}

impl Config {
    /// Create a new instance of the application
    ///
    /// # Example:
    ///
    /// ```
    /// use crate::app::{
    ///    options::{get_command, Options},
    ///    runtime::Config,
    /// };
    ///
    /// let args = get_command().get_matches();
    /// let options = Options::from_args(&args).unwrap();
    /// let app = Config::new(options).unwrap();
    /// ```
    pub fn new(options: Options) -> Result<Config, RuntimeError> {
        if options.path_defaulted {
            eprintln!("File unspecified. Using .DS_Store in the current directory...");
        }

        let bytes = read(&options.store_path)
            .map_err(|err| RuntimeError::CannotRead(err, options.store_path.clone()))?;
        let (store, diagnostics) = DSStore::parse(&bytes).map_err(RuntimeError::DecodeError)?;

        Ok(Config {
            options,
            store,
            diagnostics,
        })
    }

    /// Open the destination of the report, either the export path or stdout
    pub fn output(&self) -> Result<BufWriter<Box<dyn Write>>, RuntimeError> {
        let writer: Box<dyn Write> = match &self.options.export_path {
            Some(path) => Box::new(File::create(path).map_err(RuntimeError::DiskError)?),
            None => Box::new(stdout()),
        };
        Ok(BufWriter::new(writer))
    }

    /// Print warnings to stderr unless `--quiet` was passed
    pub fn warn(&self, warnings: &[Warning]) {
        if !self.options.quiet {
            warnings
                .iter()
                .for_each(|warning| eprintln!("Warning: {warning}"));
        }
    }

    /// Summarize the structure of the decoded file
    pub fn diagnostic_lines(&self) -> Vec<String> {
        let store = &self.store;
        let mut lines = vec![".DS_Store diagnostic data:".to_string()];

        lines.push(format!(
            "Header: alignment {:#010x}, magic {:#010x}, allocator at {:#x} ({} bytes)",
            store.header.alignment,
            store.header.magic,
            store.header.allocator_offset,
            store.header.allocator_length
        ));
        lines.push(format!(
            "Offset table: {} blocks",
            store.allocator.offsets.len()
        ));
        lines.push(format!(
            "Directory: {}",
            store
                .allocator
                .directory
                .iter()
                .map(|(key, id)| format!("{key} -> {id}"))
                .collect::<Vec<String>>()
                .join(", ")
        ));
        let size_classes: Vec<String> = (0..FREE_LIST_COUNT)
            .filter_map(|exponent| {
                store
                    .allocator
                    .free_list(exponent)
                    .filter(|ids| !ids.is_empty())
                    .map(|ids| format!("2^{exponent}: {}", ids.len()))
            })
            .collect();
        if size_classes.is_empty() {
            lines.push(format!(
                "Free blocks: {}",
                store.allocator.free_block_count()
            ));
        } else {
            lines.push(format!(
                "Free blocks: {} ({})",
                store.allocator.free_block_count(),
                size_classes.join(", ")
            ));
        }
        lines.push(format!(
            "B-tree: root block {}, height {}",
            store.master.root_id, store.master.tree_height
        ));
        lines.push(format!(
            "Entries: {} declared, {} read",
            store.master.num_records, store.entries_visited
        ));
        lines.push(format!(
            "Nodes: {} declared, {} read",
            store.master.num_nodes, store.nodes_visited
        ));
        lines.push(format!("Records: {}", store.records.len()));
        lines.push(format!("Warnings: {}", self.diagnostics.len()));
        lines
    }

    /// Print the structural summary
    pub fn run_diagnostic(&self) -> Result<(), RuntimeError> {
        let mut output = self.output()?;
        for line in self.diagnostic_lines() {
            writeln!(output, "{line}").map_err(RuntimeError::DiskError)?;
        }
        output.flush().map_err(RuntimeError::DiskError)
    }

    /// Handles diagnostic tests and exports
    pub fn start(&self) -> Result<(), RuntimeError> {
        self.warn(self.diagnostics.warnings());

        if self.options.diagnostic {
            return self.run_diagnostic();
        }

        let field_warnings = match self.options.export_type {
            ExportType::Txt => TXT::new(self)?.iter_records()?,
            ExportType::Json => NDJSON::new(self)?.iter_records()?,
        };
        self.warn(field_warnings.warnings());

        Ok(())
    }
}
