use std::io::{BufWriter, Write};

use dsstore_database::{store::record::Record, util::diagnostics::Diagnostics};

use crate::app::{error::RuntimeError, runtime::Config};

/// Defines behavior for iterating over the records of a decoded file and writing the report
pub trait Exporter<'a> {
    /// Create a new exporter with a reference to the decoded file
    fn new(config: &'a Config) -> Result<Self, RuntimeError>
    where
        Self: Sized;
    /// Write every record, returning the warnings raised while interpreting fields
    fn iter_records(&mut self) -> Result<Diagnostics, RuntimeError>;
}

/// Defines behavior for formatting records to the desired output format
pub(super) trait Writer<'a, T> {
    /// Format a record and all of its fields
    fn format_record(&self, record: &Record, diagnostics: &mut Diagnostics) -> T;
    fn write_to_file(file: &mut BufWriter<Box<dyn Write>>, item: T) -> Result<(), RuntimeError>;
}
