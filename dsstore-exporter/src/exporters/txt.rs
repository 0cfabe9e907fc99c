use std::io::{BufWriter, Write};

use dsstore_database::{fields::interpret, store::record::Record, util::diagnostics::Diagnostics};

use crate::{
    app::{error::RuntimeError, runtime::Config},
    exporters::exporter::{Exporter, Writer},
};

pub struct TXT<'a> {
    /// Data that is setup from the application's runtime
    pub config: &'a Config,
    /// Destination of the report
    pub file: BufWriter<Box<dyn Write>>,
}

impl<'a> Exporter<'a> for TXT<'a> {
    fn new(config: &'a Config) -> Result<Self, RuntimeError> {
        Ok(TXT {
            config,
            file: config.output()?,
        })
    }

    fn iter_records(&mut self) -> Result<Diagnostics, RuntimeError> {
        let mut diagnostics = Diagnostics::new();

        for record in self.config.store.records() {
            let text = self.format_record(record, &mut diagnostics);
            TXT::write_to_file(&mut self.file, text)?;
        }

        self.file.flush().map_err(RuntimeError::DiskError)?;
        Ok(diagnostics)
    }
}

impl<'a> Writer<'a, String> for TXT<'a> {
    fn format_record(&self, record: &Record, diagnostics: &mut Diagnostics) -> String {
        let mut out_s = String::with_capacity(record.name.len() + 1);
        out_s.push_str(&record.name);
        out_s.push('\n');

        for line in interpret(record, diagnostics) {
            out_s.push('\t');
            out_s.push_str(&line);
            out_s.push('\n');
        }
        out_s
    }

    fn write_to_file(file: &mut BufWriter<Box<dyn Write>>, text: String) -> Result<(), RuntimeError> {
        file.write_all(text.as_bytes())
            .map_err(RuntimeError::DiskError)
    }
}

#[cfg(test)]
mod tests {
    use dsstore_database::{
        store::{record::Record, value::RecordValue},
        util::diagnostics::Diagnostics,
    };

    use crate::{
        app::runtime::tests::{fake_config, fake_options},
        exporters::{
            exporter::{Exporter, Writer},
            txt::TXT,
        },
    };

    #[test]
    fn can_create() {
        let config = fake_config(fake_options());
        let exporter = TXT::new(&config).unwrap();
        assert_eq!(exporter.config.store.records.len(), 2);
    }

    #[test]
    fn can_format_record() {
        let config = fake_config(fake_options());
        let exporter = TXT::new(&config).unwrap();
        let record = config.store.record("notes.txt").unwrap();

        let mut diagnostics = Diagnostics::new();
        let actual = exporter.format_record(record, &mut diagnostics);

        assert_eq!(
            actual,
            "notes.txt\n\tIcon location: x 10px, y 20px, 0x0000000000000000\n\tComments: draft\n"
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn can_format_record_with_bad_field() {
        let config = fake_config(fake_options());
        let exporter = TXT::new(&config).unwrap();

        let mut record = Record::new("a".to_string());
        record.update("BKGD".to_string(), RecordValue::Blob(vec![0; 11]));

        let mut diagnostics = Diagnostics::new();
        let actual = exporter.format_record(&record, &mut diagnostics);

        assert_eq!(
            actual,
            "a\n\tBackground (unrecognized): 0x0000000000000000000000\n"
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn can_format_record_without_fields() {
        let config = fake_config(fake_options());
        let exporter = TXT::new(&config).unwrap();
        let record = Record::new("empty".to_string());

        let actual = exporter.format_record(&record, &mut Diagnostics::new());

        assert_eq!(actual, "empty\n");
    }
}
