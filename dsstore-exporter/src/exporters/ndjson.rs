use std::io::{BufWriter, Write};

use base64::{prelude::BASE64_STANDARD, Engine};
use json::{object, JsonValue};

use dsstore_database::{
    fields::interpret_field,
    store::{record::Record, value::RecordValue},
    util::diagnostics::Diagnostics,
};

use crate::{
    app::{error::RuntimeError, runtime::Config},
    exporters::exporter::{Exporter, Writer},
};

pub struct NDJSON<'a> {
    /// Data that is setup from the application's runtime
    pub config: &'a Config,
    /// Destination of the report
    pub file: BufWriter<Box<dyn Write>>,
}

impl<'a> Exporter<'a> for NDJSON<'a> {
    fn new(config: &'a Config) -> Result<Self, RuntimeError> {
        Ok(NDJSON {
            config,
            file: config.output()?,
        })
    }

    fn iter_records(&mut self) -> Result<Diagnostics, RuntimeError> {
        let mut diagnostics = Diagnostics::new();

        for record in self.config.store.records() {
            let json_record = self.format_record(record, &mut diagnostics);
            NDJSON::write_to_file(&mut self.file, json_record)?;
        }

        self.file.flush().map_err(RuntimeError::DiskError)?;
        Ok(diagnostics)
    }
}

impl<'a> NDJSON<'a> {
    /// The decoded value itself; blobs are base64 encoded
    fn format_value(value: &RecordValue) -> JsonValue {
        match value {
            RecordValue::Bool(boolean) => JsonValue::from(*boolean),
            RecordValue::Int32(number) => JsonValue::from(*number),
            RecordValue::Int64(number) => JsonValue::from(*number),
            RecordValue::Type(text) | RecordValue::Text(text) => JsonValue::from(text.as_str()),
            RecordValue::Blob(data) => JsonValue::from(BASE64_STANDARD.encode(data)),
        }
    }
}

impl<'a> Writer<'a, JsonValue> for NDJSON<'a> {
    fn format_record(&self, record: &Record, diagnostics: &mut Diagnostics) -> JsonValue {
        let fields: Vec<JsonValue> = record
            .fields
            .iter()
            .map(|(code, value)| {
                object! {
                    code: code.as_str(),
                    "type": value.kind(),
                    value: NDJSON::format_value(value),
                    lines: interpret_field(&record.name, code, value, diagnostics),
                }
            })
            .collect();

        object! {
            name: record.name.as_str(),
            fields: JsonValue::Array(fields),
        }
    }

    fn write_to_file(
        file: &mut BufWriter<Box<dyn Write>>,
        item: JsonValue,
    ) -> Result<(), RuntimeError> {
        file.write_all((item.dump() + "\n").as_bytes())
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
            ndjson::NDJSON,
        },
    };

    #[test]
    fn can_format_record() {
        let config = fake_config(fake_options());
        let exporter = NDJSON::new(&config).unwrap();
        let record = config.store.record("notes.txt").unwrap();

        let actual = exporter.format_record(record, &mut Diagnostics::new());

        assert_eq!(
            actual.dump(),
            concat!(
                r#"{"name":"notes.txt","fields":["#,
                r#"{"code":"Iloc","type":"bytes","value":"AAAACgAAABQAAAAAAAAAAA==","lines":["Icon location: x 10px, y 20px, 0x0000000000000000"]},"#,
                r#"{"code":"cmmt","type":"str","value":"draft","lines":["Comments: draft"]}"#,
                r#"]}"#
            )
        );
    }

    #[test]
    fn can_format_scalar_values() {
        let config = fake_config(fake_options());
        let exporter = NDJSON::new(&config).unwrap();

        let mut record = Record::new("a".to_string());
        record.update("dscl".to_string(), RecordValue::Bool(true));
        record.update("lsvt".to_string(), RecordValue::Int32(12));
        record.update("vstl".to_string(), RecordValue::Type("icnv".to_string()));

        let actual = exporter.format_record(&record, &mut Diagnostics::new());

        assert_eq!(actual["fields"][0]["value"], true);
        assert_eq!(actual["fields"][1]["value"], 12);
        assert_eq!(actual["fields"][1]["lines"][0], "List view text size: 12pt");
        assert_eq!(actual["fields"][2]["type"], "type");
        assert_eq!(actual["fields"][2]["lines"][0], "View style: Icon view");
    }

    #[test]
    fn can_collect_field_warnings() {
        let config = fake_config(fake_options());
        let exporter = NDJSON::new(&config).unwrap();

        let mut record = Record::new("a".to_string());
        record.update("fwi0".to_string(), RecordValue::Blob(vec![1, 2]));

        let mut diagnostics = Diagnostics::new();
        let actual = exporter.format_record(&record, &mut diagnostics);

        assert_eq!(actual["fields"][0]["value"], "AQI=");
        assert_eq!(
            actual["fields"][0]["lines"][0],
            "Finder window information (unrecognized): 0x0102"
        );
        assert_eq!(diagnostics.len(), 1);
    }
}
