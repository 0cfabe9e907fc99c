/*!
 Records accumulate the field values found for each file name while the tree is walked.
*/

use std::collections::{BTreeMap, HashMap};

use crate::store::value::RecordValue;

/// All of the fields stored for a single file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The file name the fields describe; `.` is the directory itself
    pub name: String,
    /// Field code to decoded value
    pub fields: BTreeMap<String, RecordValue>,
}

impl Record {
    pub fn new(name: String) -> Self {
        Self {
            name,
            fields: BTreeMap::new(),
        }
    }

    /// Insert a field, replacing any earlier value for the same code
    pub fn update(&mut self, code: String, value: RecordValue) {
        self.fields.insert(code, value);
    }

    pub fn get(&self, code: &str) -> Option<&RecordValue> {
        self.fields.get(code)
    }
}

/// Records in the order their names were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
    /// Record name to position in `records`
    index: HashMap<String, usize>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to the record called `name`, creating the record if this is the first time we see it
    pub fn insert(&mut self, name: String, code: String, value: RecordValue) {
        match self.index.get(&name) {
            Some(&position) => self.records[position].update(code, value),
            None => {
                let mut record = Record::new(name.clone());
                record.update(code, value);
                self.index.insert(name, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.index.get(name).map(|&position| &self.records[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every stored value as `(name, field code, value)`, in record then field order
    pub fn triples(&self) -> Vec<(&str, &str, &RecordValue)> {
        self.records
            .iter()
            .flat_map(|record| {
                record
                    .fields
                    .iter()
                    .map(move |(code, value)| (record.name.as_str(), code.as_str(), value))
            })
            .collect()
    }
}
