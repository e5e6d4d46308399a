use csv::{ReaderBuilder, StringRecordsIntoIter};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::InputError;

/// One non-blank line of the contacts file, classified by its first field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactRow {
    /// All-digit phone number, whitespace stripped
    Valid(String),
    /// Anything else; carries the stripped first field
    Invalid(String),
}

impl ContactRow {
    pub fn classify(field: &str) -> Self {
        let number = field.trim();
        if is_dialable(number) {
            ContactRow::Valid(number.to_string())
        } else {
            ContactRow::Invalid(number.to_string())
        }
    }
}

/// ASCII digits only: the number is typed key by key into the dial pad,
/// and other Unicode digits have no key to press.
pub fn is_dialable(number: &str) -> bool {
    !number.is_empty() && number.chars().all(|c| c.is_ascii_digit())
}

/// Lazily reads contacts one record at a time. Only the first field of each
/// record is looked at; extra columns are ignored.
pub struct ContactReader<R: Read = File> {
    records: StringRecordsIntoIter<R>,
}

impl ContactReader<File> {
    pub fn open(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
            _ => InputError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> ContactReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        Self { records }
    }
}

impl<R: Read> Iterator for ContactReader<R> {
    type Item = Result<ContactRow, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(InputError::Csv(e))),
            };
            // Blank lines carry no fields
            if let Some(field) = record.get(0) {
                return Some(Ok(ContactRow::classify(field)));
            }
        }
    }
}
