//! Batch classification of filenames.

use serde::{Deserialize, Serialize};

use crate::invoice::filename::{is_valid, parse, ParsedInvoiceFilename};

/// Input partitioned into valid and invalid filenames, each group in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchValidation {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl BatchValidation {
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    /// Decoded records for the valid group.
    pub fn parsed(&self) -> Vec<ParsedInvoiceFilename> {
        self.valid.iter().filter_map(|name| parse(name)).collect()
    }
}

pub fn batch_validate<I, S>(filenames: I) -> BatchValidation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut result = BatchValidation::default();
    for filename in filenames {
        let filename = filename.into();
        if is_valid(&filename) {
            result.valid.push(filename);
        } else {
            result.invalid.push(filename);
        }
    }
    result
}
