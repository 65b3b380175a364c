use std::{fs::File, io::Read, path::Path};

use derive_getters::Getters;
use derive_more::{Constructor, Deref};
use log::{debug, warn};
use thiserror::Error;

use super::types::Year;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("csv error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("input has no header line")]
    MissingHeader,
    #[error("column `{0}` not found in header")]
    MissingColumn(String),
}

#[derive(Debug, Clone, Constructor)]
pub struct Columns {
    year: String,
    salary: String,
    category: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self::new(
            "work_year".to_string(),
            "salary_in_usd".to_string(),
            "job_title".to_string(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Constructor, Getters)]
pub struct Record {
    year: Year,
    salary_usd: f64,
    category: String,
}

#[derive(Debug, Clone, PartialEq, Deref)]
pub struct Records(pub Vec<Record>);

impl Records {
    pub fn from_csv(path: impl AsRef<Path>, columns: &Columns) -> Result<Self, ParseError> {
        Self::from_reader(File::open(path)?, columns)
    }

    pub fn from_reader<R: Read>(rdr: R, columns: &Columns) -> Result<Self, ParseError> {
        let mut rdr = csv::Reader::from_reader(rdr);
        let headers = rdr.headers()?.clone();
        if headers.iter().all(|header| header.trim().is_empty()) {
            return Err(ParseError::MissingHeader);
        }

        let year_idx = column_index(&headers, &columns.year)?;
        let salary_idx = column_index(&headers, &columns.salary)?;
        let category_idx = column_index(&headers, &columns.category)?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (i, row) in rdr.records().enumerate() {
            // Data starts on line 2, after the header.
            let line = i + 2;
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    debug!("line {line}: {err}");
                    skipped += 1;
                    continue;
                }
            };
            match parse_row(&row, year_idx, salary_idx, category_idx) {
                Some(record) => records.push(record),
                None => {
                    debug!("line {line}: uncoercible fields in {row:?}");
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            warn!("skipped {skipped} malformed rows");
        }

        Ok(Self(records))
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, ParseError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
}

fn parse_row(
    row: &csv::StringRecord,
    year_idx: usize,
    salary_idx: usize,
    category_idx: usize,
) -> Option<Record> {
    let year = row.get(year_idx)?.trim().parse().ok()?;
    let salary_usd = row.get(salary_idx)?.trim().parse().ok()?;
    let category = row.get(category_idx)?.to_string();

    Some(Record::new(year, salary_usd, category))
}
