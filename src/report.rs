use std::{collections::HashMap, io::stdout};

use derive_getters::Getters;
use derive_more::Constructor;
use serde::Serialize;
use thiserror::Error;

use super::{
    record::{Record, Records},
    types::Year,
};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("no records for year {0}")]
    UnknownYear(Year),
}

#[derive(Debug, Clone, PartialEq, Serialize, Constructor, Getters)]
pub struct YearSummary {
    year: Year,
    total_count: u64,
    average_salary: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Constructor, Getters)]
pub struct CategoryBreakdown {
    category: String,
    count: u64,
}

#[derive(Debug, Default)]
struct YearAccumulator {
    total_count: u64,
    total_salary: f64,
    category_order: Vec<String>,
    category_counts: HashMap<String, u64>,
}

impl YearAccumulator {
    fn add(&mut self, record: &Record) {
        self.total_count += 1;
        self.total_salary += record.salary_usd();
        match self.category_counts.get_mut(record.category()) {
            Some(count) => *count += 1,
            None => {
                self.category_order.push(record.category().clone());
                self.category_counts.insert(record.category().clone(), 1);
            }
        }
    }

    fn finalize(self, year: Year) -> (YearSummary, Vec<CategoryBreakdown>) {
        let Self {
            total_count,
            total_salary,
            category_order,
            category_counts,
        } = self;

        // total_count >= 1: a year only gets an accumulator from a record.
        let average_salary = (total_salary / total_count as f64).round() as i64;
        let breakdowns = category_order
            .into_iter()
            .map(|category| {
                let count = category_counts[&category];
                CategoryBreakdown::new(category, count)
            })
            .collect();

        (YearSummary::new(year, total_count, average_salary), breakdowns)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryReport {
    summaries: Vec<YearSummary>,
    breakdowns: HashMap<Year, Vec<CategoryBreakdown>>,
}

impl SalaryReport {
    pub fn from_records(records: Records) -> Self {
        let mut year_order: Vec<Year> = Vec::new();
        let mut accumulators: HashMap<Year, YearAccumulator> = HashMap::new();

        for record in &records.0 {
            let year = *record.year();
            accumulators
                .entry(year)
                .or_insert_with(|| {
                    year_order.push(year);
                    YearAccumulator::default()
                })
                .add(record);
        }

        let mut summaries = Vec::with_capacity(year_order.len());
        let mut breakdowns = HashMap::with_capacity(year_order.len());
        for year in year_order {
            if let Some(accumulator) = accumulators.remove(&year) {
                let (summary, categories) = accumulator.finalize(year);
                summaries.push(summary);
                breakdowns.insert(year, categories);
            }
        }

        Self {
            summaries,
            breakdowns,
        }
    }

    pub fn summaries(&self) -> &[YearSummary] {
        &self.summaries
    }

    pub fn breakdown(&self, year: Year) -> Option<&[CategoryBreakdown]> {
        self.breakdowns.get(&year).map(Vec::as_slice)
    }

    pub fn trend(&self) -> Vec<(Year, u64)> {
        self.summaries
            .iter()
            .map(|summary| (summary.year, summary.total_count))
            .collect()
    }

    pub fn write_summary<W: std::io::Write>(&self, wrt: W) -> Result<(), ReportError> {
        let mut wrt = csv::Writer::from_writer(wrt);
        for summary in &self.summaries {
            wrt.serialize(summary)?;
        }
        wrt.flush()?;

        Ok(())
    }

    pub fn write_breakdown<W: std::io::Write>(
        &self,
        year: Year,
        wrt: W,
    ) -> Result<(), ReportError> {
        let breakdowns = self
            .breakdowns
            .get(&year)
            .ok_or(ReportError::UnknownYear(year))?;
        let mut wrt = csv::Writer::from_writer(wrt);
        for breakdown in breakdowns {
            wrt.serialize(breakdown)?;
        }
        wrt.flush()?;

        Ok(())
    }

    pub fn to_csv(&self) -> Result<(), ReportError> {
        self.write_summary(stdout())
    }

    pub fn breakdown_to_csv(&self, year: Year) -> Result<(), ReportError> {
        self.write_breakdown(year, stdout())
    }
}
