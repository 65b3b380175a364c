mod record;
mod report;
mod types;

pub use self::{
    record::{Columns, ParseError, Record, Records},
    report::{CategoryBreakdown, ReportError, SalaryReport, YearSummary},
    types::Year,
};
