use salary_report::{Columns, Records, SalaryReport, Year};

use std::{env, error::Error};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let dataset = env::args()
        .nth(1)
        .expect("provide a csv file with salary records to parse");
    let year: Option<Year> = env::args().nth(2).map(|year| year.parse()).transpose()?;

    let records = Records::from_csv(&dataset, &Columns::default())?;
    let report = SalaryReport::from_records(records);

    match year {
        Some(year) => report.breakdown_to_csv(year)?,
        None => report.to_csv()?,
    }

    Ok(())
}
