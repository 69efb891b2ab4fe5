use crate::data::{DATE_ADDED, NetflixData};
use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCount {
    pub month: String,
    pub title_count: u32,
}

pub fn parse_date_added(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%B %d, %Y").ok()
}

/// Titles added per calendar month, busiest first. Equal counts keep
/// calendar order. Blank or unparseable dates are skipped.
pub fn seasonality(db: &NetflixData) -> Result<Vec<MonthCount>> {
    let t = &db.titles;

    let start = Instant::now();

    let mut by_month: BTreeMap<u32, (NaiveDate, u32)> = BTreeMap::new();

    for date in t
        .column(DATE_ADDED)?
        .str()?
        .into_iter()
        .filter_map(|s| s.and_then(parse_date_added))
    {
        by_month.entry(date.month()).or_insert((date, 0)).1 += 1;
    }

    let mut res: Vec<MonthCount> = by_month
        .into_values()
        .map(|(date, title_count)| MonthCount {
            month: date.format("%B").to_string(),
            title_count,
        })
        .collect();
    res.sort_by(|a, b| b.title_count.cmp(&a.title_count));

    debug!("q06,{:}", start.elapsed().as_secs_f32());

    Ok(res)
}

// q06.sql
// SELECT TO_CHAR(TO_DATE(TRIM(date_added), 'Month DD, YYYY'), 'FMMonth') AS month,
//        COUNT(*) AS title_count
// FROM netflix_titles
// WHERE date_added IS NOT NULL AND TRIM(date_added) <> ''
// GROUP BY month
// ORDER BY title_count DESC;
