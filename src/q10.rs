use crate::data::{DESCRIPTION, NetflixData, RELEASE_YEAR};
use crate::error::Result;
use polars::prelude::*;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCount {
    pub release_year: i32,
    pub title_count: u32,
}

pub fn love_and_war(db: &NetflixData) -> Result<Vec<YearCount>> {
    let start = Instant::now();

    let matched = db
        .titles
        .clone()
        .lazy()
        .filter(
            col(DESCRIPTION)
                .str()
                .contains(lit("(?i)love"), true)
                .and(col(DESCRIPTION).str().contains(lit("(?i)war"), true)),
        )
        .select([col(RELEASE_YEAR)])
        .collect()?;

    let mut by_year: BTreeMap<i32, u32> = BTreeMap::new();
    for year in matched.column(RELEASE_YEAR)?.i32()?.into_iter().flatten() {
        *by_year.entry(year).or_default() += 1;
    }

    debug!("q10,{:}", start.elapsed().as_secs_f32());

    Ok(by_year
        .into_iter()
        .map(|(release_year, title_count)| YearCount {
            release_year,
            title_count,
        })
        .collect())
}

// q10.sql
// SELECT release_year, COUNT(*) AS title_count
// FROM netflix_titles
// WHERE description ILIKE '%love%'
//   AND description ILIKE '%war%'
// GROUP BY release_year
// ORDER BY release_year;
