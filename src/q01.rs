use crate::data::{KIND, Kind, NetflixData, RELEASE_YEAR};
use crate::error::Result;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearTrend {
    pub release_year: i32,
    pub movies: u32,
    pub tv_shows: u32,
    pub total: u32,
}

pub fn content_trend(db: &NetflixData) -> Result<Vec<YearTrend>> {
    let t = &db.titles;

    let start = Instant::now();

    let mut by_year: BTreeMap<i32, YearTrend> = BTreeMap::new();

    for (year, kind) in t
        .column(RELEASE_YEAR)?
        .i32()?
        .into_iter()
        .zip(t.column(KIND)?.str()?)
    {
        let Some(year) = year else { continue };
        let trend = by_year.entry(year).or_insert_with(|| YearTrend {
            release_year: year,
            ..YearTrend::default()
        });
        match kind.and_then(Kind::parse) {
            Some(Kind::Movie) => trend.movies += 1,
            Some(Kind::TvShow) => trend.tv_shows += 1,
            None => {}
        }
        trend.total += 1;
    }

    debug!("q01,{:}", start.elapsed().as_secs_f32());

    Ok(by_year.into_values().collect())
}

// q01.sql
// SELECT release_year,
//        COUNT(*) FILTER (WHERE type = 'Movie')   AS movies,
//        COUNT(*) FILTER (WHERE type = 'TV Show') AS tv_shows,
//        COUNT(*)                                 AS total
// FROM netflix_titles
// WHERE release_year IS NOT NULL
// GROUP BY release_year
// ORDER BY release_year;
