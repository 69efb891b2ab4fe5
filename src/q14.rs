use crate::data::{COUNTRY, DURATION, KIND, Kind, NetflixData};
use crate::error::Result;
use crate::explode::explode;
use crate::stats::median;
use regex::Regex;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct CountryMedian {
    pub country: String,
    pub median_seasons: f64,
}

pub fn median_seasons(db: &NetflixData) -> Result<Vec<CountryMedian>> {
    let t = &db.titles;
    let seasons_re = Regex::new(r"(?i)^\s*(\d+)\s+seasons?\s*$")?;

    let start = Instant::now();

    let mut by_country: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for ((kind, duration), country) in t
        .column(KIND)?
        .str()?
        .into_iter()
        .zip(t.column(DURATION)?.str()?)
        .zip(t.column(COUNTRY)?.str()?)
    {
        if kind.and_then(Kind::parse) != Some(Kind::TvShow) {
            continue;
        }
        let Some(seasons) = duration
            .and_then(|d| seasons_re.captures(d))
            .and_then(|c| c[1].parse::<u32>().ok())
        else {
            continue;
        };
        for country in explode(country) {
            by_country.entry(country).or_default().push(seasons as f64);
        }
    }

    let res = by_country
        .into_iter()
        .filter_map(|(country, mut seasons)| {
            median(&mut seasons).map(|median_seasons| CountryMedian {
                country: country.to_string(),
                median_seasons,
            })
        })
        .collect();

    debug!("q14,{:}", start.elapsed().as_secs_f32());

    Ok(res)
}

// q14.sql
// WITH s AS (
//     SELECT TRIM(UNNEST(STRING_TO_ARRAY(country, ','))) AS country,
//            SPLIT_PART(duration, ' ', 1)::int AS seasons
//     FROM netflix_titles
//     WHERE type = 'TV Show' AND duration ~* '^\d+ Seasons?$'
// )
// SELECT country,
//        PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY seasons) AS median_seasons
// FROM s
// GROUP BY country
// ORDER BY country;
