use crate::data::{COUNTRY, KIND, Kind, NetflixData};
use crate::error::Result;
use crate::explode::explode;
use crate::stats::round_ratio;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct CountryRatio {
    pub country: String,
    pub tv_shows: u32,
    pub movies: u32,
    pub ratio: f64,
}

/// The country with the highest TV show to movie ratio. Countries without
/// movies are skipped; ties go to the smallest country name.
pub fn top_tv_ratio(db: &NetflixData) -> Result<Option<CountryRatio>> {
    let t = &db.titles;

    let start = Instant::now();

    let mut by_country: BTreeMap<&str, (u32, u32)> = BTreeMap::new();

    for (kind, country) in t
        .column(KIND)?
        .str()?
        .into_iter()
        .zip(t.column(COUNTRY)?.str()?)
    {
        let Some(kind) = kind.and_then(Kind::parse) else {
            continue;
        };
        for country in explode(country) {
            let (tv, movies) = by_country.entry(country).or_default();
            match kind {
                Kind::TvShow => *tv += 1,
                Kind::Movie => *movies += 1,
            }
        }
    }

    let mut best: Option<(&str, u32, u32)> = None;
    for (country, (tv, movies)) in by_country {
        if movies == 0 {
            continue;
        }
        // tv / movies > best_tv / best_movies, without dividing
        let better = best.is_none_or(|(_, best_tv, best_movies)| {
            (tv as u64 * best_movies as u64).cmp(&(best_tv as u64 * movies as u64))
                == Ordering::Greater
        });
        if better {
            best = Some((country, tv, movies));
        }
    }

    debug!("q07,{:}", start.elapsed().as_secs_f32());

    Ok(best.map(|(country, tv_shows, movies)| CountryRatio {
        country: country.to_string(),
        tv_shows,
        movies,
        ratio: round_ratio(tv_shows as i64, movies as i64).unwrap_or_default(),
    }))
}

// q07.sql
// WITH c AS (
//     SELECT TRIM(UNNEST(STRING_TO_ARRAY(country, ','))) AS country, type
//     FROM netflix_titles
// )
// SELECT country,
//        COUNT(*) FILTER (WHERE type = 'TV Show') AS tv_shows,
//        COUNT(*) FILTER (WHERE type = 'Movie')   AS movies,
//        ROUND(COUNT(*) FILTER (WHERE type = 'TV Show')::numeric
//              / COUNT(*) FILTER (WHERE type = 'Movie'), 2) AS ratio
// FROM c
// GROUP BY country
// HAVING COUNT(*) FILTER (WHERE type = 'Movie') > 0
// ORDER BY COUNT(*) FILTER (WHERE type = 'TV Show')::numeric
//          / COUNT(*) FILTER (WHERE type = 'Movie') DESC, country
// LIMIT 1;
