use crate::data::{DIRECTOR, KIND, Kind, NetflixData, RELEASE_YEAR};
use crate::error::Result;
use crate::explode::is_blank;
use crate::q10::YearCount;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

pub fn directorless_movie_year(db: &NetflixData) -> Result<Option<YearCount>> {
    let t = &db.titles;

    let start = Instant::now();

    let mut by_year: BTreeMap<i32, u32> = BTreeMap::new();

    for ((kind, director), year) in t
        .column(KIND)?
        .str()?
        .into_iter()
        .zip(t.column(DIRECTOR)?.str()?)
        .zip(t.column(RELEASE_YEAR)?.i32()?)
    {
        if let (Some(Kind::Movie), Some(year)) = (kind.and_then(Kind::parse), year) {
            if is_blank(director) {
                *by_year.entry(year).or_default() += 1;
            }
        }
    }

    let mut res: Option<YearCount> = None;
    for (release_year, title_count) in by_year {
        if res.as_ref().is_none_or(|best| title_count > best.title_count) {
            res = Some(YearCount {
                release_year,
                title_count,
            });
        }
    }

    debug!("q12,{:}", start.elapsed().as_secs_f32());

    Ok(res)
}

// q12.sql
// SELECT release_year, COUNT(*) AS title_count
// FROM netflix_titles
// WHERE type = 'Movie'
//   AND (director IS NULL OR TRIM(director) = '')
// GROUP BY release_year
// ORDER BY title_count DESC, release_year
// LIMIT 1;
