use crate::data::{DIRECTOR, NetflixData, ROW_ID};
use crate::error::Result;
use crate::explode::explode;
use ahash::HashSet;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

pub fn one_hit_directors(db: &NetflixData) -> Result<Vec<String>> {
    let t = &db.titles;

    let start = Instant::now();

    let mut titles_by: BTreeMap<&str, HashSet<u32>> = BTreeMap::new();

    for (id, director) in t
        .column(ROW_ID)?
        .u32()?
        .into_iter()
        .zip(t.column(DIRECTOR)?.str()?)
    {
        let Some(id) = id else { continue };
        for director in explode(director) {
            titles_by.entry(director).or_default().insert(id);
        }
    }

    let res = titles_by
        .into_iter()
        .filter(|(_, ids)| ids.len() == 1)
        .map(|(director, _)| director.to_string())
        .collect();

    debug!("q13,{:}", start.elapsed().as_secs_f32());

    Ok(res)
}

// q13.sql
// WITH d AS (
//     SELECT show_id, TRIM(UNNEST(STRING_TO_ARRAY(director, ','))) AS director
//     FROM netflix_titles
//     WHERE director IS NOT NULL AND TRIM(director) <> ''
// )
// SELECT director
// FROM d
// GROUP BY director
// HAVING COUNT(DISTINCT show_id) = 1
// ORDER BY director;
