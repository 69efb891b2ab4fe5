use crate::data::{CAST, KIND, Kind, NetflixData};
use crate::error::Result;
use crate::explode::listed_count;
use crate::stats::round_ratio;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct CastSize {
    pub kind: Kind,
    pub avg_actors: f64,
}

/// Average cast size per type. A title with no cast counts as zero actors;
/// otherwise the raw list length is used without trimming or dedup.
pub fn avg_cast_size(db: &NetflixData) -> Result<Vec<CastSize>> {
    let t = &db.titles;

    let start = Instant::now();

    let mut acc: BTreeMap<Kind, (i64, i64)> = BTreeMap::new();

    for (kind, cast) in t
        .column(KIND)?
        .str()?
        .into_iter()
        .zip(t.column(CAST)?.str()?)
    {
        if let Some(kind) = kind.and_then(Kind::parse) {
            let (sum, n) = acc.entry(kind).or_default();
            *sum += listed_count(cast) as i64;
            *n += 1;
        }
    }

    let res = acc
        .into_iter()
        .filter_map(|(kind, (sum, n))| {
            round_ratio(sum, n).map(|avg_actors| CastSize { kind, avg_actors })
        })
        .collect();

    debug!("q02,{:}", start.elapsed().as_secs_f32());

    Ok(res)
}

// q02.sql
// SELECT type,
//        ROUND(AVG(CASE WHEN casts IS NULL OR TRIM(casts) = '' THEN 0
//                       ELSE LENGTH(casts) - LENGTH(REPLACE(casts, ',', '')) + 1
//                  END), 2) AS avg_actors
// FROM netflix_titles
// GROUP BY type;
