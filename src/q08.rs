use crate::data::{CAST, LISTED_IN, NetflixData, ROW_ID};
use crate::error::Result;
use crate::explode::explode;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorGenres {
    pub actor: String,
    pub genre_count: u32,
}

pub fn widest_genre_range(db: &NetflixData) -> Result<Option<ActorGenres>> {
    let t = &db.titles;

    let start = Instant::now();

    let mut genre_m: HashMap<u32, Vec<&str>> = HashMap::default();

    for (id, genres) in t
        .column(ROW_ID)?
        .u32()?
        .into_iter()
        .zip(t.column(LISTED_IN)?.str()?)
    {
        if let Some(id) = id {
            let genres: Vec<&str> = explode(genres).collect();
            if !genres.is_empty() {
                genre_m.insert(id, genres);
            }
        }
    }

    let mut pairs: HashSet<(&str, &str)> = HashSet::default();

    for (id, cast) in t
        .column(ROW_ID)?
        .u32()?
        .into_iter()
        .zip(t.column(CAST)?.str()?)
    {
        let Some(genres) = id.and_then(|id| genre_m.get(&id)) else {
            continue;
        };
        for actor in explode(cast) {
            for &genre in genres {
                pairs.insert((actor, genre));
            }
        }
    }

    let mut per_actor: BTreeMap<&str, u32> = BTreeMap::new();
    for &(actor, _) in &pairs {
        *per_actor.entry(actor).or_default() += 1;
    }

    let mut res: Option<(&str, u32)> = None;
    for (actor, count) in per_actor {
        if res.is_none_or(|(_, best)| count > best) {
            res = Some((actor, count));
        }
    }

    debug!("q08,{:}", start.elapsed().as_secs_f32());

    Ok(res.map(|(actor, genre_count)| ActorGenres {
        actor: actor.to_string(),
        genre_count,
    }))
}

// q08.sql
// WITH a AS (
//     SELECT show_id, TRIM(UNNEST(STRING_TO_ARRAY(casts, ','))) AS actor
//     FROM netflix_titles
// ), g AS (
//     SELECT show_id, TRIM(UNNEST(STRING_TO_ARRAY(listed_in, ','))) AS genre
//     FROM netflix_titles
// )
// SELECT a.actor, COUNT(DISTINCT g.genre) AS genre_count
// FROM a JOIN g ON a.show_id = g.show_id
// GROUP BY a.actor
// ORDER BY genre_count DESC, a.actor
// LIMIT 1;
