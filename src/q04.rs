use crate::data::{CAST, DIRECTOR, NetflixData, ROW_ID};
use crate::error::Result;
use crate::explode::explode;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorActors {
    pub director: String,
    pub actor_count: u32,
}

pub fn director_actor_pairs(db: &NetflixData) -> Result<Vec<(String, String)>> {
    let mut pairs: Vec<(String, String)> = collect_pairs(db)?
        .into_iter()
        .map(|(d, a)| (d.to_string(), a.to_string()))
        .collect();
    pairs.sort();
    Ok(pairs)
}

/// The director who worked with the most distinct actors. Ties go to the
/// lexicographically smallest name.
pub fn top_collaborator(db: &NetflixData) -> Result<Option<DirectorActors>> {
    let start = Instant::now();

    let pairs = collect_pairs(db)?;

    let mut per_director: BTreeMap<&str, u32> = BTreeMap::new();
    for &(director, _) in &pairs {
        *per_director.entry(director).or_default() += 1;
    }

    let mut res: Option<(&str, u32)> = None;
    for (director, count) in per_director {
        if res.is_none_or(|(_, best)| count > best) {
            res = Some((director, count));
        }
    }

    debug!("q04,{:}", start.elapsed().as_secs_f32());

    Ok(res.map(|(director, actor_count)| DirectorActors {
        director: director.to_string(),
        actor_count,
    }))
}

fn collect_pairs(db: &NetflixData) -> Result<HashSet<(&str, &str)>> {
    let t = &db.titles;

    let mut cast_m: HashMap<u32, Vec<&str>> = HashMap::default();

    for (id, cast) in t
        .column(ROW_ID)?
        .u32()?
        .into_iter()
        .zip(t.column(CAST)?.str()?)
    {
        if let Some(id) = id {
            let actors: Vec<&str> = explode(cast).collect();
            if !actors.is_empty() {
                cast_m.insert(id, actors);
            }
        }
    }

    let mut pairs: HashSet<(&str, &str)> = HashSet::default();

    for (id, director) in t
        .column(ROW_ID)?
        .u32()?
        .into_iter()
        .zip(t.column(DIRECTOR)?.str()?)
    {
        let Some(actors) = id.and_then(|id| cast_m.get(&id)) else {
            continue;
        };
        for director in explode(director) {
            for &actor in actors {
                pairs.insert((director, actor));
            }
        }
    }

    Ok(pairs)
}

// q04.sql
// WITH d AS (
//     SELECT show_id, TRIM(UNNEST(STRING_TO_ARRAY(director, ','))) AS director
//     FROM netflix_titles
// ), a AS (
//     SELECT show_id, TRIM(UNNEST(STRING_TO_ARRAY(casts, ','))) AS actor
//     FROM netflix_titles
// )
// SELECT d.director, COUNT(DISTINCT a.actor) AS actor_count
// FROM d JOIN a ON d.show_id = a.show_id
// GROUP BY d.director
// ORDER BY actor_count DESC, d.director
// LIMIT 1;

#[cfg(test)]
mod test_q04 {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_director_actor_pairs() -> Result<()> {
        let db = load(vec![movie("a").director("Jane Doe, John Roe").cast("X, Y")])?;
        let pairs = director_actor_pairs(&db)?;

        let expected: Vec<(String, String)> = [
            ("Jane Doe", "X"),
            ("Jane Doe", "Y"),
            ("John Roe", "X"),
            ("John Roe", "Y"),
        ]
        .iter()
        .map(|(d, a)| (d.to_string(), a.to_string()))
        .collect();
        assert_eq!(pairs, expected);
        Ok(())
    }

    #[test]
    fn test_top_collaborator() -> Result<()> {
        let db = load(vec![
            movie("a").director("Zed").cast("A, B"),
            movie("b").director("Zed").cast("B, C"),
            movie("c").director("Amy").cast("A, B"),
            movie("d").director("Amy").cast("C"),
            movie("e").director("Bob").cast("A"),
            // same title text, different row
            movie("a").director("Bob").cast("Q"),
        ])?;
        let res = top_collaborator(&db)?;

        // Amy and Zed both reach 3 distinct actors
        assert_eq!(
            res,
            Some(DirectorActors {
                director: "Amy".to_string(),
                actor_count: 3
            })
        );
        Ok(())
    }

    #[test]
    fn test_top_collaborator_no_cast() -> Result<()> {
        let db = load(vec![movie("a").director("Zed")])?;
        assert_eq!(top_collaborator(&db)?, None);
        Ok(())
    }
}
