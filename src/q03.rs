use crate::data::{LISTED_IN, NetflixData, RELEASE_YEAR};
use crate::error::Result;
use crate::explode::explode;
use crate::stats::round_ratio;
use rustc_hash::FxHashMap as HashMap;
use std::cmp::Ordering;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct GenreGrowth {
    pub genre: String,
    pub first_year: i32,
    pub last_year: i32,
    pub first_count: u32,
    pub last_count: u32,
    /// `None` when the first-year count is zero.
    pub growth_pct: Option<f64>,
}

/// Top five genres by growth between their first and last release year,
/// looking only at titles released in `current_year - 5` or later.
pub fn fastest_growing_genres(db: &NetflixData, current_year: i32) -> Result<Vec<GenreGrowth>> {
    let t = &db.titles;
    let since = current_year - 5;

    let start = Instant::now();

    let mut seen: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, HashMap<i32, u32>> = HashMap::default();

    for (year, genres) in t
        .column(RELEASE_YEAR)?
        .i32()?
        .into_iter()
        .zip(t.column(LISTED_IN)?.str()?)
    {
        let Some(year) = year.filter(|y| *y >= since) else {
            continue;
        };
        for genre in explode(genres) {
            let per_year = counts.entry(genre).or_insert_with(|| {
                seen.push(genre);
                HashMap::default()
            });
            *per_year.entry(year).or_default() += 1;
        }
    }

    let mut res: Vec<GenreGrowth> = seen
        .into_iter()
        .filter_map(|genre| {
            let per_year = counts.get(genre)?;
            let first_year = *per_year.keys().min()?;
            let last_year = *per_year.keys().max()?;
            let first_count = per_year.get(&first_year).copied().unwrap_or_default();
            let last_count = per_year.get(&last_year).copied().unwrap_or_default();
            let growth_pct = round_ratio(
                (last_count as i64 - first_count as i64) * 100,
                first_count as i64,
            );
            Some(GenreGrowth {
                genre: genre.to_string(),
                first_year,
                last_year,
                first_count,
                last_count,
                growth_pct,
            })
        })
        .collect();

    // stable: equal growth keeps first-seen order
    res.sort_by(|a, b| match (a.growth_pct, b.growth_pct) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    res.truncate(5);

    debug!("q03,{:}", start.elapsed().as_secs_f32());

    Ok(res)
}

// q03.sql
// WITH recent AS (
//     SELECT TRIM(UNNEST(STRING_TO_ARRAY(listed_in, ','))) AS genre, release_year
//     FROM netflix_titles
//     WHERE release_year >= EXTRACT(YEAR FROM CURRENT_DATE) - 5
// ), bounds AS (
//     SELECT genre, MIN(release_year) AS first_year, MAX(release_year) AS last_year
//     FROM recent GROUP BY genre
// ), yearly AS (
//     SELECT genre, release_year, COUNT(*) AS cnt FROM recent GROUP BY genre, release_year
// )
// SELECT b.genre, b.first_year, b.last_year, f.cnt, l.cnt,
//        ROUND((l.cnt - f.cnt) * 100.0 / NULLIF(f.cnt, 0), 2) AS growth_pct
// FROM bounds b
// JOIN yearly f ON f.genre = b.genre AND f.release_year = b.first_year
// JOIN yearly l ON l.genre = b.genre AND l.release_year = b.last_year
// ORDER BY growth_pct DESC NULLS LAST
// LIMIT 5;

#[cfg(test)]
mod test_q03 {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_fastest_growing_genres() -> Result<()> {
        let db = load(vec![
            movie("a").year(2021).genres("Dramas, Comedies"),
            movie("b").year(2023).genres("Dramas"),
            movie("c").year(2023).genres("Dramas,Comedies"),
            movie("d").year(2023).genres("Dramas"),
            movie("e").year(2022).genres("Horror"),
            movie("f").year(2024).genres("Horror"),
            // outside the window
            movie("g").year(2019).genres("Dramas, Thrillers"),
        ])?;
        let res = fastest_growing_genres(&db, 2025)?;

        let genres: Vec<&str> = res.iter().map(|g| g.genre.as_str()).collect();
        assert_eq!(genres, vec!["Dramas", "Comedies", "Horror"]);

        assert_eq!(res[0].first_year, 2021);
        assert_eq!(res[0].last_year, 2023);
        assert_eq!(res[0].first_count, 1);
        assert_eq!(res[0].last_count, 3);
        assert_eq!(res[0].growth_pct, Some(200.0));
        // Comedies and Horror both flat: first-seen order
        assert_eq!(res[1].growth_pct, Some(0.0));
        assert_eq!(res[2].growth_pct, Some(0.0));
        Ok(())
    }

    #[test]
    fn test_fastest_growing_genres_top_five() -> Result<()> {
        let titles = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|g| movie(g).year(2024).genres(g))
            .collect();
        let db = load(titles)?;
        let res = fastest_growing_genres(&db, 2025)?;

        assert_eq!(res.len(), 5);
        assert_eq!(res[0].genre, "A");
        assert_eq!(res[4].genre, "E");
        Ok(())
    }

    #[test]
    fn test_negative_growth() -> Result<()> {
        let db = load(vec![
            movie("a").year(2021).genres("Dramas"),
            movie("b").year(2021).genres("Dramas"),
            movie("c").year(2021).genres("Dramas"),
            movie("d").year(2024).genres("Dramas"),
        ])?;
        let res = fastest_growing_genres(&db, 2025)?;

        assert_eq!(res[0].growth_pct, Some(-66.67));
        Ok(())
    }
}
