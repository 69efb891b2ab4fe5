use crate::data::{NetflixData, RATING, RELEASE_YEAR};
use crate::error::Result;
use crate::rating::MaturityCategory;
use crate::stats::round_ratio;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub release_year: i32,
    pub category: MaturityCategory,
    pub share_pct: f64,
}

/// Share of each maturity category within a release year. Unknown ratings
/// count towards the yearly total but get no row of their own, so a
/// year's shares can sum to less than 100.
pub fn maturity_shares(db: &NetflixData) -> Result<Vec<CategoryShare>> {
    let t = &db.titles;

    let start = Instant::now();

    let mut by_year: BTreeMap<i32, (u32, BTreeMap<MaturityCategory, u32>)> = BTreeMap::new();

    for (year, rating) in t
        .column(RELEASE_YEAR)?
        .i32()?
        .into_iter()
        .zip(t.column(RATING)?.str()?)
    {
        let Some(year) = year else { continue };
        let (total, per_category) = by_year.entry(year).or_default();
        *total += 1;
        *per_category
            .entry(MaturityCategory::from_rating(rating))
            .or_default() += 1;
    }

    let mut res = Vec::new();
    for (release_year, (total, per_category)) in by_year {
        for (category, count) in per_category {
            if category == MaturityCategory::Unknown {
                continue;
            }
            if let Some(share_pct) = round_ratio(count as i64 * 100, total as i64) {
                res.push(CategoryShare {
                    release_year,
                    category,
                    share_pct,
                });
            }
        }
    }

    debug!("q15,{:}", start.elapsed().as_secs_f32());

    Ok(res)
}

// q15.sql
// WITH b AS (
//     SELECT release_year,
//            CASE WHEN rating IN ('TV-Y', 'TV-Y7', 'TV-G', 'G', 'PG') THEN 'Family'
//                 WHEN rating IN ('PG-13', 'TV-PG', 'TV-14') THEN 'Teen'
//                 WHEN rating IN ('R', 'NC-17', 'TV-MA') THEN 'Adult'
//                 ELSE 'Unknown' END AS category
//     FROM netflix_titles
// )
// SELECT release_year, category,
//        ROUND(COUNT(*) * 100.0
//              / SUM(COUNT(*)) OVER (PARTITION BY release_year), 2) AS share_pct
// FROM b
// GROUP BY release_year, category
// HAVING category <> 'Unknown'
// ORDER BY release_year, category;

#[cfg(test)]
mod test_q15 {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_maturity_shares() -> Result<()> {
        let db = load(vec![
            movie("a").year(2020).rating("TV-MA"),
            movie("b").year(2020).rating("R"),
            movie("c").year(2020).rating("G"),
            movie("d").year(2020).rating("NR"),
            show("e").year(2019).rating("TV-PG"),
            show("f").year(2019).rating("TV-Y"),
            show("g").year(2019).rating("TV-14"),
        ])?;
        let res = maturity_shares(&db)?;

        let rows: Vec<(i32, &str, f64)> = res
            .iter()
            .map(|r| (r.release_year, r.category.as_str(), r.share_pct))
            .collect();
        assert_eq!(
            rows,
            vec![
                (2019, "Family", 33.33),
                (2019, "Teen", 66.67),
                (2020, "Adult", 50.0),
                (2020, "Family", 25.0),
            ]
        );

        // 2020 has an unrated title, so its shares fall short of 100
        let sum_2020: f64 = res
            .iter()
            .filter(|r| r.release_year == 2020)
            .map(|r| r.share_pct)
            .sum();
        assert_eq!(sum_2020, 75.0);
        Ok(())
    }
}
