use crate::data::{KIND, Kind, NetflixData, RATING};
use crate::error::Result;
use crate::rating::maturity_score;
use crate::stats::round_ratio;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct MaturityScore {
    pub kind: Kind,
    pub avg_maturity: f64,
}

pub fn avg_maturity(db: &NetflixData) -> Result<Vec<MaturityScore>> {
    let t = &db.titles;

    let start = Instant::now();

    let mut acc: BTreeMap<Kind, (i64, i64)> = BTreeMap::new();

    for (kind, rating) in t
        .column(KIND)?
        .str()?
        .into_iter()
        .zip(t.column(RATING)?.str()?)
    {
        if let (Some(kind), Some(score)) = (
            kind.and_then(Kind::parse),
            rating.and_then(maturity_score),
        ) {
            let (sum, n) = acc.entry(kind).or_default();
            *sum += score as i64;
            *n += 1;
        }
    }

    let res = acc
        .into_iter()
        .filter_map(|(kind, (sum, n))| {
            round_ratio(sum, n).map(|avg_maturity| MaturityScore { kind, avg_maturity })
        })
        .collect();

    debug!("q05,{:}", start.elapsed().as_secs_f32());

    Ok(res)
}

// q05.sql
// SELECT type,
//        ROUND(AVG(CASE rating
//             WHEN 'TV-Y' THEN 1 WHEN 'TV-Y7' THEN 2 WHEN 'TV-G' THEN 3
//             WHEN 'TV-PG' THEN 4 WHEN 'PG' THEN 5 WHEN 'PG-13' THEN 6
//             WHEN 'TV-14' THEN 6 WHEN 'R' THEN 7 WHEN 'NC-17' THEN 8
//             WHEN 'TV-MA' THEN 8 END), 2) AS avg_maturity
// FROM netflix_titles
// GROUP BY type;

#[cfg(test)]
mod test_q05 {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_avg_maturity() -> Result<()> {
        let db = load(vec![
            movie("a").rating("TV-MA"),
            movie("b").rating("PG"),
            movie("c").rating("NR"),
            movie("d"),
            show("e").rating("TV-Y"),
            show("f").rating("TV-Y7"),
            show("g").rating("TV-14"),
        ])?;
        let res = avg_maturity(&db)?;

        assert_eq!(
            res,
            vec![
                MaturityScore { kind: Kind::Movie, avg_maturity: 6.5 },
                MaturityScore { kind: Kind::TvShow, avg_maturity: 3.0 },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_avg_maturity_unscored_only() -> Result<()> {
        let db = load(vec![movie("a").rating("NR"), movie("b").rating("G")])?;
        assert!(avg_maturity(&db)?.is_empty());
        Ok(())
    }
}
