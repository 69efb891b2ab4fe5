use crate::data::{COUNTRY, LISTED_IN, NetflixData};
use crate::error::Result;
use crate::explode::explode;
use crate::stats::round_ratio;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentaryShare {
    pub country: String,
    pub documentaries: u32,
    pub total: u32,
    pub ratio: f64,
}

/// Countries where more than 70% of titles are documentaries, highest
/// share first.
pub fn documentary_countries(db: &NetflixData) -> Result<Vec<DocumentaryShare>> {
    let t = &db.titles;

    let start = Instant::now();

    let mut by_country: BTreeMap<&str, (u32, u32)> = BTreeMap::new();

    for (country, genres) in t
        .column(COUNTRY)?
        .str()?
        .into_iter()
        .zip(t.column(LISTED_IN)?.str()?)
    {
        let documentary = genres.is_some_and(|g| g.to_lowercase().contains("documentary"));
        for country in explode(country) {
            let (docs, total) = by_country.entry(country).or_default();
            if documentary {
                *docs += 1;
            }
            *total += 1;
        }
    }

    // docs / total > 0.70
    let mut hits: Vec<(&str, u32, u32)> = by_country
        .into_iter()
        .filter(|(_, (docs, total))| *docs as u64 * 100 > *total as u64 * 70)
        .map(|(country, (docs, total))| (country, docs, total))
        .collect();
    hits.sort_by(|(_, a_docs, a_total), (_, b_docs, b_total)| {
        (*b_docs as u64 * *a_total as u64).cmp(&(*a_docs as u64 * *b_total as u64))
    });

    let res = hits
        .into_iter()
        .map(|(country, documentaries, total)| DocumentaryShare {
            country: country.to_string(),
            documentaries,
            total,
            ratio: round_ratio(documentaries as i64, total as i64).unwrap_or_default(),
        })
        .collect();

    debug!("q11,{:}", start.elapsed().as_secs_f32());

    Ok(res)
}

// q11.sql
// WITH c AS (
//     SELECT TRIM(UNNEST(STRING_TO_ARRAY(country, ','))) AS country,
//            (listed_in ILIKE '%documentary%')::int AS is_doc
//     FROM netflix_titles
// )
// SELECT country, SUM(is_doc) AS documentaries, COUNT(*) AS total,
//        ROUND(SUM(is_doc)::numeric / COUNT(*), 2) AS ratio
// FROM c
// GROUP BY country
// HAVING SUM(is_doc)::numeric / COUNT(*) > 0.70
// ORDER BY SUM(is_doc)::numeric / COUNT(*) DESC, country;

#[cfg(test)]
mod test_q11 {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_documentary_countries() -> Result<()> {
        let mut titles = vec![
            movie("a").country("Iceland, Norway").genres("Documentary Films"),
            movie("b").country("Iceland").genres("International Movies, documentary"),
            movie("c").country("Norway").genres("Dramas"),
            movie("d").country("Chile").genres("DOCUMENTARY"),
            // plural form does not contain the singular
            movie("e").country("Ghana").genres("Documentaries"),
        ];
        // 7 of 10 is not above the threshold
        titles.extend((0..7).map(|_| movie("x").country("Peru").genres("Documentary")));
        titles.extend((0..3).map(|_| movie("y").country("Peru").genres("Dramas")));
        let db = load(titles)?;
        let res = documentary_countries(&db)?;

        assert_eq!(
            res,
            vec![
                DocumentaryShare {
                    country: "Chile".to_string(),
                    documentaries: 1,
                    total: 1,
                    ratio: 1.0
                },
                DocumentaryShare {
                    country: "Iceland".to_string(),
                    documentaries: 2,
                    total: 2,
                    ratio: 1.0
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_documentary_countries_by_share() -> Result<()> {
        let mut titles: Vec<_> = (0..4)
            .map(|_| movie("a").country("Austria").genres("Documentary"))
            .collect();
        titles.push(movie("b").country("Austria").genres("Comedies"));
        titles.push(movie("c").country("Belize").genres("Documentary"));
        let db = load(titles)?;

        let res: Vec<(String, f64)> = documentary_countries(&db)?
            .into_iter()
            .map(|r| (r.country, r.ratio))
            .collect();
        assert_eq!(
            res,
            vec![("Belize".to_string(), 1.0), ("Austria".to_string(), 0.8)]
        );
        Ok(())
    }
}
