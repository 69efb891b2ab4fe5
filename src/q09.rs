use crate::data::{NetflixData, TITLE};
use crate::error::Result;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLength {
    pub title: String,
    pub length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleExtremes {
    pub shortest: Vec<TitleLength>,
    pub longest: Vec<TitleLength>,
}

/// Five shortest and five longest titles by character count. Equal lengths
/// keep load order.
pub fn title_extremes(db: &NetflixData) -> Result<TitleExtremes> {
    let t = &db.titles;

    let start = Instant::now();

    let lengths: Vec<(&str, usize)> = t
        .column(TITLE)?
        .str()?
        .into_iter()
        .flatten()
        .map(|title| (title, title.chars().count()))
        .collect();

    let mut asc = lengths.clone();
    asc.sort_by_key(|(_, len)| *len);

    let mut desc = lengths;
    desc.sort_by(|(_, a), (_, b)| b.cmp(a));

    let top = |v: Vec<(&str, usize)>| -> Vec<TitleLength> {
        v.into_iter()
            .take(5)
            .map(|(title, length)| TitleLength {
                title: title.to_string(),
                length,
            })
            .collect()
    };

    let res = TitleExtremes {
        shortest: top(asc),
        longest: top(desc),
    };

    debug!("q09,{:}", start.elapsed().as_secs_f32());

    Ok(res)
}

// q09.sql
// (SELECT 'shortest' AS extreme, title, LENGTH(title) AS length
//  FROM netflix_titles ORDER BY LENGTH(title) ASC LIMIT 5)
// UNION ALL
// (SELECT 'longest', title, LENGTH(title)
//  FROM netflix_titles ORDER BY LENGTH(title) DESC LIMIT 5);

#[cfg(test)]
mod test_q09 {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_title_extremes() -> Result<()> {
        let names = ["Up", "Jaws", "Heat", "Ω", "Rocky", "Goodfellas", "9", "Casablanca", "Alien"];
        let db = load(names.iter().map(|n| movie(n)).collect())?;
        let res = title_extremes(&db)?;

        let shortest: Vec<&str> = res.shortest.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(shortest, vec!["Ω", "9", "Up", "Jaws", "Heat"]);
        assert_eq!(res.shortest[0].length, 1);

        let longest: Vec<&str> = res.longest.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(longest, vec!["Goodfellas", "Casablanca", "Rocky", "Alien", "Jaws"]);
        Ok(())
    }

    #[test]
    fn test_title_extremes_few_rows() -> Result<()> {
        let db = load(vec![movie("One"), movie("Three")])?;
        let res = title_extremes(&db)?;

        assert_eq!(res.shortest.len(), 2);
        assert_eq!(res.longest[0].title, "Three");
        Ok(())
    }
}
