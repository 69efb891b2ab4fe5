//! The fifteen analyses, addressable by number or slug, each rendered into
//! a [`Report`] frame with the column layout its query defines.

use crate::data::NetflixData;
use crate::error::Result;
use crate::{q01, q02, q03, q04, q05, q06, q07, q08, q09, q10, q11, q12, q13, q14, q15};
use chrono::Datelike;
use polars::prelude::*;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analysis {
    ContentTrend,
    CastSize,
    GenreGrowth,
    DirectorActor,
    MaturityScore,
    Seasonality,
    CountryTvRatio,
    ActorGenres,
    TitleLength,
    LoveWar,
    DocumentaryCountries,
    DirectorlessYear,
    OneHitDirectors,
    MedianSeasons,
    MaturityShares,
}

/// Inputs a query may need beyond the table itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    pub current_year: i32,
}

impl QueryContext {
    pub fn new(current_year: i32) -> Self {
        QueryContext { current_year }
    }

    pub fn today() -> Self {
        QueryContext::new(chrono::Local::now().year())
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub analysis: Analysis,
    pub frame: DataFrame,
}

impl Analysis {
    pub const ALL: [Analysis; 15] = [
        Analysis::ContentTrend,
        Analysis::CastSize,
        Analysis::GenreGrowth,
        Analysis::DirectorActor,
        Analysis::MaturityScore,
        Analysis::Seasonality,
        Analysis::CountryTvRatio,
        Analysis::ActorGenres,
        Analysis::TitleLength,
        Analysis::LoveWar,
        Analysis::DocumentaryCountries,
        Analysis::DirectorlessYear,
        Analysis::OneHitDirectors,
        Analysis::MedianSeasons,
        Analysis::MaturityShares,
    ];

    pub fn number(&self) -> usize {
        Analysis::ALL
            .iter()
            .position(|a| a == self)
            .map_or(0, |i| i + 1)
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Analysis::ContentTrend => "content-trend",
            Analysis::CastSize => "cast-size",
            Analysis::GenreGrowth => "genre-growth",
            Analysis::DirectorActor => "director-actor",
            Analysis::MaturityScore => "maturity-score",
            Analysis::Seasonality => "seasonality",
            Analysis::CountryTvRatio => "country-tv-ratio",
            Analysis::ActorGenres => "actor-genres",
            Analysis::TitleLength => "title-length",
            Analysis::LoveWar => "love-war",
            Analysis::DocumentaryCountries => "documentary-countries",
            Analysis::DirectorlessYear => "directorless-year",
            Analysis::OneHitDirectors => "one-hit-directors",
            Analysis::MedianSeasons => "median-seasons",
            Analysis::MaturityShares => "maturity-shares",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Analysis::ContentTrend => "Titles released per year, movies vs TV shows",
            Analysis::CastSize => "Average cast size per type",
            Analysis::GenreGrowth => "Five fastest-growing genres over the last five years",
            Analysis::DirectorActor => "Director who worked with the most distinct actors",
            Analysis::MaturityScore => "Average maturity score per type",
            Analysis::Seasonality => "Titles added per calendar month",
            Analysis::CountryTvRatio => "Country with the highest TV show to movie ratio",
            Analysis::ActorGenres => "Actor appearing in the most distinct genres",
            Analysis::TitleLength => "Five shortest and five longest titles",
            Analysis::LoveWar => "Titles about both love and war, per year",
            Analysis::DocumentaryCountries => "Countries where over 70% of titles are documentaries",
            Analysis::DirectorlessYear => "Year with the most movies lacking a director",
            Analysis::OneHitDirectors => "Directors credited on exactly one title",
            Analysis::MedianSeasons => "Median TV show season count per country",
            Analysis::MaturityShares => "Maturity category share per release year",
        }
    }

    /// Accepts the 1-based number or the slug.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Analysis::ALL.get(i).copied());
        }
        Analysis::ALL
            .iter()
            .copied()
            .find(|a| a.slug().eq_ignore_ascii_case(s))
    }

    pub fn run(&self, db: &NetflixData, ctx: &QueryContext) -> Result<Report> {
        info!(analysis = self.slug(), "running");
        let frame = match self {
            Analysis::ContentTrend => {
                let rows = q01::content_trend(db)?;
                df!(
                    "release_year" => rows.iter().map(|r| r.release_year).collect::<Vec<_>>(),
                    "movies" => rows.iter().map(|r| r.movies).collect::<Vec<_>>(),
                    "tv_shows" => rows.iter().map(|r| r.tv_shows).collect::<Vec<_>>(),
                    "total" => rows.iter().map(|r| r.total).collect::<Vec<_>>()
                )?
            }
            Analysis::CastSize => {
                let rows = q02::avg_cast_size(db)?;
                df!(
                    "type" => rows.iter().map(|r| r.kind.as_str()).collect::<Vec<_>>(),
                    "avg_actors" => rows.iter().map(|r| r.avg_actors).collect::<Vec<_>>()
                )?
            }
            Analysis::GenreGrowth => {
                let rows = q03::fastest_growing_genres(db, ctx.current_year)?;
                df!(
                    "genre" => rows.iter().map(|r| r.genre.as_str()).collect::<Vec<_>>(),
                    "first_year" => rows.iter().map(|r| r.first_year).collect::<Vec<_>>(),
                    "last_year" => rows.iter().map(|r| r.last_year).collect::<Vec<_>>(),
                    "first_count" => rows.iter().map(|r| r.first_count).collect::<Vec<_>>(),
                    "last_count" => rows.iter().map(|r| r.last_count).collect::<Vec<_>>(),
                    "growth_pct" => rows.iter().map(|r| r.growth_pct).collect::<Vec<_>>()
                )?
            }
            Analysis::DirectorActor => {
                let rows: Vec<_> = q04::top_collaborator(db)?.into_iter().collect();
                df!(
                    "director" => rows.iter().map(|r| r.director.as_str()).collect::<Vec<_>>(),
                    "actor_count" => rows.iter().map(|r| r.actor_count).collect::<Vec<_>>()
                )?
            }
            Analysis::MaturityScore => {
                let rows = q05::avg_maturity(db)?;
                df!(
                    "type" => rows.iter().map(|r| r.kind.as_str()).collect::<Vec<_>>(),
                    "avg_maturity" => rows.iter().map(|r| r.avg_maturity).collect::<Vec<_>>()
                )?
            }
            Analysis::Seasonality => {
                let rows = q06::seasonality(db)?;
                df!(
                    "month" => rows.iter().map(|r| r.month.as_str()).collect::<Vec<_>>(),
                    "title_count" => rows.iter().map(|r| r.title_count).collect::<Vec<_>>()
                )?
            }
            Analysis::CountryTvRatio => {
                let rows: Vec<_> = q07::top_tv_ratio(db)?.into_iter().collect();
                df!(
                    "country" => rows.iter().map(|r| r.country.as_str()).collect::<Vec<_>>(),
                    "tv_shows" => rows.iter().map(|r| r.tv_shows).collect::<Vec<_>>(),
                    "movies" => rows.iter().map(|r| r.movies).collect::<Vec<_>>(),
                    "ratio" => rows.iter().map(|r| r.ratio).collect::<Vec<_>>()
                )?
            }
            Analysis::ActorGenres => {
                let rows: Vec<_> = q08::widest_genre_range(db)?.into_iter().collect();
                df!(
                    "actor" => rows.iter().map(|r| r.actor.as_str()).collect::<Vec<_>>(),
                    "genre_count" => rows.iter().map(|r| r.genre_count).collect::<Vec<_>>()
                )?
            }
            Analysis::TitleLength => {
                let res = q09::title_extremes(db)?;
                let rows: Vec<(&str, &q09::TitleLength)> = res
                    .shortest
                    .iter()
                    .map(|r| ("shortest", r))
                    .chain(res.longest.iter().map(|r| ("longest", r)))
                    .collect();
                df!(
                    "extreme" => rows.iter().map(|(e, _)| *e).collect::<Vec<_>>(),
                    "title" => rows.iter().map(|(_, r)| r.title.as_str()).collect::<Vec<_>>(),
                    "length" => rows.iter().map(|(_, r)| r.length as u32).collect::<Vec<_>>()
                )?
            }
            Analysis::LoveWar => year_counts(q10::love_and_war(db)?)?,
            Analysis::DocumentaryCountries => {
                let rows = q11::documentary_countries(db)?;
                df!(
                    "country" => rows.iter().map(|r| r.country.as_str()).collect::<Vec<_>>(),
                    "documentaries" => rows.iter().map(|r| r.documentaries).collect::<Vec<_>>(),
                    "total" => rows.iter().map(|r| r.total).collect::<Vec<_>>(),
                    "ratio" => rows.iter().map(|r| r.ratio).collect::<Vec<_>>()
                )?
            }
            Analysis::DirectorlessYear => {
                year_counts(q12::directorless_movie_year(db)?.into_iter().collect())?
            }
            Analysis::OneHitDirectors => {
                let rows = q13::one_hit_directors(db)?;
                df!("director" => rows)?
            }
            Analysis::MedianSeasons => {
                let rows = q14::median_seasons(db)?;
                df!(
                    "country" => rows.iter().map(|r| r.country.as_str()).collect::<Vec<_>>(),
                    "median_seasons" => rows.iter().map(|r| r.median_seasons).collect::<Vec<_>>()
                )?
            }
            Analysis::MaturityShares => {
                let rows = q15::maturity_shares(db)?;
                df!(
                    "release_year" => rows.iter().map(|r| r.release_year).collect::<Vec<_>>(),
                    "category" => rows.iter().map(|r| r.category.as_str()).collect::<Vec<_>>(),
                    "share_pct" => rows.iter().map(|r| r.share_pct).collect::<Vec<_>>()
                )?
            }
        };

        Ok(Report {
            analysis: *self,
            frame,
        })
    }
}

fn year_counts(rows: Vec<q10::YearCount>) -> Result<DataFrame> {
    Ok(df!(
        "release_year" => rows.iter().map(|r| r.release_year).collect::<Vec<_>>(),
        "title_count" => rows.iter().map(|r| r.title_count).collect::<Vec<_>>()
    )?)
}

#[cfg(test)]
mod test_analysis {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_parse() {
        assert_eq!(Analysis::parse("1"), Some(Analysis::ContentTrend));
        assert_eq!(Analysis::parse("15"), Some(Analysis::MaturityShares));
        assert_eq!(Analysis::parse("Love-War"), Some(Analysis::LoveWar));
        assert_eq!(Analysis::parse("0"), None);
        assert_eq!(Analysis::parse("16"), None);
        assert_eq!(Analysis::parse("nope"), None);
    }

    #[test]
    fn test_numbers_round_trip() {
        for (i, a) in Analysis::ALL.iter().enumerate() {
            assert_eq!(a.number(), i + 1);
            assert_eq!(Analysis::parse(a.slug()), Some(*a));
        }
    }

    #[test]
    fn test_run_all_on_empty() -> Result<()> {
        let db = load(vec![])?;
        let ctx = QueryContext::new(2025);
        for a in Analysis::ALL {
            let report = a.run(&db, &ctx)?;
            assert_eq!(report.frame.height(), 0, "{}", a.slug());
        }
        Ok(())
    }

    #[test]
    fn test_report_columns() -> Result<()> {
        let db = load(vec![
            movie("Roma").year(2018).director("Alfonso Cuarón").cast("Yalitza Aparicio"),
            show("Dark").year(2017).duration("3 Seasons").country("Germany"),
        ])?;
        let ctx = QueryContext::new(2020);

        let report = Analysis::ContentTrend.run(&db, &ctx)?;
        let names: Vec<&str> = report
            .frame
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(names, vec!["release_year", "movies", "tv_shows", "total"]);
        assert_eq!(report.frame.height(), 2);

        let report = Analysis::TitleLength.run(&db, &ctx)?;
        assert_eq!(report.frame.height(), 4);

        let report = Analysis::MedianSeasons.run(&db, &ctx)?;
        assert_eq!(report.frame.column("median_seasons")?.f64()?.get(0), Some(3.0));
        Ok(())
    }
}
