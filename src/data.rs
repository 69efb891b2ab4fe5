use crate::error::{NflxError, Result};
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use std::path::Path;
use tracing::{info, warn};

// CREATE TABLE netflix_titles (
//     show_id      varchar(10),
//     type         varchar(10),
//     title        varchar(250),
//     director     varchar(550),
//     casts        varchar(1050),
//     country      varchar(550),
//     date_added   varchar(55),
//     release_year integer,
//     rating       varchar(15),
//     duration     varchar(15),
//     listed_in    varchar(250),
//     description  varchar(550)
// );

pub const ROW_ID: &str = "row_id";
pub const SHOW_ID: &str = "show_id";
pub const KIND: &str = "type";
pub const TITLE: &str = "title";
pub const DIRECTOR: &str = "director";
pub const CAST: &str = "cast";
pub const COUNTRY: &str = "country";
pub const DATE_ADDED: &str = "date_added";
pub const RELEASE_YEAR: &str = "release_year";
pub const RATING: &str = "rating";
pub const DURATION: &str = "duration";
pub const LISTED_IN: &str = "listed_in";
pub const DESCRIPTION: &str = "description";

/// Source columns in the order a headerless file carries them.
pub const SOURCE_COLUMNS: [&str; 12] = [
    SHOW_ID,
    KIND,
    TITLE,
    DIRECTOR,
    CAST,
    COUNTRY,
    DATE_ADDED,
    RELEASE_YEAR,
    RATING,
    DURATION,
    LISTED_IN,
    DESCRIPTION,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Movie,
    TvShow,
}

impl Kind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(Kind::Movie),
            "tv show" | "tvshow" => Some(Kind::TvShow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Movie => "Movie",
            Kind::TvShow => "TV Show",
        }
    }
}

/// One catalog row. `None` is the missing marker: blank cells never
/// survive as `Some("")`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Title {
    pub row_id: u32,
    pub show_id: Option<String>,
    pub kind: Option<Kind>,
    pub title: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub release_year: Option<i32>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub genres: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub has_header: bool,
    pub delimiter: u8,
    /// Fail the load on the first malformed year or type instead of
    /// dropping the cell.
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            has_header: true,
            delimiter: b',',
            strict: false,
        }
    }
}

impl LoadOptions {
    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// The loaded catalog. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct NetflixData {
    pub titles: DataFrame,
}

impl NetflixData {
    pub fn from_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading titles");
        Self::from_reader(std::fs::File::open(path)?, options)
    }

    pub fn from_reader<R: MmapBytesReader>(reader: R, options: &LoadOptions) -> Result<Self> {
        let read = CsvReadOptions::default()
            .with_has_header(options.has_header)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|p| p.with_separator(options.delimiter))
            .into_reader_with_file_handle(reader)
            .finish();

        let raw = match read {
            Ok(raw) => raw,
            Err(PolarsError::NoData(_)) => {
                warn!("input holds no data");
                return Self::from_records(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records = parse_rows(&raw, options)?;
        info!(rows = records.len(), "loaded titles");
        Self::from_records(records)
    }

    /// Builds the table from typed records. Row ids are reassigned in
    /// the given order and blank text is normalised to missing.
    pub fn from_records(records: Vec<Title>) -> Result<Self> {
        let n = records.len();
        let mut row_id = Vec::with_capacity(n);
        let mut show_id = Vec::with_capacity(n);
        let mut kind = Vec::with_capacity(n);
        let mut title = Vec::with_capacity(n);
        let mut director = Vec::with_capacity(n);
        let mut cast = Vec::with_capacity(n);
        let mut country = Vec::with_capacity(n);
        let mut date_added = Vec::with_capacity(n);
        let mut release_year = Vec::with_capacity(n);
        let mut rating = Vec::with_capacity(n);
        let mut duration = Vec::with_capacity(n);
        let mut listed_in = Vec::with_capacity(n);
        let mut description = Vec::with_capacity(n);

        for (i, t) in records.into_iter().enumerate() {
            row_id.push(i as u32);
            show_id.push(present(t.show_id));
            kind.push(t.kind.map(|k| k.as_str()));
            title.push(present(t.title));
            director.push(present(t.director));
            cast.push(present(t.cast));
            country.push(present(t.country));
            date_added.push(present(t.date_added));
            release_year.push(t.release_year);
            rating.push(present(t.rating));
            duration.push(present(t.duration));
            listed_in.push(present(t.genres));
            description.push(present(t.description));
        }

        let titles = DataFrame::new(vec![
            Column::new(ROW_ID.into(), row_id),
            Column::new(SHOW_ID.into(), show_id),
            Column::new(KIND.into(), kind),
            Column::new(TITLE.into(), title),
            Column::new(DIRECTOR.into(), director),
            Column::new(CAST.into(), cast),
            Column::new(COUNTRY.into(), country),
            Column::new(DATE_ADDED.into(), date_added),
            Column::new(RELEASE_YEAR.into(), release_year),
            Column::new(RATING.into(), rating),
            Column::new(DURATION.into(), duration),
            Column::new(LISTED_IN.into(), listed_in),
            Column::new(DESCRIPTION.into(), description),
        ])?;

        Ok(NetflixData { titles })
    }

    pub fn len(&self) -> usize {
        self.titles.height()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.height() == 0
    }

    pub fn require_non_empty(&self) -> Result<&Self> {
        if self.is_empty() {
            Err(NflxError::EmptyInput)
        } else {
            Ok(self)
        }
    }

    /// Typed view of the table in row order.
    pub fn records(&self) -> Result<Vec<Title>> {
        let t = &self.titles;
        let row_id = t.column(ROW_ID)?.u32()?;
        let show_id = t.column(SHOW_ID)?.str()?;
        let kind = t.column(KIND)?.str()?;
        let title = t.column(TITLE)?.str()?;
        let director = t.column(DIRECTOR)?.str()?;
        let cast = t.column(CAST)?.str()?;
        let country = t.column(COUNTRY)?.str()?;
        let date_added = t.column(DATE_ADDED)?.str()?;
        let release_year = t.column(RELEASE_YEAR)?.i32()?;
        let rating = t.column(RATING)?.str()?;
        let duration = t.column(DURATION)?.str()?;
        let listed_in = t.column(LISTED_IN)?.str()?;
        let description = t.column(DESCRIPTION)?.str()?;

        let owned = |v: Option<&str>| v.map(str::to_string);

        Ok((0..t.height())
            .map(|i| Title {
                row_id: row_id.get(i).unwrap_or(i as u32),
                show_id: owned(show_id.get(i)),
                kind: kind.get(i).and_then(Kind::parse),
                title: owned(title.get(i)),
                director: owned(director.get(i)),
                cast: owned(cast.get(i)),
                country: owned(country.get(i)),
                date_added: owned(date_added.get(i)),
                release_year: release_year.get(i),
                rating: owned(rating.get(i)),
                duration: owned(duration.get(i)),
                genres: owned(listed_in.get(i)),
                description: owned(description.get(i)),
            })
            .collect())
    }
}

fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Maps a header name onto its canonical column, accepting the list-style
/// aliases some exports use.
fn canonical(name: &str) -> Option<&'static str> {
    let lower = name.trim().to_ascii_lowercase();
    let wanted = match lower.as_str() {
        "id" => SHOW_ID,
        "kind" => KIND,
        "casts" | "cast_list" => CAST,
        "country_list" => COUNTRY,
        "genre_list" | "genres" => LISTED_IN,
        other => other,
    };
    SOURCE_COLUMNS.iter().copied().find(|c| *c == wanted)
}

fn source_columns<'a>(raw: &'a DataFrame, options: &LoadOptions) -> Result<Vec<&'a StringChunked>> {
    let columns = raw.get_columns();
    let mut found: Vec<Option<&StringChunked>> = vec![None; SOURCE_COLUMNS.len()];

    if options.has_header {
        for c in columns {
            if let Some(name) = canonical(c.name()) {
                let slot = SOURCE_COLUMNS
                    .iter()
                    .position(|s| *s == name)
                    .unwrap_or_default();
                if found[slot].is_none() {
                    found[slot] = Some(c.str()?);
                }
            }
        }
    } else {
        for (slot, c) in columns.iter().take(SOURCE_COLUMNS.len()).enumerate() {
            found[slot] = Some(c.str()?);
        }
    }

    found
        .into_iter()
        .zip(SOURCE_COLUMNS)
        .map(|(c, name)| c.ok_or_else(|| NflxError::MissingColumn(name.to_string())))
        .collect()
}

fn parse_rows(raw: &DataFrame, options: &LoadOptions) -> Result<Vec<Title>> {
    let cols = source_columns(raw, options)?;
    let [
        show_id,
        kind,
        title,
        director,
        cast,
        country,
        date_added,
        release_year,
        rating,
        duration,
        listed_in,
        description,
    ] = cols[..]
    else {
        return Err(NflxError::MissingColumn(SOURCE_COLUMNS.join(",")));
    };

    let text = |ca: &StringChunked, i: usize| ca.get(i).map(str::to_string);

    let mut records = Vec::with_capacity(raw.height());
    for i in 0..raw.height() {
        let row = i + 1;
        records.push(Title {
            row_id: i as u32,
            show_id: text(show_id, i),
            kind: parse_kind(kind.get(i), row, options)?,
            title: text(title, i),
            director: text(director, i),
            cast: text(cast, i),
            country: text(country, i),
            date_added: text(date_added, i),
            release_year: parse_year(release_year.get(i), row, options)?,
            rating: text(rating, i),
            duration: text(duration, i),
            genres: text(listed_in, i),
            description: text(description, i),
        });
    }
    Ok(records)
}

fn parse_year(cell: Option<&str>, row: usize, options: &LoadOptions) -> Result<Option<i32>> {
    let Some(value) = cell.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match value.parse::<i32>() {
        Ok(year) if (1000..=9999).contains(&year) => Ok(Some(year)),
        _ => malformed(RELEASE_YEAR, value, row, options),
    }
}

fn parse_kind(cell: Option<&str>, row: usize, options: &LoadOptions) -> Result<Option<Kind>> {
    let Some(value) = cell.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match Kind::parse(value) {
        Some(kind) => Ok(Some(kind)),
        None => malformed(KIND, value, row, options),
    }
}

fn malformed<T>(column: &'static str, value: &str, row: usize, options: &LoadOptions) -> Result<Option<T>> {
    if options.strict {
        return Err(NflxError::Parse {
            row,
            column,
            value: value.to_string(),
        });
    }
    warn!(row, column, value, "dropping malformed cell");
    Ok(None)
}
