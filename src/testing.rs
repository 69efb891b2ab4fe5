use crate::data::{Kind, NetflixData, Title};
use crate::error::Result;

pub fn movie(title: &str) -> Title {
    Title {
        kind: Some(Kind::Movie),
        title: Some(title.to_string()),
        ..Title::default()
    }
}

pub fn show(title: &str) -> Title {
    Title {
        kind: Some(Kind::TvShow),
        title: Some(title.to_string()),
        ..Title::default()
    }
}

pub fn load(titles: Vec<Title>) -> Result<NetflixData> {
    NetflixData::from_records(titles)
}

impl Title {
    pub fn year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    pub fn director(mut self, v: &str) -> Self {
        self.director = Some(v.to_string());
        self
    }

    pub fn cast(mut self, v: &str) -> Self {
        self.cast = Some(v.to_string());
        self
    }

    pub fn country(mut self, v: &str) -> Self {
        self.country = Some(v.to_string());
        self
    }

    pub fn added(mut self, v: &str) -> Self {
        self.date_added = Some(v.to_string());
        self
    }

    pub fn rating(mut self, v: &str) -> Self {
        self.rating = Some(v.to_string());
        self
    }

    pub fn duration(mut self, v: &str) -> Self {
        self.duration = Some(v.to_string());
        self
    }

    pub fn genres(mut self, v: &str) -> Self {
        self.genres = Some(v.to_string());
        self
    }

    pub fn description(mut self, v: &str) -> Self {
        self.description = Some(v.to_string());
        self
    }
}
