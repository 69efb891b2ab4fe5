/// Ordinal maturity score. Ratings outside the table (including `G`,
/// `NR`, `UR`) have no score.
pub fn maturity_score(rating: &str) -> Option<u8> {
    match rating.trim() {
        "TV-Y" => Some(1),
        "TV-Y7" => Some(2),
        "TV-G" => Some(3),
        "TV-PG" => Some(4),
        "PG" => Some(5),
        "PG-13" | "TV-14" => Some(6),
        "R" => Some(7),
        "NC-17" | "TV-MA" => Some(8),
        _ => None,
    }
}

/// Variants are declared in name order so sorting by category sorts by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaturityCategory {
    Adult,
    Family,
    Teen,
    Unknown,
}

impl MaturityCategory {
    pub fn from_rating(rating: Option<&str>) -> Self {
        match rating.map(str::trim) {
            Some("TV-Y" | "TV-Y7" | "TV-G" | "G" | "PG") => MaturityCategory::Family,
            Some("PG-13" | "TV-PG" | "TV-14") => MaturityCategory::Teen,
            Some("R" | "NC-17" | "TV-MA") => MaturityCategory::Adult,
            _ => MaturityCategory::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaturityCategory::Adult => "Adult",
            MaturityCategory::Family => "Family",
            MaturityCategory::Teen => "Teen",
            MaturityCategory::Unknown => "Unknown",
        }
    }
}
