use serde::{Deserialize, Serialize};

/// `-1` descending, `0` unsorted, `1` ascending.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(try_from = "i8")]
pub enum SortOrder {
    Descending,
    #[default]
    Unsorted,
    Ascending,
}

impl SortOrder {
    pub fn as_code(self) -> i8 {
        match self {
            SortOrder::Descending => -1,
            SortOrder::Unsorted => 0,
            SortOrder::Ascending => 1,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(SortOrder::Descending),
            0 => Some(SortOrder::Unsorted),
            1 => Some(SortOrder::Ascending),
            _ => None,
        }
    }
}

impl TryFrom<i8> for SortOrder {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Self::from_code(code)
            .ok_or_else(|| format!("sort flag must be -1, 0 or 1, got {code}"))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilmSearch {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub director_name: Option<String>,
    pub director_surname: Option<String>,
    /// Two comma separated dates, `YYYY-MM-DD,YYYY-MM-DD`.
    pub release_date: Option<String>,
    pub sort_dates: Option<SortOrder>,
    pub sort_rating: Option<SortOrder>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DirectorSearch {
    pub name: Option<String>,
    pub surname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_codes() {
        for order in [SortOrder::Descending, SortOrder::Unsorted, SortOrder::Ascending] {
            assert_eq!(SortOrder::from_code(order.as_code()), Some(order));
        }
        assert!(SortOrder::try_from(2).is_err());
        assert!(SortOrder::try_from(-2).is_err());
    }

    #[test]
    fn sort_flag_deserializes_from_integer() {
        let order: SortOrder = serde_json::from_str("-1").unwrap();
        assert_eq!(order, SortOrder::Descending);
        assert!(serde_json::from_str::<SortOrder>("3").is_err());
    }
}
