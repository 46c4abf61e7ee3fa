use serde::{Deserialize, Serialize};

use super::{parse_year, ImageFile};

/// Person as it appears in popular and search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub known_for: Vec<KnownFor>,
}

/// Mixed movie/show entry in a person's `known_for` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownFor {
    pub id: i64,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl KnownFor {
    /// Movies carry `title`, shows carry `name`.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

/// Full person record from `/person/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub also_known_as: Vec<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
}

impl PersonDetail {
    pub fn birth_year(&self) -> Option<i32> {
        self.birthday.as_deref().and_then(parse_year)
    }
}

/// `/person/{id}/combined_credits`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonCredits {
    #[serde(default)]
    pub cast: Vec<PersonCredit>,
    #[serde(default)]
    pub crew: Vec<PersonCredit>,
}

/// One role (cast) or job (crew) of a person, on either a movie or a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCredit {
    pub id: i64,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl PersonCredit {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .and_then(parse_year)
    }
}

/// `/person/{id}/images`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileImages {
    #[serde(default)]
    pub profiles: Vec<ImageFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_for_mixes_movies_and_shows() {
        let json = r#"{
            "id": 287,
            "name": "Brad Pitt",
            "known_for": [
                {"id": 550, "media_type": "movie", "title": "Fight Club"},
                {"id": 1405, "media_type": "tv", "name": "Dexter"}
            ]
        }"#;
        let person: PersonSummary = serde_json::from_str(json).unwrap();
        assert_eq!(person.known_for[0].display_title(), "Fight Club");
        assert_eq!(person.known_for[1].display_title(), "Dexter");
    }

    #[test]
    fn test_credit_year_falls_back_to_air_date() {
        let credit = PersonCredit {
            id: 1,
            media_type: Some("tv".to_string()),
            title: None,
            name: Some("Show".to_string()),
            character: Some("Lead".to_string()),
            job: None,
            poster_path: None,
            release_date: None,
            first_air_date: Some("2008-01-20".to_string()),
            vote_average: 0.0,
        };
        assert_eq!(credit.year(), Some(2008));
    }
}
