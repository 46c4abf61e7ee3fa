use serde::{Deserialize, Serialize};

use super::{parse_year, Genre};

/// Movie as it appears in list and search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub popularity: f64,
}

impl MovieSummary {
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(parse_year)
    }
}

/// Full movie record from `/movie/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default)]
    pub revenue: Option<i64>,
    #[serde(default)]
    pub homepage: Option<String>,
}

impl MovieDetail {
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(parse_year)
    }
}

/// Curated movie lists exposed by TMDB under `/movie/{list}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieList {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl MovieList {
    pub fn path_segment(&self) -> &'static str {
        match self {
            MovieList::Popular => "popular",
            MovieList::TopRated => "top_rated",
            MovieList::NowPlaying => "now_playing",
            MovieList::Upcoming => "upcoming",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_decodes_with_nulls() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "poster_path": null,
            "release_date": "1999-03-30",
            "vote_average": 8.2,
            "genre_ids": [28, 878]
        }"#;
        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 603);
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.release_year(), Some(1999));
        assert_eq!(movie.genre_ids, vec![28, 878]);
    }

    #[test]
    fn test_blank_release_date_has_no_year() {
        let json = r#"{"id": 1, "title": "Untitled", "release_date": ""}"#;
        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_detail_decodes_genres() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "runtime": 148,
            "genres": [{"id": 28, "name": "Action"}],
            "imdb_id": "tt1375666"
        }"#;
        let movie: MovieDetail = serde_json::from_str(json).unwrap();
        assert_eq!(movie.runtime, Some(148));
        assert_eq!(movie.genres[0].name, "Action");
    }
}
