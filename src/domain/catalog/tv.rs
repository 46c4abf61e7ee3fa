use serde::{Deserialize, Serialize};

use super::{parse_year, Genre};

/// TV show as it appears in list and search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
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
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    #[serde(default)]
    pub popularity: f64,
}

impl TvSummary {
    pub fn first_air_year(&self) -> Option<i32> {
        self.first_air_date.as_deref().and_then(parse_year)
    }
}

/// Full show record from `/tv/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<i64>,
    #[serde(default)]
    pub number_of_episodes: Option<i64>,
    #[serde(default)]
    pub episode_run_time: Vec<i64>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
}

impl TvDetail {
    pub fn first_air_year(&self) -> Option<i32> {
        self.first_air_date.as_deref().and_then(parse_year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

/// Season entry embedded in a show detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub id: i64,
    pub name: String,
    pub season_number: i64,
    #[serde(default)]
    pub episode_count: i64,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Full season from `/tv/{id}/season/{n}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDetail {
    pub id: i64,
    pub name: String,
    pub season_number: i64,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub name: String,
    pub episode_number: i64,
    pub season_number: i64,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub still_path: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub vote_average: f64,
}

/// Curated show lists exposed by TMDB under `/tv/{list}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvList {
    Popular,
    TopRated,
    AiringToday,
    OnTheAir,
}

impl TvList {
    pub fn path_segment(&self) -> &'static str {
        match self {
            TvList::Popular => "popular",
            TvList::TopRated => "top_rated",
            TvList::AiringToday => "airing_today",
            TvList::OnTheAir => "on_the_air",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_with_seasons() {
        let json = r#"{
            "id": 1399,
            "name": "Game of Thrones",
            "first_air_date": "2011-04-17",
            "number_of_seasons": 8,
            "episode_run_time": [60],
            "seasons": [
                {"id": 3627, "name": "Season 1", "season_number": 1, "episode_count": 10}
            ]
        }"#;
        let show: TvDetail = serde_json::from_str(json).unwrap();
        assert_eq!(show.first_air_year(), Some(2011));
        assert_eq!(show.seasons.len(), 1);
        assert_eq!(show.seasons[0].episode_count, 10);
    }

    #[test]
    fn test_list_segments() {
        assert_eq!(TvList::AiringToday.path_segment(), "airing_today");
        assert_eq!(TvList::OnTheAir.path_segment(), "on_the_air");
    }
}
