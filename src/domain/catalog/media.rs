use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// `/{movie|tv}/{id}/credits`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|member| member.job.as_deref() == Some("Director"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// `/{movie|tv}/{id}/images`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Images {
    #[serde(default)]
    pub backdrops: Vec<ImageFile>,
    #[serde(default)]
    pub posters: Vec<ImageFile>,
    #[serde(default)]
    pub logos: Vec<ImageFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFile {
    pub file_path: String,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub aspect_ratio: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub iso_639_1: Option<String>,
}

/// Trailer, teaser or clip attached to a movie or show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub iso_639_1: Option<String>,
}

impl Video {
    pub fn watch_url(&self) -> Option<String> {
        match self.site.as_str() {
            "YouTube" => Some(format!("https://www.youtube.com/watch?v={}", self.key)),
            "Vimeo" => Some(format!("https://vimeo.com/{}", self.key)),
            _ => None,
        }
    }

    pub fn is_trailer(&self) -> bool {
        self.kind.as_deref() == Some("Trailer")
    }
}

/// Streaming/rental offers for one region from `/{movie|tv}/{id}/watch/providers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<Provider>,
    #[serde(default)]
    pub rent: Vec<Provider>,
    #[serde(default)]
    pub buy: Vec<Provider>,
}

impl RegionProviders {
    pub fn is_empty(&self) -> bool {
        self.flatrate.is_empty() && self.rent.is_empty() && self.buy.is_empty()
    }
}

/// Envelope keyed by ISO 3166-1 region code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchProviderResults {
    #[serde(default)]
    pub results: HashMap<String, RegionProviders>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: i64,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub display_priority: i64,
}

/// Filters for `/discover/{movie|tv}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverFilter {
    pub genre_ids: Vec<i64>,
    pub sort_by: Option<String>,
    pub year: Option<i32>,
}

impl DiscoverFilter {
    pub fn with_genre(mut self, genre_id: i64) -> Self {
        self.genre_ids.push(genre_id);
        self
    }

    pub fn sorted_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// Query pairs appended to the discover request; the year key differs per kind.
    pub fn query_pairs(&self, year_key: &str) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !self.genre_ids.is_empty() {
            let genres: Vec<String> = self.genre_ids.iter().map(|id| id.to_string()).collect();
            pairs.push(("with_genres".to_string(), genres.join(",")));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sort_by".to_string(), sort_by.clone()));
        }
        if let Some(year) = self.year {
            pairs.push((year_key.to_string(), year.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filter_pairs() {
        let filter = DiscoverFilter::default()
            .with_genre(28)
            .with_genre(12)
            .sorted_by("vote_average.desc");
        let pairs = filter.query_pairs("primary_release_year");
        assert_eq!(
            pairs,
            vec![
                ("with_genres".to_string(), "28,12".to_string()),
                ("sort_by".to_string(), "vote_average.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_filter_adds_nothing() {
        assert!(DiscoverFilter::default().query_pairs("first_air_date_year").is_empty());
    }

    #[test]
    fn test_video_urls() {
        let json = r#"{"id":"v1","key":"abc","name":"Trailer","site":"YouTube","type":"Trailer","official":true}"#;
        let video: Video = serde_json::from_str(json).unwrap();
        assert!(video.is_trailer());
        assert_eq!(
            video.watch_url().as_deref(),
            Some("https://www.youtube.com/watch?v=abc")
        );
    }

    #[test]
    fn test_providers_by_region() {
        let json = r#"{"id": 550, "results": {
            "US": {"link": "https://www.themoviedb.org/movie/550/watch",
                   "flatrate": [{"provider_id": 8, "provider_name": "Netflix", "display_priority": 1}]}
        }}"#;
        let results: WatchProviderResults = serde_json::from_str(json).unwrap();
        let us = &results.results["US"];
        assert_eq!(us.flatrate[0].provider_name, "Netflix");
        assert!(us.rent.is_empty());
        assert!(!us.is_empty());
    }

    #[test]
    fn test_directors() {
        let credits = Credits {
            cast: Vec::new(),
            crew: vec![
                CrewMember {
                    id: 1,
                    name: "Lana".to_string(),
                    job: Some("Director".to_string()),
                    department: Some("Directing".to_string()),
                    profile_path: None,
                },
                CrewMember {
                    id: 2,
                    name: "Joel".to_string(),
                    job: Some("Producer".to_string()),
                    department: Some("Production".to_string()),
                    profile_path: None,
                },
            ],
        };
        let names: Vec<&str> = credits.directors().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Lana"]);
    }
}
