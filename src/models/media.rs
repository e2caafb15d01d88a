//! Catalog data models.
//!
//! Rows are owned by the table store; the client only reads them. Ids come
//! back as strings or integers depending on the table, so they are
//! normalised to strings on the way in.

use serde::{Deserialize, Deserializer, Serialize};

/// Media type enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Movie => write!(f, "movie"),
            MediaType::Tv => write!(f, "tv"),
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaType::Movie),
            "tv" | "show" | "tvshow" | "tvshows" => Ok(MediaType::Tv),
            other => Err(crate::Error::other(format!("unknown media type '{}'", other))),
        }
    }
}

/// Accept either a JSON string or number as an id.
pub(crate) fn de_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Str(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// Optional id, string or number, `null` when absent.
pub(crate) fn de_opt_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "de_id")] String);

    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(id)| id))
}

/// Treat a JSON `null` list as empty.
fn de_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// A movie row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Movie {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default, deserialize_with = "de_list")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub parent_movie_id: Option<String>,
    #[serde(default)]
    pub part_number: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Movie {
    /// Whether the row is visible to viewers.
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }

    /// Standalone movies and the first part of a multi-part movie.
    pub fn is_standalone_or_first_part(&self) -> bool {
        matches!(self.part_number, None | Some(0) | Some(1))
    }

    /// Release year, if the date is present.
    pub fn year(&self) -> Option<u16> {
        year_of(self.release_date.as_deref())
    }
}

/// A TV show row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TvShow {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default, deserialize_with = "de_list")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TvShow {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }

    pub fn year(&self) -> Option<u16> {
        year_of(self.first_air_date.as_deref())
    }
}

/// A season row. Often synthesized from the episode list instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    #[serde(deserialize_with = "de_id")]
    pub tv_show_id: String,
    pub season_number: u32,
}

/// A downloadable rendition of an episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    #[serde(default)]
    pub quality: Option<String>,
    pub url: String,
}

/// An episode row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_id")]
    pub tv_show_id: String,
    pub season_number: u32,
    pub episode_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub still_path: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default, deserialize_with = "de_list")]
    pub download_links: Vec<DownloadLink>,
}

impl Episode {
    /// Ordering key: season first, then episode.
    pub fn key(&self) -> (u32, u32) {
        (self.season_number, self.episode_number)
    }

    /// Short label such as `S01E04`.
    pub fn code(&self) -> String {
        format!("S{:02}E{:02}", self.season_number, self.episode_number)
    }
}

/// A movie or a show, for rows that mix both.
#[derive(Debug, Clone)]
pub enum CatalogItem {
    Movie(Movie),
    Tv(TvShow),
}

impl CatalogItem {
    pub fn id(&self) -> &str {
        match self {
            CatalogItem::Movie(m) => &m.id,
            CatalogItem::Tv(t) => &t.id,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            CatalogItem::Movie(_) => MediaType::Movie,
            CatalogItem::Tv(_) => MediaType::Tv,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CatalogItem::Movie(m) => &m.title,
            CatalogItem::Tv(t) => &t.name,
        }
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        match self {
            CatalogItem::Movie(m) => m.backdrop_path.as_deref(),
            CatalogItem::Tv(t) => t.backdrop_path.as_deref(),
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            CatalogItem::Movie(m) => m.poster_path.as_deref(),
            CatalogItem::Tv(t) => t.poster_path.as_deref(),
        }
    }

    pub fn vote_average(&self) -> Option<f32> {
        match self {
            CatalogItem::Movie(m) => m.vote_average,
            CatalogItem::Tv(t) => t.vote_average,
        }
    }

    pub fn year(&self) -> Option<u16> {
        match self {
            CatalogItem::Movie(m) => m.year(),
            CatalogItem::Tv(t) => t.year(),
        }
    }
}

/// A saved title in the client-local watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    /// Release date for movies, first air date for shows.
    #[serde(default)]
    pub date: Option<String>,
}

impl WatchlistItem {
    /// Identity of the entry in the watchlist set.
    pub fn key(&self) -> (&str, MediaType) {
        (&self.id, self.media_type)
    }
}

impl From<&Movie> for WatchlistItem {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.clone(),
            media_type: MediaType::Movie,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            vote_average: movie.vote_average,
            date: movie.release_date.clone(),
        }
    }
}

impl From<&TvShow> for WatchlistItem {
    fn from(show: &TvShow) -> Self {
        Self {
            id: show.id.clone(),
            media_type: MediaType::Tv,
            title: show.name.clone(),
            poster_path: show.poster_path.clone(),
            vote_average: show.vote_average,
            date: show.first_air_date.clone(),
        }
    }
}

impl From<&CatalogItem> for WatchlistItem {
    fn from(item: &CatalogItem) -> Self {
        match item {
            CatalogItem::Movie(m) => m.into(),
            CatalogItem::Tv(t) => t.into(),
        }
    }
}

fn year_of(date: Option<&str>) -> Option<u16> {
    date.and_then(|d| d.get(0..4)).and_then(|y| y.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_accepts_numeric_and_string_ids() {
        let numeric: Movie = serde_json::from_str(r#"{"id": 42, "title": "Heat"}"#).unwrap();
        assert_eq!(numeric.id, "42");

        let uuid: Movie = serde_json::from_str(
            r#"{"id": "8f0c6d2e-1111-2222-3333-444455556666", "title": "Heat", "genres": [{"id": 80, "name": "Crime"}]}"#,
        )
        .unwrap();
        assert_eq!(uuid.id, "8f0c6d2e-1111-2222-3333-444455556666");
        assert_eq!(uuid.genres[0].id, 80);
    }

    #[test]
    fn test_parent_movie_id_accepts_numbers_and_null() {
        let rows: Vec<Movie> = serde_json::from_str(
            r#"[
                {"id": 3, "title": "Part Two", "part_number": 2, "parent_movie_id": 2},
                {"id": 4, "title": "Part Three", "parent_movie_id": "2"},
                {"id": 5, "title": "Standalone", "parent_movie_id": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows[0].parent_movie_id.as_deref(), Some("2"));
        assert_eq!(rows[1].parent_movie_id.as_deref(), Some("2"));
        assert_eq!(rows[2].parent_movie_id, None);
    }

    #[test]
    fn test_standalone_or_first_part() {
        let mut movie = Movie::default();
        assert!(movie.is_standalone_or_first_part());
        movie.part_number = Some(1);
        assert!(movie.is_standalone_or_first_part());
        movie.part_number = Some(2);
        assert!(!movie.is_standalone_or_first_part());
    }

    #[test]
    fn test_year_parsing() {
        let show = TvShow {
            first_air_date: Some("2008-01-20".to_string()),
            ..Default::default()
        };
        assert_eq!(show.year(), Some(2008));
        assert_eq!(TvShow::default().year(), None);
    }

    #[test]
    fn test_watchlist_item_serializes_type_field() {
        let item = WatchlistItem {
            id: "7".to_string(),
            media_type: MediaType::Tv,
            title: "Dark".to_string(),
            poster_path: None,
            vote_average: Some(8.4),
            date: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "tv");
    }
}
