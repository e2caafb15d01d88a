//! TMDB API client.
//!
//! Used for artwork URLs and the multi-search behind the quick-search
//! overlay. Responses are read-only; nothing is written back.

use crate::models::media::MediaType;
use crate::Result;
use serde::Deserialize;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    pub language: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
    /// API root, overridable for tests.
    pub base_url: String,
}

impl TmdbConfig {
    /// Create config from an API key.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Self {
        let api_key = api_key.into();
        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        Self {
            api_key,
            language: language.into(),
            use_bearer,
            base_url: TMDB_BASE_URL.to_string(),
        }
    }

    /// Create config from the application configuration.
    pub fn from_app_config(config: &crate::models::config::TmdbConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(crate::Error::TmdbApiKeyMissing)?;
        Ok(Self::new(api_key, config.language.clone()))
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Image size tokens understood by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Original,
    W92,
    W154,
    W185,
    W342,
    W500,
    W780,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Original => "original",
            ImageSize::W92 => "w92",
            ImageSize::W154 => "w154",
            ImageSize::W185 => "w185",
            ImageSize::W342 => "w342",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a CDN URL for an image path such as `/abc.jpg`.
///
/// Returns `None` for an empty path so callers can fall back to another
/// image.
pub fn image_url(path: &str, size: ImageSize) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    let sep = if path.starts_with('/') { "" } else { "/" };
    Some(format!("{}/{}{}{}", TMDB_IMAGE_BASE_URL, size, sep, path))
}

/// Media type discriminator in multi-search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiMediaType {
    Movie,
    Tv,
    Person,
    #[serde(other)]
    Unknown,
}

impl MultiMediaType {
    /// Catalog media type, if this result is a title.
    pub fn as_media_type(&self) -> Option<MediaType> {
        match self {
            MultiMediaType::Movie => Some(MediaType::Movie),
            MultiMediaType::Tv => Some(MediaType::Tv),
            _ => None,
        }
    }
}

/// Multi-search page.
#[derive(Debug, Deserialize)]
pub struct MultiSearchResult {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<MultiSearchItem>,
    #[serde(default)]
    pub total_results: u32,
}

/// Multi-search item. Movies carry `title`/`release_date`, shows carry
/// `name`/`first_air_date`, people carry only `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct MultiSearchItem {
    pub id: u64,
    pub media_type: MultiMediaType,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u32>,
}

impl MultiSearchItem {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, extra_params: &str) -> String {
        if self.config.use_bearer {
            format!(
                "{}/{}?language={}{}",
                self.config.base_url, path, self.config.language, extra_params
            )
        } else {
            format!(
                "{}/{}?api_key={}&language={}{}",
                self.config.base_url,
                path,
                self.config.api_key,
                self.config.language,
                extra_params
            )
        }
    }

    /// Send a request and decode the JSON body, mapping error statuses.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.build_request(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or_else(|| status.to_string());
            return Err(crate::Error::Tmdb {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json().await?)
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = if self.config.use_bearer {
            format!("{}/authentication", self.config.base_url)
        } else {
            format!(
                "{}/authentication?api_key={}",
                self.config.base_url, self.config.api_key
            )
        };

        match self.build_request(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Search movies, shows and people in one request.
    pub async fn search_multi(&self, query: &str, page: u32) -> Result<MultiSearchResult> {
        let url = self.build_url(
            "search/multi",
            &format!(
                "&query={}&page={}&include_adult=false",
                urlencoding::encode(query),
                page.max(1)
            ),
        );
        tracing::debug!("TMDB multi-search: {}", query);
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_sizes() {
        assert_eq!(
            image_url("/poster.jpg", ImageSize::W500).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(
            image_url("/b.jpg", ImageSize::Original).as_deref(),
            Some("https://image.tmdb.org/t/p/original/b.jpg")
        );
        assert_eq!(image_url("", ImageSize::W92), None);
    }

    #[test]
    fn test_image_url_passes_absolute_urls_through() {
        assert_eq!(
            image_url("https://cdn.example.com/a.jpg", ImageSize::W780).as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn test_bearer_detection() {
        assert!(TmdbConfig::new("eyJhbGciOi", "en-US").use_bearer);
        assert!(!TmdbConfig::new("abcdef123", "en-US").use_bearer);
    }

    #[test]
    fn test_multi_item_parses_unknown_media_type() {
        let item: MultiSearchItem = serde_json::from_str(
            r#"{"id": 1, "media_type": "collection", "name": "Box set"}"#,
        )
        .unwrap();
        assert_eq!(item.media_type, MultiMediaType::Unknown);
        assert_eq!(item.media_type.as_media_type(), None);
        assert_eq!(item.display_title(), "Box set");
    }
}
