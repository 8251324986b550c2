use crate::domain::{
    errors::AppError,
    logging::{LogComponent, get_logger},
    market_data::{NewsArticle, NewsFeed},
};
use gloo::storage::{LocalStorage, Storage};
use gloo_net::http::Request;
use serde::Deserialize;
use url::form_urlencoded;

pub const NEWS_API_KEY_STORAGE_KEY: &str = "news_api_key";
const NEWS_BASE_URL: &str = "https://newsapi.org/v2";
const NEWS_QUERY: &str = "cryptocurrency OR bitcoin OR ethereum OR crypto OR blockchain";
const NEWS_PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: String,
    #[serde(default)]
    articles: Vec<NewsArticle>,
    #[serde(default)]
    message: Option<String>,
}

/// Persists the NewsAPI key in browser local storage
pub fn save_api_key(api_key: &str) -> Result<(), AppError> {
    LocalStorage::set(NEWS_API_KEY_STORAGE_KEY, api_key.trim())
        .map_err(|e| AppError::ValidationError(format!("Cannot store API key: {e}")))
}

pub fn stored_api_key() -> Option<String> {
    LocalStorage::get::<String>(NEWS_API_KEY_STORAGE_KEY).ok().filter(|key| !key.trim().is_empty())
}

/// NewsAPI `/everything` client for crypto headlines
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    base_url: String,
    api_key: Option<String>,
}

impl NewsApiClient {
    /// Client using the key from local storage
    pub fn from_storage() -> Self {
        Self { base_url: NEWS_BASE_URL.to_string(), api_key: stored_api_key() }
    }

    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self { base_url: NEWS_BASE_URL.to_string(), api_key: Some(api_key.into()) }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn everything_url(&self, api_key: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", NEWS_QUERY)
            .append_pair("sortBy", "publishedAt")
            .append_pair("pageSize", &NEWS_PAGE_SIZE.to_string())
            .append_pair("language", "en")
            .append_pair("apiKey", api_key)
            .finish();
        format!("{}/everything?{}", self.base_url, query)
    }
}

impl NewsFeed for NewsApiClient {
    async fn fetch_news(&self) -> Result<Vec<NewsArticle>, AppError> {
        let api_key = self.api_key.as_deref().ok_or(AppError::MissingApiKey)?;

        let response = Request::get(&self.everything_url(api_key))
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to fetch news: {e}")))?;

        let body: NewsResponse = response
            .json()
            .await
            .map_err(|e| AppError::DecodeError(format!("Failed to parse news: {e}")))?;

        if body.status != "ok" {
            let reason = body.message.unwrap_or_else(|| "Failed to fetch news".to_string());
            get_logger().warn(LogComponent::Infrastructure("NewsApi"), &reason);
            return Err(AppError::NetworkError(reason));
        }

        get_logger().info(
            LogComponent::Infrastructure("NewsApi"),
            &format!("Loaded {} articles", body.articles.len()),
        );
        Ok(body.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_url_has_fixed_query() {
        let client = NewsApiClient::with_key("k");
        assert_eq!(
            client.everything_url("k"),
            "https://newsapi.org/v2/everything?q=cryptocurrency+OR+bitcoin+OR+ethereum+OR+crypto+OR+blockchain\
             &sortBy=publishedAt&pageSize=10&language=en&apiKey=k"
        );
    }

    #[test]
    fn error_payload_decodes() {
        let body: NewsResponse =
            serde_json::from_str(r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid"}"#)
                .unwrap();
        assert_eq!(body.status, "error");
        assert!(body.articles.is_empty());
        assert_eq!(body.message.as_deref(), Some("Your API key is invalid"));
    }
}
