use gloo::net::http::Request;
use shared::{parse_catalog, CatalogItem, SaveTicketResponse, TicketEntry};

/// Base URL of the backend: the origin that served the page.
///
/// The backend serves the page itself, and `trunk serve` proxies the API paths to it during
/// development, so every request stays same-origin. An empty base yields relative URLs.
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Join a base URL and an absolute path without doubling the slash
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client talking to the page's own origin
    pub fn new() -> Self {
        Self {
            base_url: page_origin(),
        }
    }

    /// Fetch and validate the dessert catalog
    pub async fn get_catalog(&self) -> Result<Vec<CatalogItem>, String> {
        let url = endpoint(&self.base_url, "/desserts.json");

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch desserts.json: {}", e))?;

        if !response.ok() {
            return Err(format!(
                "Failed to load desserts.json: {} {}",
                response.status(),
                response.status_text()
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read desserts.json: {}", e))?;

        parse_catalog(&body).map_err(|e| e.to_string())
    }

    /// Submit a ticket to the ticket log
    pub async fn save_ticket(&self, entries: &[TicketEntry]) -> Result<SaveTicketResponse, String> {
        let url = endpoint(&self.base_url, "/save-ticket");

        match Request::post(&url)
            .json(&entries)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<SaveTicketResponse>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    let status = response.status();
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(format!("Server error {}: {}", status, error_text))
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
