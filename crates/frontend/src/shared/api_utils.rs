//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.

/// Port the BeWorking REST backend listens on.
const BACKEND_PORT: u16 = 8080;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location.
///
/// # Returns
/// - API base URL like "http://localhost:8080" or "https://example.com:8080"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

/// Build a full API URL from a path
///
/// # Example
/// ```text
/// let url = api_url("/api/productos");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
