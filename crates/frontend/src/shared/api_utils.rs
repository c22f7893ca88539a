//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and mapping
//! transport failures into domain errors.

use contracts::domain::a001_tender_process::StoreError;

/// Порт бэкенда панели тендера
pub const API_PORT: u16 = 3000;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using [`API_PORT`] for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
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
    base_for(&protocol, &hostname)
}

fn base_for(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,no_run
/// use tender_dashboard::shared::api_utils::api_url;
///
/// let url = api_url("/api/tender/process/T-1");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Экранировать идентификатор для подстановки в путь
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

pub fn network_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Network(e.to_string())
}

pub fn decode_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Decode(e.to_string())
}

pub fn encode_error(e: impl std::fmt::Debug) -> StoreError {
    StoreError::Encode(format!("{e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_for() {
        assert_eq!(base_for("https:", "example.com"), "https://example.com:3000");
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(path_segment("T 1/2"), "T%201%2F2");
        assert_eq!(path_segment("T-100"), "T-100");
    }
}
