use crate::shared::api_utils::api_base;
use contracts::domain::a003_contacto::ContactSummary;
use gloo_net::http::Request;

/// Free-text contact lookup (admin mode). Non-OK statuses are errors; the
/// caller decides whether to degrade to an empty dropdown.
pub async fn search_contacts(query: &str) -> Result<Vec<ContactSummary>, String> {
    let url = format!(
        "{}/api/contactos/search?q={}",
        api_base(),
        urlencoding::encode(query)
    );
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if response.status() == 404 {
        return Ok(vec![]);
    }
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<Vec<ContactSummary>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
