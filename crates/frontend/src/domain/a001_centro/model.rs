use crate::shared::api_utils::api_base;
use contracts::domain::a001_centro::Centro;
use gloo_net::http::Request;

pub async fn fetch_centros() -> Result<Vec<Centro>, String> {
    let response = Request::get(&format!("{}/api/centros", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<Vec<Centro>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
