use crate::shared::api_utils::api_base;
use contracts::domain::a002_producto::Producto;
use gloo_net::http::Request;

pub async fn fetch_productos(centro_id: &str) -> Result<Vec<Producto>, String> {
    let url = format!(
        "{}/api/productos?centro={}",
        api_base(),
        urlencoding::encode(centro_id)
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
        .json::<Vec<Producto>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
