//! Backend calls for the booking wizard. All endpoints are opaque REST;
//! this module only shapes requests and parses responses.

use crate::shared::api_utils::api_base;
use contracts::billing::{
    ChargeRequest, ChargeResult, HostedInvoiceRequest, HostedInvoiceResult, PaymentIntentRequest,
    PaymentIntentResponse,
};
use contracts::domain::a004_bloqueo::Bloqueo;
use contracts::domain::a005_booking::{
    BookingCreated, BookingRequest, FreeBookingStatus, PublicBookingRequest,
};
use contracts::domain::a006_invoice::{InvoiceCreated, InvoiceDraft};
use gloo_net::http::Request;

/// Availability records for one day across the given product names. The
/// caller filters down to the product in view.
pub async fn fetch_bloqueos(fecha: &str, productos: &[String]) -> Result<Vec<Bloqueo>, String> {
    let url = format!(
        "{}/api/bloqueos?fecha={}&productos={}",
        api_base(),
        urlencoding::encode(fecha),
        urlencoding::encode(&productos.join(","))
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
        .json::<Vec<Bloqueo>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Cards on file for a contact email.
pub async fn fetch_saved_cards(
    email: &str,
) -> Result<Vec<contracts::billing::SavedCard>, String> {
    let url = format!(
        "{}/api/pagos/tarjetas?email={}",
        api_base(),
        urlencoding::encode(email)
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
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn charge_card(request: &ChargeRequest) -> Result<ChargeResult, String> {
    post_json("/api/pagos/cobrar", request).await
}

pub async fn create_hosted_invoice(
    request: &HostedInvoiceRequest,
) -> Result<HostedInvoiceResult, String> {
    post_json("/api/pagos/factura-externa", request).await
}

pub async fn create_payment_intent(
    request: &PaymentIntentRequest,
) -> Result<PaymentIntentResponse, String> {
    post_json("/api/pagos/intento", request).await
}

/// Free-booking eligibility, keyed by contact email + product name.
pub async fn check_free_booking(
    email: &str,
    producto_nombre: &str,
) -> Result<FreeBookingStatus, String> {
    let url = format!(
        "{}/api/reservas/gratuita?email={}&producto={}",
        api_base(),
        urlencoding::encode(email),
        urlencoding::encode(producto_nombre)
    );
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<FreeBookingStatus>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn create_booking(request: &BookingRequest) -> Result<BookingCreated, String> {
    post_json("/api/reservas", request).await
}

pub async fn create_public_booking(
    request: &PublicBookingRequest,
) -> Result<BookingCreated, String> {
    post_json("/api/reservas/publica", request).await
}

pub async fn create_invoice(request: &InvoiceDraft) -> Result<InvoiceCreated, String> {
    post_json("/api/facturas", request).await
}

/// Fire-and-forget confirmation email keyed by the booking's block id.
pub async fn send_confirmation_email(bloqueo_id: &str) -> Result<(), String> {
    post_empty(&format!(
        "/api/emails/confirmacion/{}",
        urlencoding::encode(bloqueo_id)
    ))
    .await
}

/// Fire-and-forget invoice email keyed by invoice id.
pub async fn send_invoice_email(invoice_id: &str) -> Result<(), String> {
    post_empty(&format!(
        "/api/emails/factura/{}",
        urlencoding::encode(invoice_id)
    ))
    .await
}

async fn post_json<B, T>(path: &str, body: &B) -> Result<T, String>
where
    B: serde::Serialize,
    T: for<'de> serde::Deserialize<'de>,
{
    let response = Request::post(&format!("{}{}", api_base(), path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        // Surface backend error details when they exist.
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<String>,
        }
        if let Ok(data) = serde_json::from_str::<ErrorResponse>(&text) {
            if let Some(msg) = data.error {
                return Err(msg);
            }
        }
        return Err(format!("HTTP {}: {}", response.status(), text));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn post_empty(path: &str) -> Result<(), String> {
    let response = Request::post(&format!("{}{}", api_base(), path))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}
