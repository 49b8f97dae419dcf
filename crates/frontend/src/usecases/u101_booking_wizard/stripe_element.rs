//! Bridge to the payment element mounted by the host page.
//!
//! The provider's JS SDK is loaded by `index.html`, which exposes two
//! globals: `bwMountPaymentElement(options)` mounts the card element into
//! a container, `bwConfirmPayment()` confirms the active intent. Both
//! return promises; here they are wrapped into plain `Result`s so the
//! payment step never touches `JsValue` directly.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = bwMountPaymentElement, catch)]
    fn bw_mount_payment_element(options: JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(js_name = bwConfirmPayment, catch)]
    fn bw_confirm_payment() -> Result<js_sys::Promise, JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MountOptions<'a> {
    client_secret: &'a str,
    container: &'a str,
}

fn js_error(context: &str, value: JsValue) -> String {
    let detail = value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "unknown error".to_string());
    format!("{}: {}", context, detail)
}

/// Mount the payment element for `client_secret` into the element with id
/// `container`. Idempotent on the JS side: remounting replaces the element.
pub async fn mount_payment_element(client_secret: &str, container: &str) -> Result<(), String> {
    let options = serde_wasm_bindgen::to_value(&MountOptions {
        client_secret,
        container,
    })
    .map_err(|e| format!("Failed to serialize mount options: {}", e))?;

    let promise =
        bw_mount_payment_element(options).map_err(|e| js_error("Payment element", e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| js_error("Payment element", e))?;
    Ok(())
}

/// Confirm the mounted intent. Resolves to the provider's payment-intent
/// id only when it reports `succeeded`; any other status is an error the
/// payment step surfaces inline.
pub async fn confirm_payment() -> Result<String, String> {
    let promise = bw_confirm_payment().map_err(|e| js_error("Payment confirmation", e))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| js_error("Payment confirmation", e))?;

    let status = js_sys::Reflect::get(&value, &JsValue::from_str("status"))
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_default();
    if status != "succeeded" {
        return Err(format!("El pago no se ha completado (estado: {})", status));
    }

    js_sys::Reflect::get(&value, &JsValue::from_str("id"))
        .ok()
        .and_then(|s| s.as_string())
        .ok_or_else(|| "Payment confirmation returned no intent id".to_string())
}
