//! Payment-provider facing request/response shapes. The client only ever
//! consumes the returned identifiers; the provider integration itself
//! lives behind the backend.

use serde::{Deserialize, Serialize};

/// Card on file for a contact, as listed by the saved-payment-methods
/// endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCard {
    pub id: String,
    pub brand: String,
    pub last4: String,
    pub exp_month: u32,
    pub exp_year: u32,
}

impl SavedCard {
    pub fn display_label(&self) -> String {
        format!(
            "{} •••• {} ({:02}/{})",
            self.brand, self.last4, self.exp_month, self.exp_year
        )
    }
}

/// Charge a saved card. Amounts are minor units (cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub card_id: String,
    pub contact_email: String,
    pub amount: i64,
    pub currency: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeResult {
    pub id: String,
    pub status: String,
}

/// Hosted (provider-side) invoice with a configurable due-date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedInvoiceRequest {
    pub contact_email: String,
    pub contact_name: String,
    pub amount: i64,
    pub currency: String,
    pub due_days: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedInvoiceResult {
    pub id: String,
    #[serde(default)]
    pub hosted_url: Option<String>,
}

/// Payment-intent creation for the end-user payment element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub id: String,
    pub client_secret: String,
}

/// EUR to minor units (cents). The provider only accepts integer amounts.
pub fn eur_to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eur_to_minor_units() {
        assert_eq!(eur_to_minor_units(42.0), 4200);
        assert_eq!(eur_to_minor_units(12.345), 1235);
        assert_eq!(eur_to_minor_units(0.0), 0);
        // float representation of 19.99 must still land on 1999
        assert_eq!(eur_to_minor_units(19.99), 1999);
    }

    #[test]
    fn test_card_display_label() {
        let card = SavedCard {
            id: "pm_1".into(),
            brand: "visa".into(),
            last4: "4242".into(),
            exp_month: 7,
            exp_year: 2027,
        };
        assert_eq!(card.display_label(), "visa •••• 4242 (07/2027)");
    }
}
