use serde::{Deserialize, Serialize};

/// One line of an internal invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: f64,
    /// Unit price, EUR.
    pub price: f64,
    pub vat_rate: f64,
}

/// Internal invoice draft created right after a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub contact_id: String,
    pub centro_id: String,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: f64,
    pub vat: f64,
    pub total: f64,
    /// `"Pagado"` for settled bookings, `"Pendiente"` for bank transfer
    /// and hosted invoices.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceCreated {
    pub id: String,
}
