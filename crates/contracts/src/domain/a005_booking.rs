use super::a003_contacto::ContactForm;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Booking payload assembled by the wizard (admin flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub contact_id: String,
    pub centro_id: String,
    pub producto_id: String,
    pub user_type: String,
    pub reservation_type: String,
    /// ISO dates, `YYYY-MM-DD`.
    pub date_from: String,
    pub date_to: String,
    /// 24-hour `HH:MM`.
    pub start_time: String,
    pub end_time: String,
    /// Weekday tokens (`monday`..`sunday`); only meaningful for
    /// recurring reservation types.
    #[serde(default)]
    pub weekdays: Vec<String>,
    #[serde(default)]
    pub open_ended: bool,
    #[serde(default)]
    pub attendees: Option<u32>,
    #[serde(default)]
    pub configuracion: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Booking status label, e.g. `"Booked"`, `"Paid"`, `"Invoiced"`.
    pub status: String,
    /// Manual hourly rate override.
    #[serde(default)]
    pub tarifa: Option<f64>,
}

impl BookingRequest {
    /// Sanity checks before submission. Step components already gate these
    /// interactively; this is the last line before the wire.
    pub fn validate(&self) -> Result<()> {
        if self.contact_id.is_empty() {
            bail!("booking requires a contact");
        }
        if self.producto_id.is_empty() || self.centro_id.is_empty() {
            bail!("booking requires a centro and a producto");
        }
        if self.date_from.is_empty() || self.date_to.is_empty() {
            bail!("booking requires both dates");
        }
        // ISO dates compare correctly as strings.
        if self.date_from > self.date_to {
            bail!("dateFrom must not be after dateTo");
        }
        if self.start_time.is_empty() || self.end_time.is_empty() {
            bail!("booking requires both times");
        }
        Ok(())
    }
}

/// Nested block/slot created alongside a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloqueoRef {
    pub id: String,
}

/// Response to booking creation. Carries at least one nested block id,
/// used as the key for the confirmation email dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingCreated {
    pub id: String,
    #[serde(default)]
    pub bloqueos: Vec<BloqueoRef>,
}

impl BookingCreated {
    pub fn first_bloqueo_id(&self) -> Option<&str> {
        self.bloqueos.first().map(|b| b.id.as_str())
    }
}

/// Public booking request (end-user flow). Sent only after either the
/// free-tier check passes or the payment provider reports success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublicBookingRequest {
    pub contact: ContactForm,
    pub producto_nombre: String,
    pub centro_id: String,
    pub date_from: String,
    pub date_to: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub attendees: Option<u32>,
    #[serde(default)]
    pub note: Option<String>,
    /// Present iff the booking was paid through the payment element.
    #[serde(default)]
    pub payment_intent_id: Option<String>,
}

/// Free-booking-eligibility answer, keyed by contact email + product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeBookingStatus {
    pub is_free: bool,
    #[serde(default)]
    pub used: u32,
    #[serde(default)]
    pub free_limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> BookingRequest {
        BookingRequest {
            contact_id: "c-1".into(),
            centro_id: "centro-1".into(),
            producto_id: "sala-2".into(),
            user_type: "Usuario Aulas".into(),
            reservation_type: "Por Horas".into(),
            date_from: "2024-07-01".into(),
            date_to: "2024-07-01".into(),
            start_time: "10:00".into(),
            end_time: "11:00".into(),
            status: "Booked".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_dates() {
        let mut req = valid_request();
        req.date_from = "2024-07-02".into();
        req.date_to = "2024-07-01".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_contact() {
        let mut req = valid_request();
        req.contact_id.clear();
        assert!(req.validate().is_err());
    }
}
