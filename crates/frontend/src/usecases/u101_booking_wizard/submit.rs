//! Payload builders and the two submission pipelines.
//!
//! The admin pipeline is strictly sequential: the payment action must
//! succeed before anything is written, and each later payload depends on
//! the prior step's result. The email dispatches at the tail are
//! best-effort: failures are logged and never fail the booking.

use super::model;
use super::pricing::{round2, Pricing};
use super::state::{BookingDraft, DraftContact};
use contracts::billing::{eur_to_minor_units, ChargeRequest, HostedInvoiceRequest};
use contracts::domain::a005_booking::{BookingCreated, BookingRequest, PublicBookingRequest};
use contracts::domain::a006_invoice::{InvoiceDraft, InvoiceLine};

/// Admin payment options, mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminPaymentOption {
    /// No charge; booking is settled immediately.
    Free,
    /// Charge a card on file through the payment provider.
    SavedCard { card_id: String },
    /// Provider-hosted invoice with a due-date window.
    HostedInvoice { due_days: u32 },
    /// Booking is invoiced internally and paid off-platform.
    BankTransfer,
}

impl AdminPaymentOption {
    pub fn booking_status(&self) -> &'static str {
        match self {
            AdminPaymentOption::Free | AdminPaymentOption::SavedCard { .. } => "Paid",
            AdminPaymentOption::HostedInvoice { .. } | AdminPaymentOption::BankTransfer => {
                "Invoiced"
            }
        }
    }

    pub fn invoice_status(&self) -> &'static str {
        match self {
            AdminPaymentOption::Free | AdminPaymentOption::SavedCard { .. } => "Pagado",
            AdminPaymentOption::HostedInvoice { .. } | AdminPaymentOption::BankTransfer => {
                "Pendiente"
            }
        }
    }

    /// Only bank transfers get the internal invoice emailed; the hosted
    /// option already delivers the provider's own invoice to the contact,
    /// and a second email would duplicate it.
    pub fn sends_invoice_email(&self) -> bool {
        matches!(self, AdminPaymentOption::BankTransfer)
    }
}

pub fn build_booking_request(
    draft: &BookingDraft,
    status: &str,
) -> Result<BookingRequest, String> {
    let contact_id = draft
        .contact
        .as_ref()
        .and_then(|c| c.id())
        .ok_or("Selecciona un contacto antes de confirmar")?;
    let centro = draft.centro.as_ref().ok_or("Falta el centro")?;
    let producto = draft.producto.as_ref().ok_or("Falta el producto")?;

    let request = BookingRequest {
        contact_id: contact_id.to_string(),
        centro_id: centro.id.clone(),
        producto_id: producto.id.clone(),
        user_type: draft.user_type.clone(),
        reservation_type: draft.reservation_type.clone(),
        date_from: draft.date_from.clone(),
        date_to: draft.date_to.clone(),
        start_time: draft.start_time.clone(),
        end_time: draft.end_time.clone(),
        weekdays: draft.weekdays.iter().cloned().collect(),
        open_ended: draft.open_ended,
        attendees: draft.attendees_count(),
        configuracion: non_empty(&draft.configuracion),
        note: non_empty(&draft.note),
        status: status.to_string(),
        tarifa: draft.tarifa_value(),
    };
    request.validate().map_err(|e| e.to_string())?;
    Ok(request)
}

/// Internal invoice mirroring the computed pricing: one line per booking
/// series, priced per booking, quantities carrying the recurrence count.
pub fn build_invoice_draft(
    draft: &BookingDraft,
    pricing: &Pricing,
    status: &str,
) -> Result<InvoiceDraft, String> {
    let contact_id = draft
        .contact
        .as_ref()
        .and_then(|c| c.id())
        .ok_or("Selecciona un contacto antes de confirmar")?;
    let centro = draft.centro.as_ref().ok_or("Falta el centro")?;

    let count = f64::from(pricing.booking_count);
    Ok(InvoiceDraft {
        contact_id: contact_id.to_string(),
        centro_id: centro.id.clone(),
        lines: vec![InvoiceLine {
            description: pricing.label.clone(),
            quantity: count,
            price: pricing.subtotal,
            vat_rate: pricing.vat_rate,
        }],
        subtotal: round2(pricing.subtotal * count),
        vat: round2(pricing.vat * count),
        total: pricing.grand_total,
        status: status.to_string(),
    })
}

pub fn build_public_booking_request(
    draft: &BookingDraft,
    payment_intent_id: Option<String>,
) -> Result<PublicBookingRequest, String> {
    let Some(DraftContact::Manual(form)) = draft.contact.as_ref() else {
        return Err("Completa tus datos de contacto".to_string());
    };
    let errors = form.validate();
    if !errors.is_empty() {
        return Err("Completa tus datos de contacto".to_string());
    }
    let centro = draft.centro.as_ref().ok_or("Falta el centro")?;
    let producto = draft.producto.as_ref().ok_or("Falta el producto")?;

    Ok(PublicBookingRequest {
        contact: form.clone(),
        producto_nombre: producto.nombre.clone(),
        centro_id: centro.id.clone(),
        date_from: draft.date_from.clone(),
        date_to: draft.date_to.clone(),
        start_time: draft.start_time.clone(),
        end_time: draft.end_time.clone(),
        attendees: draft.attendees_count(),
        note: non_empty(&draft.note),
        payment_intent_id,
    })
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminSubmitOutcome {
    pub booking: BookingCreated,
    pub invoice_id: String,
}

/// Admin submission: payment action, then booking, then internal invoice,
/// then best-effort emails — awaited in that order. If the payment action
/// fails nothing is written; if an email fails the booking already
/// succeeded and stays that way.
pub async fn submit_admin(
    draft: &BookingDraft,
    pricing: &Pricing,
    option: &AdminPaymentOption,
) -> Result<AdminSubmitOutcome, String> {
    let booking_request = build_booking_request(draft, option.booking_status())?;
    let invoice_draft = build_invoice_draft(draft, pricing, option.invoice_status())?;
    let contact = draft.contact.as_ref().ok_or("Falta el contacto")?;

    match option {
        AdminPaymentOption::Free | AdminPaymentOption::BankTransfer => {}
        AdminPaymentOption::SavedCard { card_id } => {
            model::charge_card(&ChargeRequest {
                card_id: card_id.clone(),
                contact_email: contact.email().to_string(),
                amount: eur_to_minor_units(pricing.grand_total),
                currency: "eur".to_string(),
                description: pricing.label.clone(),
            })
            .await?;
        }
        AdminPaymentOption::HostedInvoice { due_days } => {
            model::create_hosted_invoice(&HostedInvoiceRequest {
                contact_email: contact.email().to_string(),
                contact_name: contact.display_name(),
                amount: eur_to_minor_units(pricing.grand_total),
                currency: "eur".to_string(),
                due_days: *due_days,
                description: pricing.label.clone(),
            })
            .await?;
        }
    }

    let booking = model::create_booking(&booking_request).await?;
    let invoice = model::create_invoice(&invoice_draft).await?;

    if option.sends_invoice_email() {
        if let Err(e) = model::send_invoice_email(&invoice.id).await {
            log::warn!("invoice email dispatch failed: {}", e);
        }
    }
    if let Some(bloqueo_id) = booking.first_bloqueo_id() {
        if let Err(e) = model::send_confirmation_email(bloqueo_id).await {
            log::warn!("confirmation email dispatch failed: {}", e);
        }
    } else {
        log::warn!("booking {} has no bloqueo id, confirmation email skipped", booking.id);
    }

    Ok(AdminSubmitOutcome {
        booking,
        invoice_id: invoice.id,
    })
}

/// End-user submission. The caller is responsible for having settled
/// payment first (or having verified free-tier eligibility); this only
/// posts the public booking request.
pub async fn submit_public(
    draft: &BookingDraft,
    payment_intent_id: Option<String>,
) -> Result<BookingCreated, String> {
    let request = build_public_booking_request(draft, payment_intent_id)?;
    model::create_public_booking(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u101_booking_wizard::pricing::compute_pricing;
    use contracts::domain::a001_centro::Centro;
    use contracts::domain::a002_producto::Producto;
    use contracts::domain::a003_contacto::{ContactForm, ContactSummary};

    fn admin_draft() -> BookingDraft {
        let mut d = BookingDraft::default();
        d.centro = Some(Centro {
            id: "centro-1".into(),
            nombre: "BeWorking Málaga".into(),
            direccion: None,
            ciudad: None,
        });
        d.producto = Some(Producto {
            id: "sala-2".into(),
            nombre: "Sala 2".into(),
            centro_id: "centro-1".into(),
            tipo: Default::default(),
            price_from: Some(20.0),
            capacity: Some(8),
        });
        d.contact = Some(DraftContact::Seleccionado(ContactSummary {
            id: "c-1".into(),
            name: "Ana García".into(),
            email: "ana@beworking.es".into(),
            phone: None,
            company: None,
            billing_tax_id: None,
        }));
        d.date_from = "2024-07-01".into();
        d.date_to = "2024-07-01".into();
        d.start_time = "10:00".into();
        d.end_time = "11:00".into();
        d
    }

    #[test]
    fn test_option_status_mapping() {
        assert_eq!(AdminPaymentOption::Free.booking_status(), "Paid");
        assert_eq!(
            AdminPaymentOption::SavedCard { card_id: "pm_1".into() }.booking_status(),
            "Paid"
        );
        assert_eq!(
            AdminPaymentOption::HostedInvoice { due_days: 15 }.booking_status(),
            "Invoiced"
        );
        assert_eq!(AdminPaymentOption::BankTransfer.booking_status(), "Invoiced");

        assert_eq!(AdminPaymentOption::Free.invoice_status(), "Pagado");
        assert_eq!(AdminPaymentOption::BankTransfer.invoice_status(), "Pendiente");
        assert!(!AdminPaymentOption::Free.sends_invoice_email());
        assert!(AdminPaymentOption::BankTransfer.sends_invoice_email());
        // The provider emails hosted invoices itself; no internal copy.
        assert!(!AdminPaymentOption::HostedInvoice { due_days: 15 }.sends_invoice_email());
        assert!(!AdminPaymentOption::SavedCard { card_id: "pm_1".into() }.sends_invoice_email());
    }

    #[test]
    fn test_free_option_builds_paid_booking_and_pagado_invoice() {
        let draft = admin_draft();
        let pricing = compute_pricing(&draft);
        let option = AdminPaymentOption::Free;

        let booking = build_booking_request(&draft, option.booking_status()).unwrap();
        assert_eq!(booking.status, "Paid");
        assert_eq!(booking.contact_id, "c-1");
        assert_eq!(booking.producto_id, "sala-2");

        let invoice = build_invoice_draft(&draft, &pricing, option.invoice_status()).unwrap();
        assert_eq!(invoice.status, "Pagado");
        assert_eq!(invoice.lines.len(), 1);
        assert_eq!(invoice.lines[0].price, pricing.subtotal);
        assert_eq!(invoice.lines[0].quantity, 1.0);
        assert_eq!(invoice.total, pricing.grand_total);
    }

    #[test]
    fn test_booking_request_requires_contact_with_id() {
        let mut draft = admin_draft();
        draft.contact = Some(DraftContact::Manual(ContactForm::default()));
        assert!(build_booking_request(&draft, "Paid").is_err());

        draft.contact = None;
        assert!(build_booking_request(&draft, "Paid").is_err());
    }

    #[test]
    fn test_invoice_carries_recurrence_quantity() {
        let mut draft = admin_draft();
        draft.date_from = "2024-06-03".into();
        draft.date_to = "2024-06-09".into();
        draft.weekdays = ["monday", "wednesday", "friday"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let pricing = compute_pricing(&draft);
        let invoice = build_invoice_draft(&draft, &pricing, "Pendiente").unwrap();
        assert_eq!(invoice.lines[0].quantity, 3.0);
        assert_eq!(invoice.total, pricing.grand_total);
    }

    #[test]
    fn test_public_request_requires_valid_manual_contact() {
        let mut draft = admin_draft();
        // An admin-selected contact is not acceptable for the public flow.
        assert!(build_public_booking_request(&draft, None).is_err());

        draft.contact = Some(DraftContact::Manual(ContactForm {
            first_name: "Ana".into(),
            last_name: "García".into(),
            email: "ana@beworking.es".into(),
            phone: "600111222".into(),
            ..Default::default()
        }));
        let req = build_public_booking_request(&draft, Some("pi_1".into())).unwrap();
        assert_eq!(req.payment_intent_id.as_deref(), Some("pi_1"));
        assert_eq!(req.producto_nombre, "Sala 2");
    }
}
