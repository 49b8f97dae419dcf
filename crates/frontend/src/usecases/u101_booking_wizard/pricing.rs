//! Pricing/review computation for the booking draft.
//!
//! Pure and recomputed on every render; nothing here is stored. All money
//! is EUR, rounded to cents per booking before the recurrence multiplier
//! is applied (drift across recurrences is accepted).

use super::state::BookingDraft;
use crate::shared::time_utils::time_to_minutes;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// Spanish standard VAT.
pub const DEFAULT_VAT_RATE: f64 = 0.21;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pricing {
    /// Per-booking price before VAT.
    pub subtotal: f64,
    pub vat: f64,
    /// Per-booking total.
    pub total: f64,
    /// `total * booking_count`.
    pub grand_total: f64,
    /// Number of recurring bookings in the date range, at least 1.
    pub booking_count: u32,
    pub vat_rate: f64,
    /// Human-readable line description for review and invoicing.
    pub label: String,
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// 0% for intra-EU reverse charge: a tax id starting with a two-letter
/// country prefix other than `ES`. Everything else (including no tax id)
/// pays the Spanish rate.
pub fn vat_rate_for(tax_id: Option<&str>) -> f64 {
    let Some(tax_id) = tax_id else {
        return DEFAULT_VAT_RATE;
    };
    let prefix: Vec<char> = tax_id.chars().take(2).collect();
    let is_country_code = prefix.len() == 2 && prefix.iter().all(|c| c.is_ascii_alphabetic());
    if is_country_code {
        let code: String = prefix.iter().collect::<String>().to_ascii_uppercase();
        if code != "ES" {
            return 0.0;
        }
    }
    DEFAULT_VAT_RATE
}

fn weekday_token(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Count of calendar days in `[date_from, date_to]` whose weekday is in
/// the selected set, at least 1. Recurrence never applies to single-day
/// ranges or an empty selection.
pub fn booking_count(date_from: &str, date_to: &str, weekdays: &BTreeSet<String>) -> u32 {
    if weekdays.is_empty() || date_from == date_to {
        return 1;
    }
    let (Ok(from), Ok(to)) = (
        NaiveDate::parse_from_str(date_from, "%Y-%m-%d"),
        NaiveDate::parse_from_str(date_to, "%Y-%m-%d"),
    ) else {
        return 1;
    };
    if from > to {
        return 1;
    }

    let mut count = 0u32;
    let mut day = from;
    while day <= to {
        if weekdays.contains(weekday_token(day.weekday())) {
            count += 1;
        }
        day += Duration::days(1);
    }
    count.max(1)
}

/// `custom_price` when set and non-empty, else the product list price.
/// Zero, negative and unparseable values resolve to nothing, which zeroes
/// the whole computation.
fn unit_price(draft: &BookingDraft) -> Option<f64> {
    let custom = draft.custom_price.trim();
    let raw = if !custom.is_empty() {
        custom.parse::<f64>().ok()
    } else {
        draft.producto.as_ref().and_then(|p| p.price_from)
    };
    raw.filter(|p| *p > 0.0)
}

/// Duration in hours; `None` when either time is unparseable or the range
/// is empty or inverted, so no negative or zero-duration price surfaces.
fn duration_hours(draft: &BookingDraft) -> Option<f64> {
    let start = time_to_minutes(&draft.start_time)?;
    let end = time_to_minutes(&draft.end_time)?;
    if end <= start {
        return None;
    }
    Some(f64::from(end - start) / 60.0)
}

fn build_label(draft: &BookingDraft) -> String {
    let producto = draft
        .producto
        .as_ref()
        .map(|p| p.nombre.as_str())
        .unwrap_or("Reserva");
    format!(
        "{} · {} {}–{}",
        producto, draft.date_from, draft.start_time, draft.end_time
    )
}

pub fn compute_pricing(draft: &BookingDraft) -> Pricing {
    let vat_rate = vat_rate_for(draft.contact.as_ref().and_then(|c| c.tax_id()));
    let label = build_label(draft);

    let (Some(price), Some(hours)) = (unit_price(draft), duration_hours(draft)) else {
        return Pricing {
            vat_rate,
            booking_count: 1,
            label,
            ..Default::default()
        };
    };

    let subtotal = hours * price;
    let vat = round2(subtotal * vat_rate);
    let total = round2(subtotal + vat);
    let count = booking_count(&draft.date_from, &draft.date_to, &draft.weekdays);
    let grand_total = round2(total * f64::from(count));

    Pricing {
        subtotal,
        vat,
        total,
        grand_total,
        booking_count: count,
        vat_rate,
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_producto::Producto;
    use contracts::domain::a003_contacto::ContactSummary;
    use crate::usecases::u101_booking_wizard::state::DraftContact;

    fn producto(price_from: Option<f64>) -> Producto {
        Producto {
            id: "sala-2".into(),
            nombre: "Sala 2".into(),
            centro_id: "centro-1".into(),
            tipo: Default::default(),
            price_from,
            capacity: Some(8),
        }
    }

    fn contact_with_tax_id(tax_id: &str) -> DraftContact {
        DraftContact::Seleccionado(ContactSummary {
            id: "c-1".into(),
            name: "Ana García".into(),
            email: "ana@beworking.es".into(),
            phone: None,
            company: None,
            billing_tax_id: (!tax_id.is_empty()).then(|| tax_id.to_string()),
        })
    }

    fn draft() -> BookingDraft {
        let mut d = BookingDraft::default();
        d.producto = Some(producto(Some(20.0)));
        d.date_from = "2024-07-01".into();
        d.date_to = "2024-07-01".into();
        d.start_time = "10:00".into();
        d.end_time = "11:00".into();
        d
    }

    #[test]
    fn test_basic_hourly_pricing() {
        let p = compute_pricing(&draft());
        assert_eq!(p.subtotal, 20.0);
        assert_eq!(p.vat, 4.2);
        assert_eq!(p.total, 24.2);
        assert_eq!(p.grand_total, 24.2);
        assert_eq!(p.booking_count, 1);
        assert_eq!(p.vat_rate, DEFAULT_VAT_RATE);
    }

    #[test]
    fn test_zero_or_inverted_duration_zeroes_everything() {
        let mut d = draft();
        d.end_time = "10:00".into();
        let p = compute_pricing(&d);
        assert_eq!((p.subtotal, p.vat, p.total, p.grand_total), (0.0, 0.0, 0.0, 0.0));

        d.end_time = "09:00".into();
        let p = compute_pricing(&d);
        assert_eq!(p.total, 0.0);

        d.end_time = "xx:yy".into();
        let p = compute_pricing(&d);
        assert_eq!(p.total, 0.0);
    }

    #[test]
    fn test_unresolved_price_zeroes_everything() {
        let mut d = draft();
        d.producto = Some(producto(None));
        assert_eq!(compute_pricing(&d).total, 0.0);

        d.producto = Some(producto(Some(0.0)));
        assert_eq!(compute_pricing(&d).total, 0.0);
    }

    #[test]
    fn test_custom_price_overrides_list_price() {
        let mut d = draft();
        d.custom_price = "15".into();
        let p = compute_pricing(&d);
        assert_eq!(p.subtotal, 15.0);
    }

    #[test]
    fn test_reverse_charge_vat() {
        let mut d = draft();
        d.contact = Some(contact_with_tax_id("DE123456789"));
        assert_eq!(compute_pricing(&d).vat_rate, 0.0);

        d.contact = Some(contact_with_tax_id("ES123456789"));
        assert_eq!(compute_pricing(&d).vat_rate, DEFAULT_VAT_RATE);

        d.contact = Some(contact_with_tax_id(""));
        assert_eq!(compute_pricing(&d).vat_rate, DEFAULT_VAT_RATE);

        // numeric prefix is not a country code
        d.contact = Some(contact_with_tax_id("12345678Z"));
        assert_eq!(compute_pricing(&d).vat_rate, DEFAULT_VAT_RATE);
    }

    #[test]
    fn test_single_day_never_recurs() {
        let weekdays: BTreeSet<String> =
            ["monday", "tuesday"].iter().map(|s| s.to_string()).collect();
        assert_eq!(booking_count("2024-07-01", "2024-07-01", &weekdays), 1);
    }

    #[test]
    fn test_weekday_count_over_one_week() {
        // 2024-06-03 is a Monday, 2024-06-09 a Sunday.
        let weekdays: BTreeSet<String> = ["monday", "wednesday", "friday"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(booking_count("2024-06-03", "2024-06-09", &weekdays), 3);
    }

    #[test]
    fn test_empty_weekdays_with_range_is_single_booking() {
        assert_eq!(booking_count("2024-06-03", "2024-06-09", &BTreeSet::new()), 1);
    }

    #[test]
    fn test_no_matching_weekday_still_counts_one() {
        let weekdays: BTreeSet<String> = ["sunday"].iter().map(|s| s.to_string()).collect();
        // Mon..Fri range contains no Sunday.
        assert_eq!(booking_count("2024-06-03", "2024-06-07", &weekdays), 1);
    }

    #[test]
    fn test_recurrence_rounds_per_booking_before_multiplying() {
        let mut d = draft();
        d.custom_price = "10.01".into();
        d.date_from = "2024-06-03".into();
        d.date_to = "2024-06-09".into();
        d.weekdays = ["monday", "wednesday", "friday"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let p = compute_pricing(&d);
        assert_eq!(p.booking_count, 3);
        // per booking: 10.01 subtotal, 2.10 vat (rounded), 12.11 total
        assert_eq!(p.vat, 2.10);
        assert_eq!(p.total, 12.11);
        assert_eq!(p.grand_total, 36.33);
    }
}
