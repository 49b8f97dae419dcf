//! Slot and time-string utilities for the availability grid
//!
//! All functions are pure. Times are 24-hour `HH:MM` strings, bloqueo
//! datetimes are local-time ISO strings sliced naively (no timezone
//! conversion, matching what the backend sends).

use contracts::domain::a004_bloqueo::Bloqueo;

/// Grid granularity in minutes.
pub const SLOT_MINUTES: i32 = 30;

/// Default grid range when no bloqueos inform a wider one.
pub const DEFAULT_START_HOUR: i32 = 6;
pub const DEFAULT_END_HOUR: i32 = 22;

/// Parse `HH:MM` into minutes since midnight. `None` on anything that is
/// not two numeric parts separated by a colon.
pub fn time_to_minutes(s: &str) -> Option<i32> {
    let (h, m) = s.split_once(':')?;
    let h: i32 = h.trim().parse().ok()?;
    let m: i32 = m.trim().parse().ok()?;
    if h < 0 || m < 0 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Format minutes since midnight as `HH:MM`. 1440 renders as `24:00`.
pub fn minutes_to_time(total: i32) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Add minutes to an `HH:MM` time, clamping the result to `[00:00, 24:00]`.
/// Malformed input is returned unchanged.
pub fn add_minutes(time: &str, delta: i32) -> String {
    match time_to_minutes(time) {
        Some(t) => minutes_to_time((t + delta).clamp(0, 24 * 60)),
        None => time.to_string(),
    }
}

/// Ordered 30-minute slot labels from `start_hour*60` to `end_hour*60`,
/// both ends included.
pub fn build_time_slots(start_hour: i32, end_hour: i32) -> Vec<String> {
    let mut slots = Vec::new();
    let mut t = start_hour * 60;
    while t <= end_hour * 60 {
        slots.push(minutes_to_time(t));
        t += SLOT_MINUTES;
    }
    slots
}

/// Slot labels widened to cover every bloqueo of the day, clamped to
/// `[00:00, 23:30]`. Falls back to the default 6–22 range when there are
/// no records or none with parseable times.
pub fn build_time_slots_from_bloqueos(bloqueos: &[Bloqueo]) -> Vec<String> {
    let mut earliest: Option<i32> = None;
    let mut latest: Option<i32> = None;
    for b in bloqueos {
        if let Some(start) = extract_time(&b.fecha_ini).and_then(time_to_minutes) {
            earliest = Some(earliest.map_or(start, |e| e.min(start)));
        }
        if let Some(end) = extract_time(&b.fecha_fin).and_then(time_to_minutes) {
            latest = Some(latest.map_or(end, |l| l.max(end)));
        }
    }

    let default_start = DEFAULT_START_HOUR * 60;
    let default_end = DEFAULT_END_HOUR * 60;
    let (Some(earliest), Some(latest)) = (earliest, latest) else {
        return build_time_slots(DEFAULT_START_HOUR, DEFAULT_END_HOUR);
    };

    // Align to the grid and clamp to the last renderable slot of the day.
    let max_slot = 23 * 60 + 30;
    let start = (earliest / SLOT_MINUTES * SLOT_MINUTES)
        .min(default_start)
        .clamp(0, max_slot);
    let end = (((latest + SLOT_MINUTES - 1) / SLOT_MINUTES) * SLOT_MINUTES)
        .max(default_end)
        .clamp(0, max_slot);

    let mut slots = Vec::new();
    let mut t = start;
    while t <= end {
        slots.push(minutes_to_time(t));
        t += SLOT_MINUTES;
    }
    slots
}

/// Pull `HH:MM` out of a local-time ISO datetime (`YYYY-MM-DDTHH:MM…`)
/// by position. No timezone handling on purpose.
pub fn extract_time(iso: &str) -> Option<&str> {
    iso.get(11..16)
}

/// True iff the slot's minute value falls in `[start, end)` of the record.
pub fn bloqueo_covers_slot(bloqueo: &Bloqueo, slot: &str) -> bool {
    let Some(slot_min) = time_to_minutes(slot) else {
        return false;
    };
    let start = extract_time(&bloqueo.fecha_ini).and_then(time_to_minutes);
    let end = extract_time(&bloqueo.fecha_fin).and_then(time_to_minutes);
    match (start, end) {
        (Some(start), Some(end)) => slot_min >= start && slot_min < end,
        _ => false,
    }
}

/// Resolved status of one grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Available,
    Paid,
    Invoiced,
    /// Booked but not yet invoiced or paid. Also the fallback for any
    /// status string the table below does not know.
    Created,
}

impl SlotStatus {
    pub fn css_class(&self) -> &'static str {
        match self {
            SlotStatus::Available => "slot--available",
            SlotStatus::Paid => "slot--paid",
            SlotStatus::Invoiced => "slot--invoiced",
            SlotStatus::Created => "slot--created",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotStatus::Available => "Disponible",
            SlotStatus::Paid => "Pagado",
            SlotStatus::Invoiced => "Facturado",
            SlotStatus::Created => "Reservado",
        }
    }
}

/// Classify a free-text backend status by case-insensitive substring:
///
/// | substring            | status   |
/// |----------------------|----------|
/// | `pag` / `paid`       | Paid     |
/// | `fact` / `invoice`   | Invoiced |
/// | anything else        | Created  |
///
/// The token table is Spanish-first with English synonyms. Unknown
/// statuses degrade to `Created` styling rather than failing.
pub fn map_status_key(estado: &str) -> SlotStatus {
    let lower = estado.to_lowercase();
    if lower.contains("pag") || lower.contains("paid") {
        SlotStatus::Paid
    } else if lower.contains("fact") || lower.contains("invoice") {
        SlotStatus::Invoiced
    } else {
        SlotStatus::Created
    }
}

/// Human-readable tooltip for an occupying bloqueo: client, centro,
/// producto and time range, absent fields skipped.
pub fn describe_bloqueo(bloqueo: &Bloqueo) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(cliente) = bloqueo.cliente.as_deref().filter(|s| !s.is_empty()) {
        parts.push(cliente.to_string());
    }
    if let Some(centro) = bloqueo.centro.as_deref().filter(|s| !s.is_empty()) {
        parts.push(centro.to_string());
    }
    if let Some(producto) = bloqueo.producto.as_deref().filter(|s| !s.is_empty()) {
        parts.push(producto.to_string());
    }
    if let (Some(start), Some(end)) = (
        extract_time(&bloqueo.fecha_ini),
        extract_time(&bloqueo.fecha_fin),
    ) {
        parts.push(format!("{}–{}", start, end));
    }
    parts.join(" · ")
}

/// Up-to-two-letter initials for grid cells ("Ana García" -> "AG").
pub fn client_initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bloqueo(ini: &str, fin: &str, estado: &str) -> Bloqueo {
        Bloqueo {
            fecha_ini: ini.to_string(),
            fecha_fin: fin.to_string(),
            estado: estado.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_time_to_minutes() {
        assert_eq!(time_to_minutes("09:00"), Some(540));
        assert_eq!(time_to_minutes("00:00"), Some(0));
        assert_eq!(time_to_minutes("23:30"), Some(1410));
        assert_eq!(time_to_minutes("9"), None);
        assert_eq!(time_to_minutes("ab:cd"), None);
        assert_eq!(time_to_minutes("10:xx"), None);
        assert_eq!(time_to_minutes(""), None);
        assert_eq!(time_to_minutes("10:75"), None);
    }

    #[test]
    fn test_add_minutes_clamps() {
        assert_eq!(add_minutes("09:00", 60), "10:00");
        assert_eq!(add_minutes("23:45", 60), "24:00");
        assert_eq!(add_minutes("00:15", -60), "00:00");
        assert_eq!(add_minutes("bogus", 60), "bogus");
    }

    #[test]
    fn test_build_time_slots_default_range() {
        let slots = build_time_slots(6, 22);
        assert_eq!(slots.first().map(String::as_str), Some("06:00"));
        assert_eq!(slots.last().map(String::as_str), Some("22:00"));
        assert_eq!(slots.len(), 33);
    }

    #[test]
    fn test_slots_from_empty_bloqueos_match_default() {
        assert_eq!(build_time_slots_from_bloqueos(&[]), build_time_slots(6, 22));
    }

    #[test]
    fn test_slots_widen_to_cover_bloqueos() {
        let records = vec![bloqueo(
            "2024-07-01T05:00:00",
            "2024-07-01T23:00:00",
            "Booked",
        )];
        let slots = build_time_slots_from_bloqueos(&records);
        assert_eq!(slots.first().map(String::as_str), Some("05:00"));
        assert_eq!(slots.last().map(String::as_str), Some("23:00"));
    }

    #[test]
    fn test_slots_clamped_to_last_of_day() {
        let records = vec![bloqueo(
            "2024-07-01T00:00:00",
            "2024-07-01T23:59:00",
            "Booked",
        )];
        let slots = build_time_slots_from_bloqueos(&records);
        assert_eq!(slots.first().map(String::as_str), Some("00:00"));
        assert_eq!(slots.last().map(String::as_str), Some("23:30"));
    }

    #[test]
    fn test_slots_fall_back_on_unparseable_times() {
        let records = vec![bloqueo("mañana", "tarde", "Booked")];
        assert_eq!(
            build_time_slots_from_bloqueos(&records),
            build_time_slots(6, 22)
        );
    }

    #[test]
    fn test_bloqueo_covers_slot_half_open() {
        let b = bloqueo("2024-07-01T10:00:00", "2024-07-01T11:00:00", "Booked");
        assert!(bloqueo_covers_slot(&b, "10:00"));
        assert!(bloqueo_covers_slot(&b, "10:30"));
        assert!(!bloqueo_covers_slot(&b, "11:00"));
        assert!(!bloqueo_covers_slot(&b, "09:30"));
    }

    #[test]
    fn test_map_status_key() {
        assert_eq!(map_status_key("Pagado"), SlotStatus::Paid);
        assert_eq!(map_status_key("PAID"), SlotStatus::Paid);
        assert_eq!(map_status_key("Facturado"), SlotStatus::Invoiced);
        assert_eq!(map_status_key("invoiced"), SlotStatus::Invoiced);
        assert_eq!(map_status_key("Created"), SlotStatus::Created);
        assert_eq!(map_status_key("algo nuevo"), SlotStatus::Created);
        assert_eq!(map_status_key(""), SlotStatus::Created);
    }

    #[test]
    fn test_describe_bloqueo_skips_absent_fields() {
        let mut b = bloqueo("2024-07-01T10:00:00", "2024-07-01T11:30:00", "Booked");
        b.cliente = Some("Ana García".into());
        b.producto = Some("Sala 2".into());
        assert_eq!(describe_bloqueo(&b), "Ana García · Sala 2 · 10:00–11:30");

        let plain = bloqueo("2024-07-01T10:00:00", "2024-07-01T11:00:00", "Booked");
        assert_eq!(describe_bloqueo(&plain), "10:00–11:00");
    }

    #[test]
    fn test_client_initials() {
        assert_eq!(client_initials("Ana García"), "AG");
        assert_eq!(client_initials("beworking"), "B");
        assert_eq!(client_initials(""), "");
    }
}
