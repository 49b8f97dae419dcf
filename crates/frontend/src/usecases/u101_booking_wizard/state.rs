use chrono::NaiveDate;
use contracts::domain::a001_centro::Centro;
use contracts::domain::a002_producto::Producto;
use contracts::domain::a003_contacto::{ContactForm, ContactSummary};
use leptos::prelude::*;
use std::collections::BTreeSet;

/// Index of the last wizard step (0 = details, 1 = contact, 2 = payment).
pub const LAST_STEP: usize = 2;

/// Who is driving the wizard. Decides the contact step behavior and the
/// whole payment step branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    Admin,
    EndUser,
}

/// The contact attached to the draft: either picked from the admin search
/// or entered manually by an end user.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftContact {
    Seleccionado(ContactSummary),
    Manual(ContactForm),
}

impl DraftContact {
    /// Backend contact id; manual contacts have none until submission.
    pub fn id(&self) -> Option<&str> {
        match self {
            DraftContact::Seleccionado(c) => Some(c.id.as_str()),
            DraftContact::Manual(_) => None,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            DraftContact::Seleccionado(c) => &c.email,
            DraftContact::Manual(f) => &f.email,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            DraftContact::Seleccionado(c) => c.name.clone(),
            DraftContact::Manual(f) => f.full_name(),
        }
    }

    /// Tax id used for the reverse-charge VAT rule.
    pub fn tax_id(&self) -> Option<&str> {
        match self {
            DraftContact::Seleccionado(c) => c.billing_tax_id.as_deref(),
            DraftContact::Manual(f) => {
                let t = f.tax_id.trim();
                (!t.is_empty()).then_some(t)
            }
        }
    }
}

/// The booking draft. One mutable record per wizard instance, never
/// persisted until submission; `reset` replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub centro: Option<Centro>,
    pub producto: Option<Producto>,
    pub user_type: String,
    pub reservation_type: String,
    /// ISO dates `YYYY-MM-DD`; `date_from <= date_to` is enforced before
    /// leaving step 0.
    pub date_from: String,
    pub date_to: String,
    /// 24-hour `HH:MM`.
    pub start_time: String,
    pub end_time: String,
    /// Weekday tokens (`monday`..`sunday`), only read by pricing when the
    /// reservation recurs.
    pub weekdays: BTreeSet<String>,
    pub open_ended: bool,
    /// Numeric string or empty.
    pub attendees: String,
    pub configuracion: String,
    pub note: String,
    pub contact: Option<DraftContact>,
    /// Transient admin search-box text.
    pub contact_input_value: String,
    /// Manual hourly rate override, numeric string.
    pub tarifa: String,
    /// Overrides `producto.price_from` for pricing when non-empty.
    pub custom_price: String,
    pub status: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            centro: None,
            producto: None,
            user_type: "Usuario Aulas".to_string(),
            reservation_type: "Por Horas".to_string(),
            date_from: String::new(),
            date_to: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            weekdays: BTreeSet::new(),
            open_ended: false,
            attendees: String::new(),
            configuracion: String::new(),
            note: String::new(),
            contact: None,
            contact_input_value: String::new(),
            tarifa: String::new(),
            custom_price: String::new(),
            status: "Booked".to_string(),
        }
    }
}

impl BookingDraft {
    /// Fresh draft, optionally seeded with a default date for both ends of
    /// the range.
    pub fn with_default_date(default_date: Option<NaiveDate>) -> Self {
        let mut draft = Self::default();
        if let Some(date) = default_date {
            let iso = date.format("%Y-%m-%d").to_string();
            draft.date_from = iso.clone();
            draft.date_to = iso;
        }
        draft
    }

    /// Parsed attendee count; empty or non-numeric input means none.
    pub fn attendees_count(&self) -> Option<u32> {
        self.attendees.trim().parse().ok()
    }

    /// Manual rate override; empty or non-numeric means none.
    pub fn tarifa_value(&self) -> Option<f64> {
        self.tarifa.trim().parse().ok()
    }
}

pub fn clamp_step(step: usize) -> usize {
    step.min(LAST_STEP)
}

/// Shared wizard state: the draft plus the step cursor. A `Copy` bundle of
/// signals provided via context to one wizard instance, so step components
/// reach it without prop drilling. All mutation goes through these methods.
#[derive(Clone, Copy)]
pub struct BookingWizardStore {
    pub draft: RwSignal<BookingDraft>,
    pub active_step: RwSignal<usize>,
}

impl BookingWizardStore {
    pub fn new(default_date: Option<NaiveDate>) -> Self {
        Self {
            draft: RwSignal::new(BookingDraft::with_default_date(default_date)),
            active_step: RwSignal::new(0),
        }
    }

    /// Register this store with the current reactive owner.
    pub fn provide(self) {
        provide_context(self);
    }

    /// Store of the enclosing wizard instance.
    pub fn use_store() -> Self {
        expect_context::<Self>()
    }

    /// Single mutation entry point; covers both one-field and batched
    /// updates (the closure may touch any number of fields).
    pub fn set(&self, f: impl FnOnce(&mut BookingDraft)) {
        self.draft.update(f);
    }

    /// No-op at the upper bound.
    pub fn next_step(&self) {
        self.active_step.update(|s| *s = clamp_step(*s + 1));
    }

    /// No-op at the lower bound.
    pub fn prev_step(&self) {
        self.active_step.update(|s| *s = s.saturating_sub(1));
    }

    pub fn go_to_step(&self, step: usize) {
        self.active_step.set(clamp_step(step));
    }

    /// Discard the whole draft and return to step 0. The only way fields
    /// change outside `set`.
    pub fn reset(&self, default_date: Option<NaiveDate>) {
        self.draft.set(BookingDraft::with_default_date(default_date));
        self.active_step.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let draft = BookingDraft::default();
        assert_eq!(draft.user_type, "Usuario Aulas");
        assert_eq!(draft.reservation_type, "Por Horas");
        assert_eq!(draft.status, "Booked");
        assert!(draft.contact.is_none());
        assert!(draft.weekdays.is_empty());
        assert!(!draft.open_ended);
    }

    #[test]
    fn test_default_date_seeds_both_ends() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let draft = BookingDraft::with_default_date(Some(date));
        assert_eq!(draft.date_from, "2024-07-01");
        assert_eq!(draft.date_to, "2024-07-01");
    }

    #[test]
    fn test_clamp_step() {
        assert_eq!(clamp_step(0), 0);
        assert_eq!(clamp_step(2), 2);
        assert_eq!(clamp_step(3), 2);
        assert_eq!(clamp_step(99), 2);
    }

    #[test]
    fn test_attendees_and_tarifa_parsing() {
        let mut draft = BookingDraft::default();
        assert_eq!(draft.attendees_count(), None);
        draft.attendees = "4".into();
        assert_eq!(draft.attendees_count(), Some(4));
        draft.attendees = "cuatro".into();
        assert_eq!(draft.attendees_count(), None);

        draft.tarifa = "12.5".into();
        assert_eq!(draft.tarifa_value(), Some(12.5));
        draft.tarifa = "".into();
        assert_eq!(draft.tarifa_value(), None);
    }

    #[test]
    fn test_manual_contact_tax_id_blank_is_none() {
        let contact = DraftContact::Manual(ContactForm {
            first_name: "Ana".into(),
            last_name: "García".into(),
            email: "ana@beworking.es".into(),
            phone: "600111222".into(),
            tax_id: "  ".into(),
            ..Default::default()
        });
        assert_eq!(contact.tax_id(), None);
        assert_eq!(contact.id(), None);
        assert_eq!(contact.display_name(), "Ana García");
    }
}
