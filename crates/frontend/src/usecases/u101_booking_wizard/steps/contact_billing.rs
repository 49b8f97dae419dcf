//! Step 1: who books. Admin mode searches existing contacts; end-user
//! mode collects the contact form. Both show the reservation summary.

use crate::domain::a003_contacto::ui::{ContactSearchPicker, ManualContactForm};
use crate::shared::components::ui::Button;
use crate::usecases::u101_booking_wizard::review::ReviewPanel;
use crate::usecases::u101_booking_wizard::state::{BookingWizardStore, DraftContact, WizardMode};
use contracts::domain::a003_contacto::{ContactForm, ContactFormErrors, ContactSummary};
use leptos::prelude::*;

#[component]
pub fn ContactBillingStep(mode: WizardMode) -> impl IntoView {
    let store = BookingWizardStore::use_store();

    let body = match mode {
        WizardMode::Admin => view! { <AdminContactSection /> }.into_any(),
        WizardMode::EndUser => view! { <EndUserContactSection /> }.into_any(),
    };

    view! {
        <div class="wizard-step wizard-step--contact">
            <ReviewPanel />
            {body}
            <div class="wizard-step__footer">
                <Button variant="ghost" on_click=Callback::new(move |_| store.prev_step())>
                    "Atrás"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn AdminContactSection() -> impl IntoView {
    let store = BookingWizardStore::use_store();

    let selected = Signal::derive(move || match store.draft.get().contact {
        Some(DraftContact::Seleccionado(c)) => Some(c),
        _ => None,
    });

    // Advancing needs a backend contact id, which only a picked contact has.
    let can_advance = Memo::new(move |_| {
        store
            .draft
            .get()
            .contact
            .as_ref()
            .and_then(|c| c.id().map(str::to_string))
            .is_some()
    });

    view! {
        <div class="contact-section">
            <ContactSearchPicker
                selected=selected
                input_value=Signal::derive(move || store.draft.get().contact_input_value)
                on_input=Callback::new(move |v: String| {
                    store.set(|d| d.contact_input_value = v)
                })
                on_select=Callback::new(move |c: ContactSummary| {
                    store.set(|d| {
                        d.contact_input_value = String::new();
                        d.contact = Some(DraftContact::Seleccionado(c));
                    })
                })
                on_clear=Callback::new(move |_| store.set(|d| d.contact = None))
            />
            <div class="contact-section__footer">
                <Button
                    disabled=Signal::derive(move || !can_advance.get())
                    on_click=Callback::new(move |_| store.next_step())
                >
                    "Continuar"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn EndUserContactSection() -> impl IntoView {
    let store = BookingWizardStore::use_store();

    // The form lives locally and is mirrored into the draft on every edit,
    // so returning to this step restores what was typed.
    let initial = match store.draft.get_untracked().contact {
        Some(DraftContact::Manual(f)) => f,
        _ => ContactForm::default(),
    };
    let form = RwSignal::new(initial);

    Effect::new(move |_| {
        let current = form.get();
        store.set(|d| d.contact = Some(DraftContact::Manual(current)));
    });

    // Field errors only show once the user tried to advance.
    let (attempted, set_attempted) = signal(false);
    let errors = Signal::derive(move || {
        if attempted.get() {
            form.get().validate()
        } else {
            ContactFormErrors::default()
        }
    });

    let handle_next = Callback::new(move |_: leptos::ev::MouseEvent| {
        set_attempted.set(true);
        if form.get_untracked().validate().is_empty() {
            store.next_step();
        }
    });

    view! {
        <div class="contact-section">
            <ManualContactForm form=form errors=errors />
            <div class="contact-section__footer">
                <Button on_click=handle_next>"Continuar"</Button>
            </div>
        </div>
    }
}
