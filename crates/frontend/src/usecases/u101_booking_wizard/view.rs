//! Wizard shell: stepper header, active step body, confirmation panel.

use super::state::{BookingWizardStore, WizardMode};
use super::steps::{ContactBillingStep, PaymentStep, SelectDetailsStep};
use crate::shared::components::ui::Button;
use contracts::domain::a001_centro::Centro;
use contracts::domain::a002_producto::Producto;
use contracts::domain::a005_booking::BookingCreated;
use leptos::prelude::*;

const STEP_TITLES: [&str; 3] = ["Detalles", "Contacto", "Pago"];

/// One booking wizard instance. Owns its store and provides it via context
/// to the steps; the caller only learns about the finished booking through
/// `on_completed`, fired when the user dismisses the confirmation panel.
#[component]
pub fn BookingWizard(
    mode: WizardMode,
    #[prop(optional)] centro: Option<Centro>,
    #[prop(optional)] producto: Option<Producto>,
    #[prop(optional)] on_completed: Option<Callback<BookingCreated>>,
) -> impl IntoView {
    let store = BookingWizardStore::new(Some(chrono::Local::now().date_naive()));
    store.set(|d| {
        d.centro = centro;
        d.producto = producto;
    });
    store.provide();

    // Submission success lands here first; the completion callback fires
    // only when the confirmation is dismissed.
    let (confirmation, set_confirmation) = signal(None::<BookingCreated>);
    let submitted = Callback::new(move |created: BookingCreated| {
        // Fired from async submit handlers; the wizard may be gone by then.
        _ = set_confirmation.try_set(Some(created));
    });
    let dismiss = Callback::new(move |_: leptos::ev::MouseEvent| {
        if let Some(created) = confirmation.get_untracked() {
            if let Some(cb) = on_completed {
                cb.run(created);
            }
        }
    });

    let producto_nombre = Signal::derive(move || {
        store
            .draft
            .get()
            .producto
            .map(|p| p.nombre)
            .unwrap_or_default()
    });

    view! {
        <div class="booking-wizard">
            <div class="booking-wizard__header">
                <h3>{move || producto_nombre.get()}</h3>
                <div class="booking-wizard__stepper">
                    {STEP_TITLES
                        .iter()
                        .enumerate()
                        .map(|(idx, title)| {
                            view! {
                                <div
                                    class=move || {
                                        let active = store.active_step.get();
                                        if idx == active {
                                            "stepper__step stepper__step--active"
                                        } else if idx < active {
                                            "stepper__step stepper__step--done"
                                        } else {
                                            "stepper__step"
                                        }
                                    }
                                    // Completed steps stay reachable; later
                                    // ones only through their gates.
                                    on:click=move |_| {
                                        if idx < store.active_step.get_untracked() {
                                            store.go_to_step(idx);
                                        }
                                    }
                                >
                                    <span class="stepper__index">{(idx + 1).to_string()}</span>
                                    <span class="stepper__title">{*title}</span>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            {move || match confirmation.get() {
                Some(created) => view! {
                    <div class="booking-wizard__confirmation">
                        <div class="alert alert--success">"Reserva confirmada"</div>
                        <div class="booking-wizard__reference">
                            {format!("Referencia: {}", created.id)}
                        </div>
                        <Button on_click=dismiss>"Aceptar"</Button>
                    </div>
                }
                    .into_any(),
                None => match store.active_step.get() {
                    0 => view! { <SelectDetailsStep /> }.into_any(),
                    1 => view! { <ContactBillingStep mode=mode /> }.into_any(),
                    _ => view! { <PaymentStep mode=mode on_completed=submitted /> }.into_any(),
                },
            }}
        </div>
    }
}
