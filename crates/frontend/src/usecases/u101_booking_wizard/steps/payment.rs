//! Step 2: payment and submission. The two modes share nothing beyond the
//! step shell: admin picks one of four settlement options and runs the
//! sequential pipeline; end users go through the free-tier check and,
//! failing that, the hosted payment element.

use crate::shared::components::ui::{Button, Input, Select};
use crate::usecases::u101_booking_wizard::model;
use crate::usecases::u101_booking_wizard::pricing::compute_pricing;
use crate::usecases::u101_booking_wizard::review::ReviewPanel;
use crate::usecases::u101_booking_wizard::state::{BookingWizardStore, WizardMode};
use crate::usecases::u101_booking_wizard::stripe_element;
use crate::usecases::u101_booking_wizard::submit::{submit_admin, submit_public, AdminPaymentOption};
use contracts::billing::{eur_to_minor_units, PaymentIntentRequest, SavedCard};
use contracts::domain::a005_booking::{BookingCreated, FreeBookingStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

const PAYMENT_ELEMENT_ID: &str = "bw-payment-element";
const DEFAULT_DUE_DAYS: u32 = 15;

#[component]
pub fn PaymentStep(
    mode: WizardMode,
    /// Fired with the created booking once submission succeeds.
    on_completed: Callback<BookingCreated>,
) -> impl IntoView {
    let store = BookingWizardStore::use_store();

    let body = match mode {
        WizardMode::Admin => {
            view! { <AdminPaymentSection on_completed=on_completed /> }.into_any()
        }
        WizardMode::EndUser => {
            view! { <EndUserPaymentSection on_completed=on_completed /> }.into_any()
        }
    };

    view! {
        <div class="wizard-step wizard-step--payment">
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
fn AdminPaymentSection(on_completed: Callback<BookingCreated>) -> impl IntoView {
    let store = BookingWizardStore::use_store();

    let (option_key, set_option_key) = signal("free".to_string());
    let (cards, set_cards) = signal(Vec::<SavedCard>::new());
    let (selected_card, set_selected_card) = signal(String::new());
    let (due_days, set_due_days) = signal(DEFAULT_DUE_DAYS.to_string());
    let (error_msg, set_error_msg) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    // Cards on file for the selected contact, fetched once on entry.
    Effect::new(move |_| {
        let Some(email) = store
            .draft
            .get_untracked()
            .contact
            .map(|c| c.email().to_string())
        else {
            return;
        };
        // Signal writes after the await go through `try_set`: the dialog
        // may close before the response arrives.
        spawn_local(async move {
            match model::fetch_saved_cards(&email).await {
                Ok(items) => {
                    if let Some(first) = items.first() {
                        _ = set_selected_card.try_set(first.id.clone());
                    }
                    _ = set_cards.try_set(items);
                }
                Err(e) => log::warn!("saved cards fetch failed: {}", e),
            }
        });
    });

    let handle_submit = Callback::new(move |_: leptos::ev::MouseEvent| {
        let option = match option_key.get_untracked().as_str() {
            "card" => {
                let card_id = selected_card.get_untracked();
                if card_id.is_empty() {
                    set_error_msg.set(Some("No hay ninguna tarjeta guardada".to_string()));
                    return;
                }
                AdminPaymentOption::SavedCard { card_id }
            }
            "hosted" => AdminPaymentOption::HostedInvoice {
                due_days: due_days
                    .get_untracked()
                    .trim()
                    .parse()
                    .unwrap_or(DEFAULT_DUE_DAYS),
            },
            "transfer" => AdminPaymentOption::BankTransfer,
            _ => AdminPaymentOption::Free,
        };

        set_error_msg.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            let draft = store.draft.get_untracked();
            let pricing = compute_pricing(&draft);
            match submit_admin(&draft, &pricing, &option).await {
                Ok(outcome) => on_completed.run(outcome.booking),
                Err(e) => {
                    _ = set_error_msg.try_set(Some(e));
                    _ = set_submitting.try_set(false);
                }
            }
        });
    });

    let option_radio = move |key: &'static str, label: &'static str| {
        view! {
            <label class="payment-option">
                <input
                    type="radio"
                    name="admin-payment-option"
                    prop:checked=move || option_key.get() == key
                    on:change=move |_| set_option_key.set(key.to_string())
                />
                <span>{label}</span>
            </label>
        }
    };

    view! {
        <div class="payment-section">
            {option_radio("free", "Reserva gratuita")}
            {option_radio("card", "Cobrar tarjeta guardada")}
            {move || {
                (option_key.get() == "card").then(|| {
                    let card_options = Signal::derive(move || {
                        cards
                            .get()
                            .iter()
                            .map(|c| (c.id.clone(), c.display_label()))
                            .collect::<Vec<_>>()
                    });
                    view! {
                        <div class="payment-option__detail">
                            {move || {
                                if cards.get().is_empty() {
                                    view! {
                                        <div class="payment-option__empty">
                                            "Este contacto no tiene tarjetas guardadas"
                                        </div>
                                    }
                                        .into_any()
                                } else {
                                    view! {
                                        <Select
                                            label="Tarjeta"
                                            value=Signal::derive(move || selected_card.get())
                                            options=card_options
                                            on_change=Callback::new(move |id: String| {
                                                set_selected_card.set(id)
                                            })
                                        />
                                    }
                                        .into_any()
                                }
                            }}
                        </div>
                    }
                })
            }}
            {option_radio("hosted", "Factura externa")}
            {move || {
                (option_key.get() == "hosted").then(|| view! {
                    <div class="payment-option__detail">
                        <Input
                            label="Días de vencimiento"
                            input_type="number"
                            value=Signal::derive(move || due_days.get())
                            on_input=Callback::new(move |v: String| set_due_days.set(v))
                        />
                    </div>
                })
            }}
            {option_radio("transfer", "Transferencia bancaria")}

            {move || error_msg.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="payment-section__footer">
                <Button
                    disabled=Signal::derive(move || submitting.get())
                    on_click=handle_submit
                >
                    {move || if submitting.get() { "Confirmando…" } else { "Confirmar reserva" }}
                </Button>
            </div>
        </div>
    }
}

#[component]
fn EndUserPaymentSection(on_completed: Callback<BookingCreated>) -> impl IntoView {
    let store = BookingWizardStore::use_store();
    let pricing = Memo::new(move |_| compute_pricing(&store.draft.get()));

    let (eligibility, set_eligibility) = signal(None::<FreeBookingStatus>);
    let (checking, set_checking) = signal(true);
    let (element_ready, set_element_ready) = signal(false);
    let (error_msg, set_error_msg) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    // Free-tier check on entry. A failed check degrades to the paid path.
    Effect::new(move |_| {
        let draft = store.draft.get_untracked();
        let email = draft
            .contact
            .as_ref()
            .map(|c| c.email().to_string())
            .unwrap_or_default();
        let producto_nombre = draft
            .producto
            .as_ref()
            .map(|p| p.nombre.clone())
            .unwrap_or_default();
        spawn_local(async move {
            let status = match model::check_free_booking(&email, &producto_nombre).await {
                Ok(status) => status,
                Err(e) => {
                    log::warn!("free booking check failed: {}", e);
                    FreeBookingStatus {
                        is_free: false,
                        used: 0,
                        free_limit: 0,
                    }
                }
            };
            _ = set_eligibility.try_set(Some(status));
            _ = set_checking.try_set(false);
        });
    });

    // Once the check says "paid", create the intent and mount the element.
    // The guard keeps remounts from creating a second intent.
    let mount_started = StoredValue::new(false);
    Effect::new(move |_| {
        let Some(status) = eligibility.get() else {
            return;
        };
        if status.is_free || mount_started.get_value() {
            return;
        }
        mount_started.set_value(true);

        let draft = store.draft.get_untracked();
        let receipt_email = draft
            .contact
            .as_ref()
            .map(|c| c.email().to_string())
            .unwrap_or_default();
        let amount = eur_to_minor_units(compute_pricing(&draft).grand_total);
        spawn_local(async move {
            let result = async {
                let intent = model::create_payment_intent(&PaymentIntentRequest {
                    amount,
                    currency: "eur".to_string(),
                    receipt_email,
                })
                .await?;
                stripe_element::mount_payment_element(&intent.client_secret, PAYMENT_ELEMENT_ID)
                    .await
            }
            .await;
            match result {
                Ok(()) => _ = set_element_ready.try_set(true),
                Err(e) => _ = set_error_msg.try_set(Some(e)),
            }
        });
    });

    let confirm_free = Callback::new(move |_: leptos::ev::MouseEvent| {
        set_error_msg.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            let draft = store.draft.get_untracked();
            match submit_public(&draft, None).await {
                Ok(created) => on_completed.run(created),
                Err(e) => {
                    _ = set_error_msg.try_set(Some(e));
                    _ = set_submitting.try_set(false);
                }
            }
        });
    });

    // The public request goes out only after the provider confirms.
    let pay_and_book = Callback::new(move |_: leptos::ev::MouseEvent| {
        set_error_msg.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            let draft = store.draft.get_untracked();
            let result = async {
                let intent_id = stripe_element::confirm_payment().await?;
                submit_public(&draft, Some(intent_id)).await
            }
            .await;
            match result {
                Ok(created) => on_completed.run(created),
                Err(e) => {
                    _ = set_error_msg.try_set(Some(e));
                    _ = set_submitting.try_set(false);
                }
            }
        });
    });

    view! {
        <div class="payment-section">
            {move || {
                if checking.get() {
                    return view! {
                        <div class="payment-section__checking">"Comprobando condiciones…"</div>
                    }
                        .into_any();
                }
                match eligibility.get() {
                    Some(status) if status.is_free => view! {
                        <div class="payment-section__free">
                            <div class="alert alert--info">
                                {format!(
                                    "Esta reserva es gratuita ({} de {} usadas)",
                                    status.used, status.free_limit
                                )}
                            </div>
                            <Button
                                disabled=Signal::derive(move || submitting.get())
                                on_click=confirm_free
                            >
                                "Confirmar reserva"
                            </Button>
                        </div>
                    }
                        .into_any(),
                    _ => view! {
                        <div class="payment-section__element">
                            <div id=PAYMENT_ELEMENT_ID class="payment-element"></div>
                            <Button
                                disabled=Signal::derive(move || {
                                    submitting.get() || !element_ready.get()
                                })
                                on_click=pay_and_book
                            >
                                {move || format!("Pagar {:.2} €", pricing.get().grand_total)}
                            </Button>
                        </div>
                    }
                        .into_any(),
                }
            }}

            {move || error_msg.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
        </div>
    }
}
