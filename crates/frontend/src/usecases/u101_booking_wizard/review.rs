use super::pricing::compute_pricing;
use super::state::BookingWizardStore;
use leptos::prelude::*;

/// Read-only reservation summary shared by the contact and payment steps.
/// Pricing is derived on every render, never stored.
#[component]
pub fn ReviewPanel() -> impl IntoView {
    let store = BookingWizardStore::use_store();
    let pricing = Memo::new(move |_| compute_pricing(&store.draft.get()));

    view! {
        <div class="review-panel">
            <div class="review-panel__label">{move || pricing.get().label}</div>

            {move || {
                let draft = store.draft.get();
                (!draft.weekdays.is_empty() && draft.date_from != draft.date_to).then(|| {
                    let days = draft.weekdays.iter().cloned().collect::<Vec<_>>().join(", ");
                    view! { <div class="review-panel__recurrence">{format!("Se repite: {}", days)}</div> }
                })
            }}

            {move || {
                store.draft.get().contact.map(|c| {
                    view! { <div class="review-panel__contact">{c.display_name()}</div> }
                })
            }}

            <div class="review-panel__row">
                <span>"Subtotal"</span>
                <span>{move || format!("{:.2} €", pricing.get().subtotal)}</span>
            </div>
            <div class="review-panel__row">
                <span>{move || format!("IVA ({:.0}%)", pricing.get().vat_rate * 100.0)}</span>
                <span>{move || format!("{:.2} €", pricing.get().vat)}</span>
            </div>
            {move || {
                (pricing.get().vat_rate == 0.0).then(|| view! {
                    <div class="review-panel__note">"Inversión del sujeto pasivo — IVA 0%"</div>
                })
            }}
            <div class="review-panel__row review-panel__row--total">
                <span>"Total"</span>
                <span>{move || format!("{:.2} €", pricing.get().total)}</span>
            </div>
            {move || {
                let p = pricing.get();
                (p.booking_count > 1).then(|| view! {
                    <div class="review-panel__row review-panel__row--grand">
                        <span>{format!("Total ({} reservas)", p.booking_count)}</span>
                        <span>{format!("{:.2} €", p.grand_total)}</span>
                    </div>
                })
            }}
        </div>
    }
}
