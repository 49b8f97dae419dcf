use crate::domain::a003_contacto::model;
use crate::shared::components::ui::Button;
use contracts::domain::a003_contacto::ContactSummary;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DEBOUNCE_MS: u32 = 300;
const MIN_QUERY_LEN: usize = 2;

/// Debounced contact search with a dropdown of matches (admin mode).
///
/// A lookup failure degrades to an empty dropdown and a console warning;
/// the search box stays usable.
#[component]
pub fn ContactSearchPicker(
    /// Currently selected contact, if any.
    #[prop(into)]
    selected: Signal<Option<ContactSummary>>,
    /// Transient search-box text (owned by the wizard draft).
    #[prop(into)]
    input_value: Signal<String>,
    /// Fired on every keystroke.
    on_input: Callback<String>,
    /// Fired when a dropdown entry is picked.
    on_select: Callback<ContactSummary>,
    /// Fired when the selection is cleared back to the search box.
    on_clear: Callback<()>,
) -> impl IntoView {
    let (results, set_results) = signal(Vec::<ContactSummary>::new());
    let (dropdown_open, set_dropdown_open) = signal(false);
    let (searching, set_searching) = signal(false);

    // Each keystroke bumps the generation; older debounce timers and
    // in-flight responses see a mismatch and drop their result.
    let search_generation = StoredValue::new(0u64);

    Effect::new(move |_| {
        let query = input_value.get().trim().to_string();
        let generation = search_generation.with_value(|g| g + 1);
        search_generation.set_value(generation);

        if query.len() < MIN_QUERY_LEN {
            set_results.set(vec![]);
            set_dropdown_open.set(false);
            set_searching.set(false);
            return;
        }

        spawn_local(async move {
            TimeoutFuture::new(DEBOUNCE_MS).await;
            // `None` after the await means the picker was unmounted and the
            // counter's owner is disposed; bail without touching signals.
            if search_generation.try_get_value() != Some(generation) {
                return;
            }
            _ = set_searching.try_set(true);
            let result = model::search_contacts(&query).await;
            if search_generation.try_get_value() != Some(generation) {
                return;
            }
            _ = set_searching.try_set(false);
            match result {
                Ok(items) => {
                    _ = set_results.try_set(items);
                    _ = set_dropdown_open.try_set(true);
                }
                Err(e) => {
                    log::warn!("contact search failed: {}", e);
                    _ = set_results.try_set(vec![]);
                    _ = set_dropdown_open.try_set(true);
                }
            }
        });
    });

    view! {
        <div class="contact-picker">
            {move || match selected.get() {
                Some(contact) => {
                    view! {
                        <div class="contact-picker__selected">
                            <div>
                                <div class="contact-picker__name">{contact.name.clone()}</div>
                                <div class="contact-picker__email">{contact.email.clone()}</div>
                            </div>
                            <Button
                                variant="ghost"
                                size="sm"
                                on_click=Callback::new(move |_| on_clear.run(()))
                            >
                                "Cambiar"
                            </Button>
                        </div>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <div class="contact-picker__search">
                            <input
                                type="text"
                                class="form__input"
                                placeholder="Buscar contacto por nombre o email…"
                                prop:value=move || input_value.get()
                                on:input=move |ev| on_input.run(event_target_value(&ev))
                            />
                            {move || searching.get().then(|| view! {
                                <div class="contact-picker__hint">"Buscando…"</div>
                            })}
                            {move || {
                                if !dropdown_open.get() || searching.get() {
                                    return None;
                                }
                                let items = results.get();
                                Some(view! {
                                    <ul class="contact-picker__dropdown">
                                        {if items.is_empty() {
                                            view! {
                                                <li class="contact-picker__empty">"Sin resultados"</li>
                                            }
                                                .into_any()
                                        } else {
                                            items
                                                .into_iter()
                                                .map(|contact| {
                                                    let label = contact.name.clone();
                                                    let email = contact.email.clone();
                                                    view! {
                                                        <li
                                                            class="contact-picker__item"
                                                            on:click=move |_| {
                                                                set_dropdown_open.set(false);
                                                                on_select.run(contact.clone());
                                                            }
                                                        >
                                                            <span>{label}</span>
                                                            <span class="contact-picker__email">{email}</span>
                                                        </li>
                                                    }
                                                })
                                                .collect_view()
                                                .into_any()
                                        }}
                                    </ul>
                                })
                            }}
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
