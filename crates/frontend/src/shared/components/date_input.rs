use leptos::prelude::*;

/// DateInput component with native date picker
/// Browser displays dates in locale format; the value stays yyyy-mm-dd
#[component]
pub fn DateInput(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// The date value in yyyy-mm-dd format
    #[prop(into)]
    value: Signal<String>,
    /// Callback when the date changes (receives yyyy-mm-dd format)
    on_change: impl Fn(String) + 'static,
    /// ID for the input element
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let input_id = move || id.get().unwrap_or_default();

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=input_id>
                    {l}
                </label>
            })}
            <input
                id=input_id
                type="date"
                class="form__input"
                prop:value=value
                on:input=move |ev| {
                    on_change(event_target_value(&ev));
                }
            />
        </div>
    }
}
