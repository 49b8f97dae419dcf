use crate::shared::components::ui::Input;
use contracts::domain::a003_contacto::{ContactForm, ContactFormErrors};
use leptos::prelude::*;

/// Manual contact entry (end-user mode). Field errors come from the parent
/// so they only appear once advancement was attempted.
#[component]
pub fn ManualContactForm(
    form: RwSignal<ContactForm>,
    #[prop(into)] errors: Signal<ContactFormErrors>,
) -> impl IntoView {
    view! {
        <div class="contact-form">
            <div class="contact-form__row">
                <Input
                    label="Nombre"
                    value=Signal::derive(move || form.get().first_name)
                    on_input=Callback::new(move |v: String| form.update(|f| f.first_name = v))
                    error=Signal::derive(move || errors.get().first_name.map(String::from))
                />
                <Input
                    label="Apellidos"
                    value=Signal::derive(move || form.get().last_name)
                    on_input=Callback::new(move |v: String| form.update(|f| f.last_name = v))
                    error=Signal::derive(move || errors.get().last_name.map(String::from))
                />
            </div>
            <div class="contact-form__row">
                <Input
                    label="Email"
                    input_type="email"
                    value=Signal::derive(move || form.get().email)
                    on_input=Callback::new(move |v: String| form.update(|f| f.email = v))
                    error=Signal::derive(move || errors.get().email.map(String::from))
                />
                <Input
                    label="Teléfono"
                    value=Signal::derive(move || form.get().phone)
                    on_input=Callback::new(move |v: String| form.update(|f| f.phone = v))
                    error=Signal::derive(move || errors.get().phone.map(String::from))
                />
            </div>
            <div class="contact-form__row">
                <Input
                    label="Empresa"
                    value=Signal::derive(move || form.get().company)
                    on_input=Callback::new(move |v: String| form.update(|f| f.company = v))
                />
                <Input
                    label="NIF / CIF"
                    value=Signal::derive(move || form.get().tax_id)
                    on_input=Callback::new(move |v: String| form.update(|f| f.tax_id = v))
                />
            </div>
            <Input
                label="Dirección de facturación (opcional)"
                value=Signal::derive(move || form.get().billing_address)
                on_input=Callback::new(move |v: String| form.update(|f| f.billing_address = v))
            />
        </div>
    }
}
