use crate::domain::a002_producto::ui::CatalogPage;
use crate::usecases::u101_booking_wizard::WizardMode;
use leptos::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
struct QueryParams {
    #[serde(default)]
    mode: Option<String>,
}

/// Mode comes from the URL (`?mode=admin`); anything else, including a
/// malformed query string, is the public end-user flow.
fn wizard_mode_from_location() -> WizardMode {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let query = search.trim_start_matches('?');
    match serde_qs::from_str::<QueryParams>(query) {
        Ok(params) if params.mode.as_deref() == Some("admin") => WizardMode::Admin,
        _ => WizardMode::EndUser,
    }
}

#[component]
pub fn App() -> impl IntoView {
    let mode = wizard_mode_from_location();

    view! {
        <main class="app">
            <header class="app__header">
                <span class="app__brand">"BeWorking"</span>
            </header>
            <CatalogPage mode=mode />
        </main>
    }
}
