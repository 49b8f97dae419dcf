//! Modal orchestrator: opens a fresh wizard for the catalog's current
//! selection and clears the selection (closing the modal and dropping the
//! wizard state with it) on completion or dismissal.

use super::state::WizardMode;
use super::view::BookingWizard;
use crate::shared::modal_frame::ModalFrame;
use contracts::domain::a001_centro::Centro;
use contracts::domain::a002_producto::Producto;
use contracts::domain::a005_booking::BookingCreated;
use leptos::prelude::*;

#[component]
pub fn BookingDialog(
    mode: WizardMode,
    /// Catalog selection; `Some` opens the dialog, `None` closes it. The
    /// wizard is recreated per selection, so no explicit reset is needed.
    selection: RwSignal<Option<(Centro, Producto)>>,
) -> impl IntoView {
    let close = Callback::new(move |_: ()| selection.set(None));
    let completed = Callback::new(move |created: BookingCreated| {
        log::info!("booking {} confirmed", created.id);
        selection.set(None);
    });

    view! {
        {move || {
            selection.get().map(|(centro, producto)| {
                view! {
                    <ModalFrame on_close=close modal_class="modal--booking".to_string()>
                        <BookingWizard
                            mode=mode
                            centro=centro
                            producto=producto
                            on_completed=completed
                        />
                    </ModalFrame>
                }
            })
        }}
    }
}
