use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Modal frame container (overlay + positioned surface).
///
/// Intentionally renders no header or action buttons; the content decides
/// its own chrome so it looks identical inline and in a modal.
#[component]
pub fn ModalFrame(
    /// Called when the modal should close (overlay click).
    on_close: Callback<()>,
    /// Close when clicking on the overlay (default: true).
    #[prop(optional)]
    close_on_overlay: Option<bool>,
    /// Extra class for the modal surface (`div.modal`).
    #[prop(optional)]
    modal_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let close_on_overlay = close_on_overlay.unwrap_or(true);
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // We only close if both press and release happened on the overlay itself.
    // This prevents closing when the user selects text inside the modal and
    // releases the mouse outside.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close =
            close_on_overlay && overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // Defer close to next tick: avoids Leptos event delegation calling
            // a dropped handler when the overlay is removed synchronously
            // during its own click dispatch.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div
                class=move || {
                    if let Some(cls) = modal_class.clone() {
                        format!("modal {cls}")
                    } else {
                        "modal".to_string()
                    }
                }
                on:click=stop_propagation
            >
                {children()}
            </div>
        </div>
    }
}
