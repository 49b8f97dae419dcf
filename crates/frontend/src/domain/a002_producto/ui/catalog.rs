use crate::domain::a001_centro;
use crate::domain::a002_producto::model;
use crate::shared::components::ui::Select;
use crate::usecases::u101_booking_wizard::{BookingDialog, WizardMode};
use contracts::domain::a001_centro::Centro;
use contracts::domain::a002_producto::{Producto, ProductoTipo};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Product catalog: centro selector plus a card per bookable product.
/// Clicking a card opens the booking dialog; on completion the dialog
/// resets and we land back here.
#[component]
pub fn CatalogPage(mode: WizardMode) -> impl IntoView {
    let (centros, set_centros) = signal(Vec::<Centro>::new());
    let (selected_centro_id, set_selected_centro_id) = signal(String::new());
    let (productos, set_productos) = signal(Vec::<Producto>::new());
    let (error_msg, set_error_msg) = signal(None::<String>);
    let (loading, set_loading) = signal(false);

    let booking_selection = RwSignal::new(None::<(Centro, Producto)>);

    // Load centros once on mount. Writes after the await go through
    // `try_set`: if the page is gone by then the result is dropped.
    Effect::new(move |_| {
        spawn_local(async move {
            match a001_centro::model::fetch_centros().await {
                Ok(items) => {
                    if let Some(first) = items.first() {
                        _ = set_selected_centro_id.try_set(first.id.clone());
                    }
                    _ = set_centros.try_set(items);
                }
                Err(e) => {
                    _ = set_error_msg.try_set(Some(format!("Error cargando centros: {}", e)));
                }
            }
        });
    });

    // Refetch products when the centro changes. A stale response for a
    // previously selected centro must not overwrite the current list.
    let fetch_generation = StoredValue::new(0u64);
    Effect::new(move |_| {
        let centro_id = selected_centro_id.get();
        if centro_id.is_empty() {
            return;
        }
        let generation = fetch_generation.with_value(|g| g + 1);
        fetch_generation.set_value(generation);
        set_loading.set(true);
        spawn_local(async move {
            let result = model::fetch_productos(&centro_id).await;
            // `None` means the reactive owner is already disposed.
            if fetch_generation.try_get_value() != Some(generation) {
                return;
            }
            _ = set_loading.try_set(false);
            match result {
                Ok(items) => {
                    _ = set_error_msg.try_set(None);
                    _ = set_productos.try_set(items);
                }
                Err(e) => {
                    _ = set_productos.try_set(vec![]);
                    _ = set_error_msg.try_set(Some(format!("Error cargando productos: {}", e)));
                }
            }
        });
    });

    let centro_options = Signal::derive(move || {
        centros
            .get()
            .iter()
            .map(|c| (c.id.clone(), c.nombre.clone()))
            .collect::<Vec<_>>()
    });

    let open_booking = move |producto: Producto| {
        let centro = centros
            .get()
            .into_iter()
            .find(|c| c.id == producto.centro_id);
        if let Some(centro) = centro {
            booking_selection.set(Some((centro, producto)));
        }
    };

    view! {
        <div class="catalog-page">
            <div class="catalog-page__header">
                <h2>"Reservar un espacio"</h2>
                <Select
                    label="Centro"
                    value=Signal::derive(move || selected_centro_id.get())
                    options=centro_options
                    on_change=Callback::new(move |id: String| set_selected_centro_id.set(id))
                />
            </div>

            {move || error_msg.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="catalog-page__grid">
                {move || {
                    if loading.get() {
                        return view! { <div class="catalog-page__empty">"Cargando…"</div> }.into_any();
                    }
                    let items = productos.get();
                    if items.is_empty() {
                        return view! { <div class="catalog-page__empty">"No hay espacios disponibles en este centro"</div> }.into_any();
                    }
                    items
                        .into_iter()
                        .map(|producto| {
                            let open = open_booking;
                            let p = producto.clone();
                            let tipo_label = match producto.tipo {
                                ProductoTipo::Sala => "Sala de reuniones",
                                ProductoTipo::Mesa => "Puesto flexible",
                            };
                            view! {
                                <div class="product-card" on:click=move |_| open(p.clone())>
                                    <div class="product-card__name">{producto.nombre.clone()}</div>
                                    <div class="product-card__tipo">{tipo_label}</div>
                                    {producto
                                        .capacity
                                        .map(|c| view! { <div class="product-card__capacity">{format!("Hasta {} personas", c)}</div> })}
                                    <div class="product-card__price">
                                        {producto
                                            .price_from
                                            .map(|p| format!("Desde {:.2} €/h", p))
                                            .unwrap_or_else(|| "Consultar precio".to_string())}
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>

            <BookingDialog mode=mode selection=booking_selection />
        </div>
    }
}
