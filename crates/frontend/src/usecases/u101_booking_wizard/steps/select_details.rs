//! Step 0: dates, times, attendees and price overrides, plus the live
//! availability grid for the chosen product.

use crate::shared::components::date_input::DateInput;
use crate::shared::components::ui::{Button, Checkbox, Input, Select, Textarea};
use crate::shared::time_utils::{add_minutes, bloqueo_covers_slot, build_time_slots_from_bloqueos};
use crate::usecases::u101_booking_wizard::availability::{slot_key, AvailabilityGrid, DeskSlotLoad};
use crate::usecases::u101_booking_wizard::model;
use crate::usecases::u101_booking_wizard::state::BookingWizardStore;
use contracts::domain::a002_producto::ProductoTipo;
use contracts::domain::a004_bloqueo::Bloqueo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;

/// Range written into the draft when a grid slot is picked: one hour from
/// the slot start, regardless of the grid's 30-minute granularity. The end
/// clamps at 24:00 for late slots.
fn slot_to_range(slot: &str) -> (String, String) {
    (slot.to_string(), add_minutes(slot, 60))
}

const WEEKDAYS: [(&str, &str); 7] = [
    ("monday", "Lunes"),
    ("tuesday", "Martes"),
    ("wednesday", "Miércoles"),
    ("thursday", "Jueves"),
    ("friday", "Viernes"),
    ("saturday", "Sábado"),
    ("sunday", "Domingo"),
];

#[component]
pub fn SelectDetailsStep() -> impl IntoView {
    let store = BookingWizardStore::use_store();

    // One-time defaults, filled only where the draft is still empty so a
    // return visit to this step keeps the user's inputs.
    store.set(|d| {
        if d.start_time.is_empty() {
            d.start_time = "09:00".to_string();
        }
        if d.end_time.is_empty() {
            d.end_time = "10:00".to_string();
        }
        if d.date_from.is_empty() {
            d.date_from = chrono::Local::now()
                .date_naive()
                .format("%Y-%m-%d")
                .to_string();
        }
        if d.date_to.is_empty() {
            d.date_to = d.date_from.clone();
        }
    });

    let (bloqueos, set_bloqueos) = signal(Vec::<Bloqueo>::new());
    let (date_error, set_date_error) = signal(None::<String>);

    // Availability is keyed by (date, product name) only; edits to the
    // other draft fields must not trigger a refetch. The Memo dedupes.
    let fetch_key = Memo::new(move |_| {
        let d = store.draft.get();
        (
            d.date_from.clone(),
            d.producto.as_ref().map(|p| p.nombre.clone()),
        )
    });

    // Stale responses are dropped by generation, same as the catalog page.
    let fetch_generation = StoredValue::new(0u64);
    Effect::new(move |_| {
        let (fecha, nombre) = fetch_key.get();
        let generation = fetch_generation.with_value(|g| g + 1);
        fetch_generation.set_value(generation);

        let Some(nombre) = nombre else {
            set_bloqueos.set(vec![]);
            return;
        };
        if fecha.is_empty() {
            set_bloqueos.set(vec![]);
            return;
        }

        spawn_local(async move {
            let result = model::fetch_bloqueos(&fecha, &[nombre]).await;
            // `None` means the dialog closed mid-flight and the reactive
            // owner is gone; the response has nowhere to land.
            if fetch_generation.try_get_value() != Some(generation) {
                return;
            }
            match result {
                Ok(records) => {
                    _ = set_bloqueos.try_set(records);
                }
                Err(e) => {
                    log::warn!("availability fetch failed: {}", e);
                    _ = set_bloqueos.try_set(vec![]);
                }
            }
        });
    });

    // Product is fixed for the lifetime of the wizard instance.
    let producto = store.draft.get_untracked().producto;
    let room_id = producto.as_ref().map(|p| p.id.clone()).unwrap_or_default();
    let is_desk = producto
        .as_ref()
        .map(|p| p.tipo == ProductoTipo::Mesa)
        .unwrap_or(false);
    let desk_capacity = producto.as_ref().and_then(|p| p.capacity).unwrap_or(1);

    // Desks share the room; occupancy per slot is capacity minus the
    // covering records, and the grid shows the free count instead of
    // individual bookings.
    let desk_load = Signal::derive(move || {
        let records = bloqueos.get();
        build_time_slots_from_bloqueos(&records)
            .into_iter()
            .map(|slot| {
                let used = records
                    .iter()
                    .filter(|b| bloqueo_covers_slot(b, &slot))
                    .count() as u32;
                let free = desk_capacity.saturating_sub(used);
                (
                    slot,
                    DeskSlotLoad {
                        fully_booked: free == 0,
                        free_count: free,
                    },
                )
            })
            .collect::<HashMap<String, DeskSlotLoad>>()
    });

    let selected_slot = {
        let room_id = room_id.clone();
        Signal::derive(move || {
            let start = store.draft.get().start_time;
            (!start.is_empty()).then(|| slot_key(&room_id, &start))
        })
    };

    let on_slot_select = Callback::new(move |slot: String| {
        let (start, end) = slot_to_range(&slot);
        store.set(|d| {
            d.start_time = start;
            d.end_time = end;
        });
    });

    let is_recurrente = Memo::new(move |_| store.draft.get().reservation_type == "Recurrente");

    let next_disabled = Memo::new(move |_| {
        let d = store.draft.get();
        d.date_from.is_empty()
            || d.date_to.is_empty()
            || d.start_time.is_empty()
            || d.end_time.is_empty()
    });

    let handle_next = Callback::new(move |_: leptos::ev::MouseEvent| {
        let d = store.draft.get_untracked();
        if d.date_from.is_empty() || d.date_to.is_empty() {
            set_date_error.set(Some("Selecciona las fechas de la reserva".to_string()));
            return;
        }
        if d.date_from > d.date_to {
            set_date_error.set(Some(
                "La fecha de inicio no puede ser posterior a la de fin".to_string(),
            ));
            return;
        }
        set_date_error.set(None);
        store.next_step();
    });

    view! {
        <div class="wizard-step wizard-step--details">
            <div class="form__row">
                <Select
                    label="Tipo de usuario"
                    value=Signal::derive(move || store.draft.get().user_type)
                    options=Signal::derive(|| {
                        ["Usuario Aulas", "Usuario Mesas", "Externo"]
                            .iter()
                            .map(|v| (v.to_string(), v.to_string()))
                            .collect::<Vec<_>>()
                    })
                    on_change=Callback::new(move |v: String| store.set(|d| d.user_type = v))
                />
                <Select
                    label="Tipo de reserva"
                    value=Signal::derive(move || store.draft.get().reservation_type)
                    options=Signal::derive(|| {
                        ["Por Horas", "Recurrente"]
                            .iter()
                            .map(|v| (v.to_string(), v.to_string()))
                            .collect::<Vec<_>>()
                    })
                    on_change=Callback::new(move |v: String| store.set(|d| d.reservation_type = v))
                />
            </div>

            <div class="form__row">
                <DateInput
                    label="Desde"
                    value=Signal::derive(move || store.draft.get().date_from)
                    on_change=move |v: String| store.set(|d| d.date_from = v)
                />
                <DateInput
                    label="Hasta"
                    value=Signal::derive(move || store.draft.get().date_to)
                    on_change=move |v: String| store.set(|d| d.date_to = v)
                />
                <Input
                    label="Hora inicio"
                    input_type="time"
                    value=Signal::derive(move || store.draft.get().start_time)
                    on_input=Callback::new(move |v: String| store.set(|d| d.start_time = v))
                />
                <Input
                    label="Hora fin"
                    input_type="time"
                    value=Signal::derive(move || store.draft.get().end_time)
                    on_input=Callback::new(move |v: String| store.set(|d| d.end_time = v))
                />
            </div>

            {move || date_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            {move || {
                is_recurrente.get().then(|| view! {
                    <div class="form__group">
                        <span class="form__label">"Días de la semana"</span>
                        <div class="form__row form__row--weekdays">
                            {WEEKDAYS
                                .iter()
                                .map(|(token, label)| {
                                    let token = *token;
                                    view! {
                                        <Checkbox
                                            label=label.to_string()
                                            checked=Signal::derive(move || {
                                                store.draft.get().weekdays.contains(token)
                                            })
                                            on_change=Callback::new(move |checked: bool| {
                                                store.set(|d| {
                                                    if checked {
                                                        d.weekdays.insert(token.to_string());
                                                    } else {
                                                        d.weekdays.remove(token);
                                                    }
                                                });
                                            })
                                        />
                                    }
                                })
                                .collect_view()}
                        </div>
                        <Checkbox
                            label="Sin fecha de fin"
                            checked=Signal::derive(move || store.draft.get().open_ended)
                            on_change=Callback::new(move |v: bool| store.set(|d| d.open_ended = v))
                        />
                    </div>
                })
            }}

            <div class="form__row">
                <Input
                    label="Asistentes"
                    input_type="number"
                    value=Signal::derive(move || store.draft.get().attendees)
                    on_input=Callback::new(move |v: String| store.set(|d| d.attendees = v))
                />
                <Input
                    label="Tarifa (€/h)"
                    input_type="number"
                    value=Signal::derive(move || store.draft.get().tarifa)
                    on_input=Callback::new(move |v: String| store.set(|d| d.tarifa = v))
                />
                <Input
                    label="Precio manual (€/h)"
                    input_type="number"
                    value=Signal::derive(move || store.draft.get().custom_price)
                    on_input=Callback::new(move |v: String| store.set(|d| d.custom_price = v))
                />
                <Input
                    label="Configuración"
                    value=Signal::derive(move || store.draft.get().configuracion)
                    on_input=Callback::new(move |v: String| store.set(|d| d.configuracion = v))
                />
            </div>

            <Textarea
                label="Notas"
                value=Signal::derive(move || store.draft.get().note)
                on_input=Callback::new(move |v: String| store.set(|d| d.note = v))
            />

            <div class="form__group">
                <span class="form__label">"Disponibilidad"</span>
                {if is_desk {
                    view! {
                        <AvailabilityGrid
                            room_id=room_id.clone()
                            bloqueos=bloqueos
                            selected=selected_slot
                            desk_load=desk_load
                            on_select=on_slot_select
                        />
                    }
                        .into_any()
                } else {
                    view! {
                        <AvailabilityGrid
                            room_id=room_id.clone()
                            bloqueos=bloqueos
                            selected=selected_slot
                            on_select=on_slot_select
                        />
                    }
                        .into_any()
                }}
            </div>

            <div class="wizard-step__footer">
                <Button
                    disabled=Signal::derive(move || next_disabled.get())
                    on_click=handle_next
                >
                    "Continuar"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_selection_maps_to_one_hour_range() {
        assert_eq!(
            slot_to_range("14:00"),
            ("14:00".to_string(), "15:00".to_string())
        );
        assert_eq!(
            slot_to_range("09:30"),
            ("09:30".to_string(), "10:30".to_string())
        );
        // Late slots clamp at the end of the day.
        assert_eq!(
            slot_to_range("23:30"),
            ("23:30".to_string(), "24:00".to_string())
        );
    }

    // Responses that land after the dialog is closed check the generation
    // counter through `try_get_value`; a disposed owner reads as `None`
    // instead of panicking, so the response is silently dropped.
    #[test]
    fn test_generation_counter_reads_none_after_owner_disposal() {
        let owner = Owner::new();
        let generation = owner.with(|| StoredValue::new(1u64));
        assert_eq!(generation.try_get_value(), Some(1));
        drop(owner);
        assert_eq!(generation.try_get_value(), None);
    }
}
