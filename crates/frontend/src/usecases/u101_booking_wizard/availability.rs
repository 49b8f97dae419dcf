//! Read-only/interactive availability grid for one room and one day.

use crate::shared::time_utils::{
    bloqueo_covers_slot, build_time_slots_from_bloqueos, client_initials, describe_bloqueo,
    map_status_key, SlotStatus,
};
use contracts::domain::a004_bloqueo::Bloqueo;
use leptos::prelude::*;
use std::collections::HashMap;

/// Identity of one grid cell, used for selection callbacks and the
/// selected highlight.
pub fn slot_key(room_id: &str, slot_id: &str) -> String {
    format!("{}-{}", room_id, slot_id)
}

/// Caller-supplied per-slot occupancy aggregate for desk products, where
/// individual bloqueos are not shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeskSlotLoad {
    pub fully_booked: bool,
    pub free_count: u32,
}

/// First availability record covering the slot decides its status;
/// no record means the slot is free.
pub fn resolve_slot<'a>(bloqueos: &'a [Bloqueo], slot: &str) -> (SlotStatus, Option<&'a Bloqueo>) {
    match bloqueos.iter().find(|b| bloqueo_covers_slot(b, slot)) {
        Some(b) => (map_status_key(&b.estado), Some(b)),
        None => (SlotStatus::Available, None),
    }
}

/// One room's day as discrete 30-minute slots colored by status.
///
/// Interactive only when `on_select` is given, and then only Available
/// slots react to click/keyboard. Without it the grid still renders
/// tooltips but carries no handlers and no hover affordance.
#[component]
pub fn AvailabilityGrid(
    room_id: String,
    #[prop(into)] bloqueos: Signal<Vec<Bloqueo>>,
    /// Selected slot key (`"{room_id}-{slot_id}"`).
    #[prop(optional, into)]
    selected: MaybeProp<String>,
    /// Desk mode: occupancy aggregates keyed by slot id, replacing
    /// per-record lookup.
    #[prop(optional, into)]
    desk_load: Option<Signal<HashMap<String, DeskSlotLoad>>>,
    /// Selection callback, receives the slot id (not the full key).
    #[prop(optional)]
    on_select: Option<Callback<String>>,
) -> impl IntoView {
    let room_id = StoredValue::new(room_id);
    let slots = Memo::new(move |_| build_time_slots_from_bloqueos(&bloqueos.get()));
    let role = if on_select.is_some() { "listbox" } else { "list" };

    view! {
        <div class="slot-grid" role=role>
            <For
                each=move || slots.get()
                key=|slot| slot.clone()
                children=move |slot: String| {
                    let key = slot_key(&room_id.get_value(), &slot);
                    let slot_for_status = slot.clone();
                    let cell = Memo::new(move |_| {
                        if let Some(load_map) = desk_load {
                            let load = load_map
                                .get()
                                .get(&slot_for_status)
                                .copied()
                                .unwrap_or(DeskSlotLoad { fully_booked: false, free_count: 0 });
                            let status = if load.fully_booked {
                                SlotStatus::Created
                            } else {
                                SlotStatus::Available
                            };
                            let title = format!("{} libres", load.free_count);
                            let detail = format!("{}", load.free_count);
                            (status, title, detail)
                        } else {
                            let records = bloqueos.get();
                            let (status, record) = resolve_slot(&records, &slot_for_status);
                            let title = record
                                .map(describe_bloqueo)
                                .unwrap_or_else(|| status.label().to_string());
                            let detail = record
                                .and_then(|b| b.cliente.as_deref())
                                .map(client_initials)
                                .unwrap_or_default();
                            (status, title, detail)
                        }
                    });

                    let is_selected = {
                        let key = key.clone();
                        move || selected.get().as_deref() == Some(key.as_str())
                    };

                    // Read-only grids carry no handlers and no hover
                    // affordance; only the interactive branch attaches them.
                    match on_select {
                        Some(cb) => {
                            let selectable = move || cell.get().0 == SlotStatus::Available;
                            let select = {
                                let slot = slot.clone();
                                move || {
                                    if cell.get().0 == SlotStatus::Available {
                                        cb.run(slot.clone());
                                    }
                                }
                            };
                            let select_click = select.clone();
                            let select_key = select.clone();

                            view! {
                                <div
                                    class=move || {
                                        let (status, _, _) = cell.get();
                                        let mut classes = format!("slot {}", status.css_class());
                                        if selectable() {
                                            classes.push_str(" slot--selectable");
                                        }
                                        if is_selected() {
                                            classes.push_str(" slot--selected");
                                        }
                                        classes
                                    }
                                    title=move || cell.get().1
                                    tabindex=move || if selectable() { "0" } else { "-1" }
                                    on:click=move |_| select_click()
                                    on:keydown=move |ev| {
                                        let k = ev.key();
                                        if k == "Enter" || k == " " {
                                            ev.prevent_default();
                                            select_key();
                                        }
                                    }
                                >
                                    <span class="slot__time">{slot.clone()}</span>
                                    <span class="slot__detail">{move || cell.get().2}</span>
                                </div>
                            }
                                .into_any()
                        }
                        None => view! {
                            <div
                                class=move || {
                                    let (status, _, _) = cell.get();
                                    let mut classes =
                                        format!("slot slot--static {}", status.css_class());
                                    if is_selected() {
                                        classes.push_str(" slot--selected");
                                    }
                                    classes
                                }
                                title=move || cell.get().1
                            >
                                <span class="slot__time">{slot.clone()}</span>
                                <span class="slot__detail">{move || cell.get().2}</span>
                            </div>
                        }
                            .into_any(),
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bloqueo(ini: &str, fin: &str, estado: &str) -> Bloqueo {
        Bloqueo {
            fecha_ini: ini.to_string(),
            fecha_fin: fin.to_string(),
            estado: estado.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_slot_key_format() {
        assert_eq!(slot_key("sala-2", "14:00"), "sala-2-14:00");
    }

    #[test]
    fn test_resolve_slot_prefers_first_covering_record() {
        let records = vec![
            bloqueo("2024-07-01T09:00:00", "2024-07-01T10:00:00", "Pagado"),
            bloqueo("2024-07-01T09:30:00", "2024-07-01T11:00:00", "Facturado"),
        ];
        let (status, record) = resolve_slot(&records, "09:30");
        assert_eq!(status, SlotStatus::Paid);
        assert!(record.is_some());

        let (status, _) = resolve_slot(&records, "10:30");
        assert_eq!(status, SlotStatus::Invoiced);
    }

    #[test]
    fn test_resolve_slot_defaults_to_available() {
        let records = vec![bloqueo(
            "2024-07-01T09:00:00",
            "2024-07-01T10:00:00",
            "Pagado",
        )];
        let (status, record) = resolve_slot(&records, "12:00");
        assert_eq!(status, SlotStatus::Available);
        assert!(record.is_none());
    }
}
