//! Map of equipment positions

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::*;

use crate::map::{remove_map, render_map, LeafletMap};
use crate::view::MapView;

/// Leaflet map with one marker per record.
///
/// The map is created once the container is in the document and removed when
/// the component is disposed.
#[component]
pub fn EquipmentMap(map_view: MapView) -> impl IntoView {
    let container = create_node_ref::<html::Div>();
    let map: Rc<RefCell<Option<LeafletMap>>> = Rc::default();
    let disposed = Rc::new(Cell::new(false));

    container.on_load({
        let map = map.clone();
        let disposed = disposed.clone();
        move |div| {
            request_animation_frame(move || {
                if disposed.get() {
                    return;
                }
                match render_map(&div, &map_view) {
                    Ok(rendered) => *map.borrow_mut() = Some(rendered),
                    Err(err) => log::error!("failed to render equipment map: {:?}", err),
                }
            });
        }
    });

    on_cleanup(move || {
        disposed.set(true);
        if let Some(rendered) = map.borrow_mut().take() {
            remove_map(&rendered);
        }
    });

    view! {
        <div class="map" node_ref=container style="height: 400px; margin-top: 1rem;"></div>
    }
}
