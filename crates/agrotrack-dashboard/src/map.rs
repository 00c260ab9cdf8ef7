//! Leaflet bindings
//!
//! Leaflet is loaded by `index.html` as the global `L`. Only the handful of
//! calls the dashboard makes are bound here.

use std::sync::Once;

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::view::{MapMarker, MapView};

/// OpenStreetMap tile template.
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

pub const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

const MARKER_ICON_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon.png";
const MARKER_ICON_RETINA_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon-2x.png";
/// Popup text for markers whose record has no equipment id.
pub const UNKNOWN_EQUIPMENT_LABEL: &str = "Unknown equipment";

const MARKER_SHADOW_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-shadow.png";

static MARKER_ICONS: Once = Once::new();

#[wasm_bindgen]
extern "C" {
    /// `L.Map`
    pub type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn new_map(element: &web_sys::Element) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &Array, zoom: u8) -> LeafletMap;

    #[wasm_bindgen(method)]
    fn remove(this: &LeafletMap);

    /// `L.TileLayer`
    type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &Object) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &LeafletMap) -> TileLayer;

    /// `L.Marker`
    type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(position: &Array) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_marker_to(this: &Marker, map: &LeafletMap) -> Marker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Marker, content: &web_sys::Node) -> Marker;

    #[wasm_bindgen(js_namespace = ["L", "Icon", "Default"], js_name = mergeOptions)]
    fn merge_default_icon_options(options: &Object);
}

fn lat_lng(latitude: f64, longitude: f64) -> Array {
    Array::of2(&JsValue::from_f64(latitude), &JsValue::from_f64(longitude))
}

fn js_object(entries: &[(&str, &str)]) -> Result<Object, JsValue> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), &JsValue::from_str(value))?;
    }
    Ok(object)
}

/// Point Leaflet's default marker icon at explicit image URLs.
///
/// Runs once per page load; later calls are no-ops.
pub fn init_marker_icons() {
    MARKER_ICONS.call_once(|| {
        if let Err(err) = patch_default_icon() {
            log::warn!("could not configure map marker icons: {:?}", err);
        }
    });
}

fn patch_default_icon() -> Result<(), JsValue> {
    let leaflet = Reflect::get(&js_sys::global(), &JsValue::from_str("L"))?;
    if leaflet.is_undefined() {
        return Err(JsValue::from_str("Leaflet is not loaded"));
    }

    // Leaflet derives icon URLs from its own script path unless this is gone.
    let icon = Reflect::get(&leaflet, &JsValue::from_str("Icon"))?;
    let default_icon = Reflect::get(&icon, &JsValue::from_str("Default"))?;
    let prototype: Object = Reflect::get(&default_icon, &JsValue::from_str("prototype"))?.dyn_into()?;
    Reflect::delete_property(&prototype, &JsValue::from_str("_getIconUrl"))?;

    merge_default_icon_options(&js_object(&[
        ("iconRetinaUrl", MARKER_ICON_RETINA_URL),
        ("iconUrl", MARKER_ICON_URL),
        ("shadowUrl", MARKER_SHADOW_URL),
    ])?);
    Ok(())
}

/// Create a Leaflet map inside `element` showing `view`.
pub fn render_map(element: &web_sys::Element, view: &MapView) -> Result<LeafletMap, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document to render the map into"))?;

    let map = new_map(element);
    map.set_view(&lat_lng(view.center.0, view.center.1), view.zoom);

    tile_layer(TILE_URL, &js_object(&[("attribution", TILE_ATTRIBUTION)])?).add_to(&map);

    for m in &view.markers {
        // A text node is never parsed as HTML
        let popup = document.create_text_node(popup_text(m));
        marker(&lat_lng(m.latitude, m.longitude))
            .add_marker_to(&map)
            .bind_popup(&popup);
    }
    Ok(map)
}

fn popup_text(marker: &MapMarker) -> &str {
    match marker.label.trim() {
        "" => UNKNOWN_EQUIPMENT_LABEL,
        label => label,
    }
}

/// Tear down a map created by [`render_map`].
pub fn remove_map(map: &LeafletMap) {
    map.remove();
}
