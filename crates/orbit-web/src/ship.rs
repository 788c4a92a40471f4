//! Ship renderer backed by page callbacks.

use js_sys::{Function, Object, Reflect};
use orbit_engine::{ShipPose, ShipRenderer, ShipRendererError};
use wasm_bindgen::JsValue;

/// Forwards ship updates to two page functions:
/// `place({ x, y, angleDeg, scale? })` and `setEngine(on)`.
pub struct JsShipRenderer {
    place: Function,
    set_engine: Function,
}

impl JsShipRenderer {
    pub fn new(place: Function, set_engine: Function) -> Self {
        Self { place, set_engine }
    }
}

fn js_error(err: JsValue) -> ShipRendererError {
    ShipRendererError(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

fn set(obj: &Object, key: &str, value: f64) -> Result<(), ShipRendererError> {
    Reflect::set(obj, &JsValue::from_str(key), &JsValue::from_f64(value))
        .map(|_| ())
        .map_err(js_error)
}

impl ShipRenderer for JsShipRenderer {
    fn place(&mut self, pose: ShipPose) -> Result<(), ShipRendererError> {
        let obj = Object::new();
        set(&obj, "x", pose.x as f64)?;
        set(&obj, "y", pose.y as f64)?;
        set(&obj, "angleDeg", pose.heading_deg as f64)?;
        if let Some(scale) = pose.scale {
            set(&obj, "scale", scale as f64)?;
        }
        self.place
            .call1(&JsValue::NULL, &obj)
            .map(|_| ())
            .map_err(js_error)
    }

    fn set_engine(&mut self, on: bool) -> Result<(), ShipRendererError> {
        self.set_engine
            .call1(&JsValue::NULL, &JsValue::from_bool(on))
            .map(|_| ())
            .map_err(js_error)
    }
}
