use wasm_bindgen::prelude::*;

mod names;
mod site;
use site::Portfolio;

orbit_web::export_scene!(Portfolio, "portfolio");
