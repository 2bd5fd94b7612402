use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use super::config::ChartConfig;
use super::registry::ChartSurface;
use crate::error::ChartError;

#[wasm_bindgen]
extern "C" {
    /// Chart.js global, loaded by `index.html`.
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &Chart);
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Draws into `<canvas id=...>` elements of the current document.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasSurface;

impl ChartSurface for CanvasSurface {
    type Handle = Chart;

    fn create(&self, container_id: &str, config: &ChartConfig) -> Result<Chart, ChartError> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| ChartError::MissingContainer(container_id.to_string()))?;
        let json = config
            .to_json()
            .map_err(|e| ChartError::Config(e.to_string()))?;
        let options = js_sys::JSON::parse(&json).map_err(|e| ChartError::Config(describe(&e)))?;
        Chart::new(&canvas, &options).map_err(|e| ChartError::Construct(describe(&e)))
    }

    fn destroy(&self, handle: Chart) {
        handle.destroy();
    }
}
