//! WASM bindings for notedrill-core
//!
//! Exposes a drill session to a browser front end. The page owns the keypad
//! and the staff drawing; it forwards presses here and reads back views and
//! render requests as plain JS objects.

#[cfg(feature = "wasm")]
use crate::clock::Clock;
#[cfg(feature = "wasm")]
use crate::keypad::parse_keys;
#[cfg(feature = "wasm")]
use crate::session::{ControlEvent, DrillSession, Outcome, SessionConfig};
#[cfg(feature = "wasm")]
use crate::types::Letter;
#[cfg(feature = "wasm")]
use rand::rngs::StdRng;
#[cfg(feature = "wasm")]
use rand::SeedableRng;
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// Browser wall clock
#[cfg(feature = "wasm")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

#[cfg(feature = "wasm")]
impl Clock for JsClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmDrill {
    session: DrillSession<JsClock, StdRng>,
}

#[cfg(feature = "wasm")]
fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmDrill {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmDrill {
        WasmDrill {
            session: DrillSession::with_parts(
                SessionConfig::default(),
                JsClock,
                StdRng::from_entropy(),
            ),
        }
    }

    #[wasm_bindgen(js_name = setRange)]
    pub fn set_range(&mut self, lower: u8, upper: u8) -> Result<(), JsValue> {
        self.apply(ControlEvent::RangeChanged(lower, upper))
    }

    #[wasm_bindgen(js_name = setMaxCount)]
    pub fn set_max_count(&mut self, max_count: u32) -> Result<(), JsValue> {
        self.apply(ControlEvent::MaxCountChanged(max_count))
    }

    /// Start the session; returns the first render request or null
    pub fn start(&mut self) -> JsValue {
        self.trial_request(ControlEvent::Start)
    }

    /// Advance past a graded trial; returns the next render request or null
    pub fn next(&mut self) -> JsValue {
        self.trial_request(ControlEvent::Next)
    }

    #[wasm_bindgen(js_name = pressLetter)]
    pub fn press_letter(&mut self, letter: &str) -> Result<JsValue, JsValue> {
        let letter: Letter = letter
            .parse()
            .map_err(|e: anyhow::Error| JsValue::from_str(&e.to_string()))?;
        self.apply(ControlEvent::Letter(letter))?;
        Ok(self.view())
    }

    #[wasm_bindgen(js_name = pressGroup)]
    pub fn press_group(&mut self, group: u8) -> Result<JsValue, JsValue> {
        self.apply(ControlEvent::Group(group))?;
        Ok(self.view())
    }

    /// Feed a typed line of keypad symbols, e.g. `"C4 E4"`
    #[wasm_bindgen(js_name = typeKeys)]
    pub fn type_keys(&mut self, line: &str) -> Result<JsValue, JsValue> {
        let events = parse_keys(line)
            .ok_or_else(|| JsValue::from_str(&format!("Not keypad input: {}", line)))?;
        for event in events {
            self.apply(event)?;
        }
        Ok(self.view())
    }

    /// Live elapsed seconds while a trial awaits input
    pub fn tick(&self) -> Option<f64> {
        self.session.tick()
    }

    pub fn view(&self) -> JsValue {
        to_js(&self.session.view())
    }

    #[wasm_bindgen(js_name = renderRequest)]
    pub fn render_request(&self) -> JsValue {
        match self.session.render_request() {
            Some(request) => to_js(&request),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = history)]
    pub fn history(&self) -> JsValue {
        to_js(&self.session.history())
    }

    fn apply(&mut self, event: ControlEvent) -> Result<(), JsValue> {
        self.session
            .handle(event)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn trial_request(&mut self, event: ControlEvent) -> JsValue {
        match self.session.handle(event) {
            Ok(Outcome::TrialStarted(request)) => to_js(&request),
            _ => JsValue::NULL,
        }
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmDrill {
    fn default() -> Self {
        Self::new()
    }
}
