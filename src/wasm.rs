//! Browser bindings for the derived-state layer.
//!
//! Snapshots cross the boundary as JSON in the canister's own shape; derived
//! values come back as plain numbers, strings and JSON.
use crate::canister::Principal;
use crate::context::*;
use crate::hud::*;
use crate::table::*;
use crate::timer::*;
use crate::tournament::*;
use wasm_bindgen::prelude::*;

fn js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct WasmGameType(GameType);

#[wasm_bindgen]
impl WasmGameType {
    #[wasm_bindgen]
    pub fn from_string(s: &str) -> Result<Self, JsValue> {
        GameType::try_from(s).map(Self).map_err(js)
    }
    #[wasm_bindgen]
    pub fn into_string(&self) -> String {
        self.0.to_string()
    }
    #[wasm_bindgen]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.0).map_err(js)
    }
    #[wasm_bindgen]
    pub fn small_blind(&self) -> u64 {
        self.0.small_blind()
    }
    #[wasm_bindgen]
    pub fn big_blind(&self) -> u64 {
        self.0.big_blind()
    }
}

#[wasm_bindgen]
pub struct WasmTable(TableContext);

#[wasm_bindgen]
impl WasmTable {
    /// `directory` is the cached users→canister map; a corrupt cache is
    /// ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(
        table: &str,
        local: Option<String>,
        directory: Option<String>,
    ) -> Result<Self, JsValue> {
        let table = serde_json::from_str::<PublicTable>(table).map_err(js)?;
        let directory = directory
            .as_deref()
            .map(Directory::from_json)
            .unwrap_or_default();
        Ok(Self(TableContext::new(
            table,
            local.map(Principal::from),
            &directory,
        )))
    }
    #[wasm_bindgen]
    pub fn is_joined(&self) -> bool {
        self.0.is_joined()
    }
    #[wasm_bindgen]
    pub fn is_ongoing(&self) -> bool {
        self.0.is_ongoing()
    }
    #[wasm_bindgen]
    pub fn is_my_turn(&self) -> bool {
        self.0.is_my_turn()
    }
    #[wasm_bindgen]
    pub fn is_queued(&self) -> bool {
        self.0.is_queued()
    }
    #[wasm_bindgen]
    pub fn current_bet(&self) -> u64 {
        self.0.current_bet()
    }
    #[wasm_bindgen]
    pub fn pot(&self) -> u64 {
        self.0.pot()
    }
    #[wasm_bindgen]
    pub fn own_position(&self) -> Option<usize> {
        self.0.own_position()
    }
    #[wasm_bindgen]
    pub fn seat_labels(&self) -> js_sys::Array {
        self.0
            .seats()
            .iter()
            .map(|s| JsValue::from_str(&s.label()))
            .collect()
    }
    #[wasm_bindgen]
    pub fn seat_bets(&self) -> js_sys::Array {
        self.0
            .seats()
            .iter()
            .map(|s| JsValue::from_f64(s.committed() as f64))
            .collect()
    }
    #[wasm_bindgen]
    pub fn hud(&self) -> WasmHud {
        WasmHud(HudContext::new(&self.0))
    }
}

#[wasm_bindgen]
pub struct WasmHud(HudContext);

#[wasm_bindgen]
impl WasmHud {
    #[wasm_bindgen]
    pub fn is_turn(&self) -> bool {
        self.0.is_turn()
    }
    #[wasm_bindgen]
    pub fn to_call(&self) -> u64 {
        self.0.to_call()
    }
    #[wasm_bindgen]
    pub fn min_raise(&self) -> Option<u64> {
        self.0.min_raise()
    }
    #[wasm_bindgen]
    pub fn max_raise(&self) -> Option<u64> {
        self.0.max_raise()
    }
    #[wasm_bindgen]
    pub fn choices(&self) -> js_sys::Array {
        self.0
            .choices()
            .iter()
            .map(|c| JsValue::from_str(&c.to_string()))
            .collect()
    }
    /// Presets as `[{ preset, amount }]`.
    #[wasm_bindgen]
    pub fn quick(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.0.quick()).map_err(js)
    }
    /// Checks a choice in its display form, e.g. `raise to 12`.
    #[wasm_bindgen]
    pub fn validate(&self, choice: &str) -> Result<(), JsValue> {
        let choice = Choice::try_from(choice).map_err(js)?;
        self.0.validate(&choice).map_err(js)
    }
}

#[wasm_bindgen]
#[derive(Default)]
pub struct WasmTimer(TurnTimer);

#[wasm_bindgen]
impl WasmTimer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }
    #[wasm_bindgen]
    pub fn arm(&mut self, table: &WasmTable) {
        self.0.arm(TimerInputs::from(Some(table.0.table())));
    }
    /// `now` in nanoseconds since the epoch.
    #[wasm_bindgen]
    pub fn tick(&mut self, now: u64) -> Option<f64> {
        self.0.tick(now)
    }
}

/// Current join option as JSON, e.g. `{"Late":100}`, or `undefined`.
#[wasm_bindgen]
pub fn join_type(
    tournament: &str,
    leaderboard: &str,
    user: &str,
    now: u64,
) -> Result<Option<String>, JsValue> {
    let tournament = serde_json::from_str::<TournamentData>(tournament).map_err(js)?;
    let leaderboard = serde_json::from_str::<Leaderboard>(leaderboard).map_err(js)?;
    JoinType::derive(&tournament, &leaderboard, &Principal::from(user), now)
        .map(|join| serde_json::to_string(&join).map_err(js))
        .transpose()
}

#[wasm_bindgen]
pub fn turn_fraction(started: u64, duration: u16, now: u64) -> Option<f64> {
    fraction(started, duration, now)
}
