//! WASM bridge for the floating collage — exposes the canvas engine to the
//! hero page's JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM: it
//! forwards pointer events and container size, and re-renders from
//! `view_json()` whenever a call returns `true` or `on_ready` fires.

mod probe;

use collage_core::CanvasConfig;
use collage_core::model::{HeroImageRow, ImageRecord, records_from_rows};
use collage_core::probe::probe_all;
use collage_editor::canvas::{FloatingCanvas, InitTicket};
use collage_editor::input::InputEvent;
use collage_editor::responsive::ModeChange;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

pub use probe::HtmlImageProbe;

/// The JS-facing canvas controller.
///
/// The engine sits behind `Rc<RefCell<_>>` so the spawned layout task can
/// install its result after the constructor's caller has moved on. No
/// borrow is held across an `await`.
#[wasm_bindgen]
pub struct CollageCanvas {
    inner: Rc<RefCell<FloatingCanvas>>,
    /// Registered by `start_layout`; reused whenever a resize makes layout
    /// due again (first real measurement, leaving compact mode).
    on_ready: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl CollageCanvas {
    /// Build a canvas from the backend's `hero_images` rows (JSON array) and
    /// an optional partial config (JSON object).
    #[wasm_bindgen(constructor)]
    pub fn new(rows_json: &str, config_json: Option<String>) -> Result<CollageCanvas, JsValue> {
        console_error_panic_hook_setup();
        console_logger_setup();

        let records = parse_rows(rows_json).map_err(|e| JsValue::from_str(&e))?;
        let config = parse_config(config_json.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        let canvas = FloatingCanvas::new(records, config)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?;
        log::debug!("collage canvas created with {} images", canvas.records().len());

        Ok(Self {
            inner: Rc::new(RefCell::new(canvas)),
            on_ready: None,
        })
    }

    /// Report the container's size. Returns `true` if the canvas switched
    /// between free and compact mode. Once `start_layout` has registered a
    /// callback, a resize that makes layout due starts it.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let change = self.inner.borrow_mut().set_viewport(width, height);
        if let Some(on_ready) = self.on_ready.clone() {
            self.spawn_layout(on_ready);
        }
        change != ModeChange::Unchanged
    }

    /// Start probing images and scattering them if initialization is due.
    /// `on_ready` is called once the arrangement is installed and is kept
    /// for later resizes. Returns `false` when nothing was started now
    /// (already laid out, compact, unmeasured or empty).
    pub fn start_layout(&mut self, on_ready: js_sys::Function) -> bool {
        self.on_ready = Some(on_ready.clone());
        self.spawn_layout(on_ready)
    }

    /// Handle pointer down. Returns `true` if a re-render is needed.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.inner.borrow_mut().pointer_down(x, y)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.borrow_mut().pointer_move(x, y)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.inner.borrow_mut().pointer_up(x, y)
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.inner.borrow_mut().pointer_leave()
    }

    /// `pointercancel` / `lostpointercapture`.
    pub fn pointer_cancel(&mut self) -> bool {
        self.inner
            .borrow_mut()
            .handle_event(InputEvent::PointerCancel, None)
    }

    /// Play the entrance transition. Call after the first paint of a new
    /// view, typically from `requestAnimationFrame`.
    pub fn reveal(&mut self) -> bool {
        self.inner.borrow_mut().reveal()
    }

    /// Id of the image being dragged, or empty string.
    pub fn active_id(&self) -> String {
        self.inner
            .borrow()
            .active_id()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Current render snapshot as JSON (`{"mode":"free","images":[...]}` etc).
    pub fn view_json(&self) -> String {
        serde_json::to_string(&self.inner.borrow().view())
            .unwrap_or_else(|_| r#"{"mode":"loading"}"#.to_string())
    }

    /// Unmount. Layout results still in flight are discarded when they land.
    pub fn dispose(&mut self) {
        self.inner.borrow_mut().unmount();
    }

    /// Re-mount after `dispose`, e.g. when the hero section is shown again.
    /// Layout restarts if a callback is registered.
    pub fn remount(&mut self) {
        self.inner.borrow_mut().mount();
        if let Some(on_ready) = self.on_ready.clone() {
            self.spawn_layout(on_ready);
        }
    }
}

impl CollageCanvas {
    fn spawn_layout(&self, on_ready: js_sys::Function) -> bool {
        let Some((ticket, records)) = take_due_layout(&self.inner) else {
            return false;
        };
        let canvas = Rc::clone(&self.inner);

        wasm_bindgen_futures::spawn_local(async move {
            let probes = probe_all(&HtmlImageProbe, &records).await;
            let mut rng = StdRng::seed_from_u64(entropy_seed());
            let installed = canvas
                .borrow_mut()
                .complete_initialization(ticket, &probes, &mut rng);
            if !installed {
                return;
            }
            if let Err(e) = on_ready.call0(&JsValue::NULL) {
                log::warn!("on_ready callback threw: {e:?}");
            }
        });
        true
    }
}

/// Claim an init ticket plus the records to probe, if layout is due now.
fn take_due_layout(canvas: &RefCell<FloatingCanvas>) -> Option<(InitTicket, Vec<ImageRecord>)> {
    let mut canvas = canvas.borrow_mut();
    let ticket = canvas.begin_initialization()?;
    Some((ticket, canvas.records().to_vec()))
}

// ─── Input parsing ───────────────────────────────────────────────────────

fn parse_rows(json: &str) -> Result<Vec<ImageRecord>, String> {
    let rows: Vec<HeroImageRow> =
        serde_json::from_str(json).map_err(|e| format!("invalid image rows: {e}"))?;
    Ok(records_from_rows(rows))
}

fn parse_config(json: Option<&str>) -> Result<CanvasConfig, String> {
    match json {
        None => Ok(CanvasConfig::default()),
        Some(s) if s.trim().is_empty() => Ok(CanvasConfig::default()),
        Some(s) => serde_json::from_str(s).map_err(|e| format!("invalid config: {e}")),
    }
}

/// Production layouts are unseeded; draw the seed from `Math.random`.
fn entropy_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

// ─── Console plumbing ────────────────────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Collage WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

/// Routes `log` records to the browser console.
#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
static LOGGER: ConsoleLogger = ConsoleLogger;

fn console_logger_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        // Already installed on a second canvas; ignore.
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }
}
