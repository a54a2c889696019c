//! Browser binding
//!
//! Exposes the cage to the host page. The page flips `set_spinning` while a
//! draw runs, keeps `set_ball_count` at the number of students left, and
//! reads `snapshot_json` from its own render loop.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

use super::{CageLoop, LoopHandle, run_scheduled_frame};
use crate::settings::PhysicsSettings;
use crate::sim::{CageState, FrameClock};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

/// Cage handle owned by JavaScript
#[wasm_bindgen]
pub struct WebCage {
    cage: Rc<RefCell<CageLoop>>,
    handle: LoopHandle,
    frame_id: Rc<Cell<Option<i32>>>,
    last_time: Rc<Cell<f64>>,
}

#[wasm_bindgen]
impl WebCage {
    /// Create a cage; seeds from the clock when no seed is given
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> WebCage {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let settings = PhysicsSettings::load();
        // One tick per animation frame, like the stock cage
        let cage = CageLoop::new(CageState::with_settings(settings, seed))
            .with_clock(FrameClock::per_frame());
        let handle = cage.handle();
        log::info!("Cage created with seed: {}", seed);

        WebCage {
            cage: Rc::new(RefCell::new(cage)),
            handle,
            frame_id: Rc::new(Cell::new(None)),
            last_time: Rc::new(Cell::new(0.0)),
        }
    }

    pub fn set_spinning(&self, spinning: bool) {
        self.cage.borrow_mut().set_agitated(spinning);
    }

    pub fn set_ball_count(&self, count: i32) {
        self.cage.borrow_mut().set_target_count(count as i64);
    }

    /// Start the self-rescheduling animation frame loop
    pub fn start(&self) {
        if self.handle.is_cancelled() {
            log::warn!("Cage loop already torn down; create a new cage");
            return;
        }
        if self.frame_id.get().is_some() {
            return;
        }
        request_frame(
            Rc::downgrade(&self.cage),
            self.handle.clone(),
            self.frame_id.clone(),
            self.last_time.clone(),
        );
        log::info!("Cage loop running");
    }

    /// Tear down the loop; the pending frame callback is cancelled too
    pub fn stop(&self) {
        self.cage.borrow_mut().dispose();
        if let Some(id) = self.frame_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    /// JSON of the state after the last completed tick
    pub fn snapshot_json(&self) -> String {
        match self.cage.borrow().snapshot().to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot encoding failed: {}", e);
                String::from("null")
            }
        }
    }

    pub fn ball_count(&self) -> usize {
        self.cage.borrow().state().balls().len()
    }
}

impl Drop for WebCage {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(
    cage: Weak<RefCell<CageLoop>>,
    handle: LoopHandle,
    frame_id: Rc<Cell<Option<i32>>>,
    last_time: Rc<Cell<f64>>,
) {
    let Some(window) = web_sys::window() else {
        log::error!("No window; cage loop not scheduled");
        return;
    };

    let next_id = frame_id.clone();
    // Freed by wasm-bindgen once it has been called
    let callback = Closure::once_into_js(move |time: f64| {
        let previous = last_time.replace(time);
        let dt = if previous > 0.0 {
            ((time - previous) / 1000.0) as f32
        } else {
            crate::consts::SIM_DT
        };

        if run_scheduled_frame(&cage, &handle, dt) {
            request_frame(cage, handle, frame_id, last_time);
        } else {
            frame_id.set(None);
        }
    });

    match window.request_animation_frame(callback.unchecked_ref()) {
        Ok(id) => next_id.set(Some(id)),
        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
    }
}
