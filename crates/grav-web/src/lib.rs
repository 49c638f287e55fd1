pub mod runner;

pub use runner::SandboxRunner;

use std::cell::RefCell;

use grav_engine::{
    ForceLaw, InputEvent, InteractionMode, KeyCommand, MassFormula, PointerButton,
    SandboxConfig, TraceDisplay,
};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SandboxRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SandboxRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Sandbox not initialized. Call sandbox_init() first.");
        f(runner)
    })
}

#[wasm_bindgen]
pub fn sandbox_init(width: f64, height: f64) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = SandboxConfig {
        viewport_width: width,
        viewport_height: height,
        ..SandboxConfig::default()
    };
    let runner = SandboxRunner::new(config);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("gravitation sandbox: initialized ({}x{})", width, height);
}

#[wasm_bindgen]
pub fn sandbox_tick(dt: f64) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn sandbox_resize(width: f64, height: f64) {
    with_runner(|r| r.resize(width, height));
}

// ---- Input ----

#[wasm_bindgen]
pub fn sandbox_pointer_down(x: f64, y: f64, button: u32) {
    let Some(button) = PointerButton::from_dom(button) else {
        return;
    };
    with_runner(|r| r.handle(InputEvent::PointerDown { x, y, button }));
}

#[wasm_bindgen]
pub fn sandbox_pointer_move(x: f64, y: f64) {
    with_runner(|r| r.handle(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn sandbox_pointer_up(x: f64, y: f64) {
    with_runner(|r| r.handle(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn sandbox_wheel(delta_y: f64) {
    with_runner(|r| r.handle(InputEvent::Wheel { delta_y }));
}

/// `key` is `KeyboardEvent.key`.
#[wasm_bindgen]
pub fn sandbox_key(key: &str) {
    if let Some(command) = KeyCommand::from_key(key) {
        with_runner(|r| r.handle(InputEvent::Key(command)));
    }
}

// ---- Controls ----

#[wasm_bindgen]
pub fn sandbox_set_mode(mode: &str) {
    match InteractionMode::from_name(mode) {
        Some(mode) => with_runner(|r| r.set_mode(mode)),
        None => log::warn!("unknown mode {:?}", mode),
    }
}

#[wasm_bindgen]
pub fn sandbox_get_mode() -> String {
    with_runner(|r| r.state().mode().name().to_string())
}

#[wasm_bindgen]
pub fn sandbox_set_gravity(text: &str) {
    with_runner(|r| r.state_mut().set_gravity_text(text));
}

#[wasm_bindgen]
pub fn sandbox_set_force_law(name: &str) {
    match ForceLaw::from_name(name) {
        Some(law) => with_runner(|r| r.state_mut().set_force_law(law)),
        None => log::warn!("unknown force law {:?}", name),
    }
}

#[wasm_bindgen]
pub fn sandbox_set_confined_box(confined: bool) {
    with_runner(|r| r.state_mut().set_confined_box(confined));
}

#[wasm_bindgen]
pub fn sandbox_set_trace_length(text: &str) {
    with_runner(|r| {
        r.state_mut().set_trace_length(text);
        r.rebuild();
    });
}

#[wasm_bindgen]
pub fn sandbox_set_trace_display(name: &str) {
    match TraceDisplay::from_name(name) {
        Some(display) => with_runner(|r| {
            r.state_mut().set_trace_display(display);
            r.rebuild();
        }),
        None => log::warn!("unknown trace display {:?}", name),
    }
}

#[wasm_bindgen]
pub fn sandbox_set_mass_formula(name: &str) {
    match MassFormula::from_name(name) {
        Some(formula) => with_runner(|r| r.state_mut().set_mass_formula(formula)),
        None => log::warn!("unknown mass formula {:?}", name),
    }
}

#[wasm_bindgen]
pub fn sandbox_set_mass_value(text: &str) {
    with_runner(|r| r.state_mut().set_mass_value_text(text));
}

/// Re-weigh the selected body from a typed density (or mass).
#[wasm_bindgen]
pub fn sandbox_set_selected_density(text: &str) {
    with_runner(|r| {
        if let Some(id) = r.state().selection.selected {
            r.state_mut().set_density(id, text);
        }
    });
}

#[wasm_bindgen]
pub fn sandbox_toggle_selected_pin() {
    with_runner(|r| {
        if let Some(id) = r.state().selection.selected {
            r.state_mut().toggle_pin(id);
            r.rebuild();
        }
    });
}

#[wasm_bindgen]
pub fn sandbox_toggle_center() {
    with_runner(|r| r.handle(InputEvent::Key(KeyCommand::ToggleCenter)));
}

#[wasm_bindgen]
pub fn sandbox_clear() {
    with_runner(|r| {
        r.state_mut().clear_bodies();
        r.rebuild();
    });
}

#[wasm_bindgen]
pub fn sandbox_set_zoom(pixels_per_meter: f64) {
    with_runner(|r| {
        r.state_mut().set_zoom(pixels_per_meter);
        r.rebuild();
    });
}

#[wasm_bindgen]
pub fn sandbox_get_zoom() -> f64 {
    with_runner(|r| r.state().camera.pixels_per_meter)
}

// ---- Persistence ----

/// Serialized state, or an empty string on failure.
#[wasm_bindgen]
pub fn sandbox_save_state() -> String {
    with_runner(|r| match r.save_state() {
        Ok(json) => json,
        Err(e) => {
            log::warn!("save failed: {}", e);
            String::new()
        }
    })
}

/// Returns whether the document was loaded. A rejected document leaves the
/// sandbox unchanged.
#[wasm_bindgen]
pub fn sandbox_load_state(json: &str) -> bool {
    with_runner(|r| match r.load_state(json) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("load rejected: {}", e);
            false
        }
    })
}

// ---- Data accessors ----

/// Info panel JSON, or an empty string when there is nothing to show.
#[wasm_bindgen]
pub fn sandbox_inspect() -> String {
    with_runner(|r| {
        r.inspect()
            .and_then(|info| info.to_json().ok())
            .unwrap_or_default()
    })
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

#[wasm_bindgen]
pub fn get_trace_vertices_ptr() -> *const f32 {
    with_runner(|r| r.trace_vertices_ptr())
}

#[wasm_bindgen]
pub fn get_trace_vertex_count() -> u32 {
    with_runner(|r| r.trace_vertex_count())
}
