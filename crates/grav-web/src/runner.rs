use grav_engine::{
    BodyInfo, InputEvent, InstanceBuffer, InteractionController, InteractionMode,
    SandboxConfig, SavedState, SimulationState, StateError,
};

/// Wires the sandbox state, the gesture controller and the render snapshot.
///
/// The bridge keeps one of these in a `thread_local!` and exports free
/// functions, because wasm-bindgen cannot export methods on it directly.
pub struct SandboxRunner {
    state: SimulationState,
    controller: InteractionController,
    buffer: InstanceBuffer,
}

impl SandboxRunner {
    pub fn new(config: SandboxConfig) -> Self {
        let mut runner = Self {
            state: SimulationState::new(config),
            controller: InteractionController::new(),
            buffer: InstanceBuffer::new(),
        };
        runner.rebuild();
        runner
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable access for settings that have no gesture.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Run one frame: due integrator ticks, then a fresh render snapshot.
    pub fn tick(&mut self, dt: f64) {
        let pan = self.controller.pan_drag();
        self.state.advance(dt, pan);
        self.rebuild();
    }

    /// Apply an input event immediately.
    pub fn handle(&mut self, event: InputEvent) {
        self.controller.handle(&mut self.state, event);
        self.rebuild();
    }

    /// Switching modes abandons any drag in progress.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.controller.cancel();
        self.state.set_mode(mode);
        self.rebuild();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.state.resize_viewport(width, height);
        self.rebuild();
    }

    /// Info panel contents: the live drag preview, or the selected/hovered body.
    pub fn inspect(&self) -> Option<BodyInfo> {
        self.controller.preview(&self.state)
    }

    pub fn save_state(&self) -> Result<String, StateError> {
        SavedState::capture(&self.state).to_json()
    }

    pub fn load_state(&mut self, json: &str) -> Result<(), StateError> {
        let saved = SavedState::from_json(json)?;
        self.controller.cancel();
        saved.apply(&mut self.state)?;
        self.rebuild();
        Ok(())
    }

    /// Rebuild the render snapshot from the current state.
    pub fn rebuild(&mut self) {
        let view = self.controller.view(&self.state);
        let preview = if self.controller.is_dragging() {
            self.controller.preview(&self.state)
        } else {
            None
        };
        self.buffer.rebuild(&self.state, &view, preview.as_ref());
    }

    // ---- Pointer accessors for reads from JavaScript memory ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.buffer.instance_count()
    }

    pub fn trace_vertices_ptr(&self) -> *const f32 {
        self.buffer.traces_ptr()
    }

    pub fn trace_vertex_count(&self) -> u32 {
        self.buffer.trace_vertex_count()
    }
}
