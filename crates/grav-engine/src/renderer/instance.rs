use bytemuck::{Pod, Zeroable};

use crate::api::sandbox::SimulationState;
use crate::interaction::inspect::BodyInfo;
use crate::renderer::camera::View;

pub const FLAG_PINNED: u32 = 1 << 0;
pub const FLAG_SELECTED: u32 = 1 << 1;
pub const FLAG_HIGHLIGHTED: u32 = 1 << 2;
pub const FLAG_CENTERED: u32 = 1 << 3;
/// A body still being drawn (create preview).
pub const FLAG_GHOST: u32 = 1 << 4;

/// Per-body render data read by the JavaScript painter.
/// 8 floats = 32 bytes stride. Positions and radius are screen pixels.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// `FLAG_*` bits, stored as a float.
    pub flags: f32,
    pub _pad: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// One end of a trace segment. Segments are stored as vertex pairs.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TraceVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl TraceVertex {
    pub const FLOATS: usize = 6;
}

/// Flat per-frame snapshot of everything the painter draws.
pub struct InstanceBuffer {
    pub bodies: Vec<BodyInstance>,
    pub traces: Vec<TraceVertex>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(64),
            traces: Vec::with_capacity(4096),
        }
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.traces.clear();
    }

    /// Rebuild from the published bodies as seen through `view`.
    /// `preview` replaces the drawn center/radius of the body it describes,
    /// or adds a ghost body when it has no id.
    pub fn rebuild(&mut self, state: &SimulationState, view: &View, preview: Option<&BodyInfo>) {
        self.clear();
        let sel = state.selection;
        let ppm = view.pixels_per_meter;

        for body in state.bodies.iter() {
            let (center, radius) = match preview {
                Some(info) if info.id == Some(body.id) => (info.center, info.radius),
                _ => (body.center, body.radius),
            };
            let mut flags = 0;
            if body.pinned {
                flags |= FLAG_PINNED;
            }
            if sel.selected == Some(body.id) {
                flags |= FLAG_SELECTED;
            }
            if sel.highlighted == Some(body.id) {
                flags |= FLAG_HIGHLIGHTED;
            }
            if sel.centered == Some(body.id) {
                flags |= FLAG_CENTERED;
            }
            let screen = view.world_to_screen(center);
            let [r, g, b] = body.color.to_f32();
            self.bodies.push(BodyInstance {
                x: screen.x as f32,
                y: screen.y as f32,
                radius: (radius * ppm) as f32,
                r,
                g,
                b,
                flags: flags as f32,
                _pad: 0.0,
            });
        }

        if let Some(info) = preview.filter(|info| info.id.is_none()) {
            let screen = view.world_to_screen(info.center);
            self.bodies.push(BodyInstance {
                x: screen.x as f32,
                y: screen.y as f32,
                radius: (info.radius * ppm) as f32,
                r: 1.0,
                g: 1.0,
                b: 1.0,
                flags: FLAG_GHOST as f32,
                _pad: 0.0,
            });
        }

        for id in state.traced_bodies() {
            let Some(body) = state.bodies.get(id) else {
                continue;
            };
            let n = body.trace.len();
            if n < 2 {
                continue;
            }
            let [r, g, b] = body.color.to_f32();
            let points: Vec<_> = body.trace.iter().map(|p| view.world_to_screen(*p)).collect();
            for (i, pair) in points.windows(2).enumerate() {
                // Older segments fade out.
                let a = (0.1 + 0.8 * i as f64 / (n - 1) as f64) as f32;
                for p in pair {
                    self.traces.push(TraceVertex { x: p.x as f32, y: p.y as f32, r, g, b, a });
                }
            }
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.bodies.len() as u32
    }

    /// Raw pointer to instance data for reads from JavaScript memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.bodies.as_ptr() as *const f32
    }

    pub fn trace_vertex_count(&self) -> u32 {
        self.traces.len() as u32
    }

    pub fn traces_ptr(&self) -> *const f32 {
        self.traces.as_ptr() as *const f32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
