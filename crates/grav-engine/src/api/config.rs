use crate::api::types::{ForceLaw, MassFormula};

/// Engine-level configuration. Fixed for the lifetime of a sandbox.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Scheduler period in seconds (default: 1/30).
    pub fixed_dt: f64,
    /// Integrator sub-steps per scheduled tick (default: 5).
    pub split_count: u32,
    /// Initial viewport width in pixels.
    pub viewport_width: f64,
    /// Initial viewport height in pixels.
    pub viewport_height: f64,
    /// Multiplicative factor per wheel notch, for zoom and mass scaling (default: 1.1).
    pub zoom_step: f64,
    /// Create-drags shorter than this (in pixels) are discarded.
    pub min_create_radius_px: f64,
    /// Velocity set per meter dragged in velocity mode (1/s).
    pub velocity_scale: f64,
    /// Seed for cosmetic color generation.
    pub rng_seed: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 30.0,
            split_count: 5,
            viewport_width: 800.0,
            viewport_height: 600.0,
            zoom_step: 1.1,
            min_create_radius_px: 5.0,
            velocity_scale: 1.0,
            rng_seed: 42,
        }
    }
}

/// Which traces the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceDisplay {
    None,
    /// Only the selected and highlighted bodies.
    #[default]
    Selected,
    All,
}

impl TraceDisplay {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(TraceDisplay::None),
            "selected" => Some(TraceDisplay::Selected),
            "all" => Some(TraceDisplay::All),
            _ => None,
        }
    }
}

/// Physics settings read by every tick and editable between ticks.
///
/// Numeric fields that come from text inputs are stored as the raw text and
/// parsed on use, so a half-typed value never crashes the sandbox.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub gravitational_constant: String,
    pub force_law: ForceLaw,
    pub confined_box: bool,
    pub trace_length: String,
    pub trace_display: TraceDisplay,
    pub mass_formula: MassFormula,
    /// Density for the active formula, or the mass itself for `Fixed`.
    pub mass_value: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: "6.67430e-1".to_string(),
            force_law: ForceLaw::InverseSquare,
            confined_box: false,
            trace_length: "500".to_string(),
            trace_display: TraceDisplay::Selected,
            mass_formula: MassFormula::VolumeDensity,
            mass_value: "10".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Parsed gravitational constant, or `None` when the text is not a finite number.
    pub fn gravity(&self) -> Option<f64> {
        parse_finite(&self.gravitational_constant)
    }

    /// Parsed trace bound; anything unparsable means no trace.
    pub fn trace_len(&self) -> usize {
        parse_count(&self.trace_length)
    }

    /// Parsed density/mass value; falls back to 1 when missing or not positive.
    pub fn mass_value(&self) -> f64 {
        parse_positive_or(&self.mass_value, 1.0)
    }
}

/// Lenient float parse: the longest leading decimal number is used
/// ("6.67e-1 N" → 0.667) and NaN or infinities are rejected.
pub fn parse_finite(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let end = numeric_prefix_len(trimmed.as_bytes());
    if end == 0 {
        return None;
    }
    trimmed[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Length of the leading `[+-]digits[.digits][e[+-]digits]` run, or 0 when
/// there is no mantissa digit. A dangling exponent marker is left out.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;
    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        mantissa_digits += frac_end - (i + 1);
        i = frac_end;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    i
}

/// Parse a strictly positive finite number or return `fallback`.
pub fn parse_positive_or(text: &str, fallback: f64) -> f64 {
    parse_finite(text).filter(|v| *v > 0.0).unwrap_or(fallback)
}

/// Parse a non-negative count. Leading integer digits are accepted
/// ("120 ticks" → 120); anything else yields 0.
pub fn parse_count(text: &str) -> usize {
    let trimmed = text.trim();
    let digits: &str = match trimmed.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &trimmed[..end],
        None => trimmed,
    };
    digits.parse().unwrap_or(0)
}
