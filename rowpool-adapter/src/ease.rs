/// Exponential smoothing parameters for per-frame settling.
///
/// Each frame the adapter advances positions with
/// `alpha = min(rate_per_s * dt, 1)`. Repeated application converges
/// exponentially toward the target, so the motion is frame-rate independent
/// within reasonable bounds and follows targets that move mid-flight
/// (rows sliding to make room during a drag).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Smoothing {
    pub rate_per_s: f32,
}

impl Smoothing {
    pub fn new(rate_per_s: f32) -> Self {
        Self {
            rate_per_s: rate_per_s.max(0.0),
        }
    }

    /// Blend factor for a frame of `dt_ms`.
    pub fn alpha(&self, dt_ms: u64) -> f32 {
        (self.rate_per_s * dt_ms as f32 / 1000.0).clamp(0.0, 1.0)
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::new(10.0)
    }
}
