mod vec3;

pub use vec3::Vec3;

/// Common math constants
pub mod consts {
    /// A small epsilon value for floating point comparisons
    pub const EPSILON: f32 = 1e-6;

    /// Vectors shorter than this are treated as zero when normalizing
    pub const NORMALIZE_EPSILON: f32 = 1e-4;
}

/// Utility functions
pub mod utils {
    /// Clamps a value to the range [min, max]
    #[inline]
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        value.max(min).min(max)
    }

    /// Clamps a coefficient (restitution, friction) to [0, 1]
    #[inline]
    pub fn unit_clamp(value: f32) -> f32 {
        clamp(value, 0.0, 1.0)
    }

    /// Returns true if two floats are approximately equal
    #[inline]
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }
}
