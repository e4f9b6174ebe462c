//! Interpolation configuration

/// Quaternion interpolation algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationMethod {
    /// Spherical interpolation, constant angular velocity
    #[default]
    Slerp,
    /// Normalized linear interpolation, cheapest
    Nlerp,
    /// Bisecting nlerp, approximates slerp to `dot_threshold`
    NlerpIterative,
}

/// How rotations are blended by [`crate::interpolate::blend`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpolationConfig {
    /// Interpolation algorithm
    pub method: InterpolationMethod,

    /// Bisection stops once `|dot|` of the bracketing quaternions reaches
    /// this value (only used by `NlerpIterative`)
    pub dot_threshold: f64,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            method: InterpolationMethod::Slerp,
            dot_threshold: 0.9999,
        }
    }
}

impl InterpolationConfig {
    /// Exact spherical interpolation
    pub fn precise() -> Self {
        Self::default()
    }

    /// Normalized linear interpolation (lower quality)
    pub fn fast() -> Self {
        Self {
            method: InterpolationMethod::Nlerp,
            ..Default::default()
        }
    }

    /// Iterative nlerp with the given dot product threshold
    pub fn iterative(dot_threshold: f64) -> Self {
        Self {
            method: InterpolationMethod::NlerpIterative,
            dot_threshold,
        }
    }

    /// Set interpolation method
    pub fn with_method(mut self, method: InterpolationMethod) -> Self {
        self.method = method;
        self
    }

    /// Set dot product threshold
    pub fn with_dot_threshold(mut self, dot_threshold: f64) -> Self {
        self.dot_threshold = dot_threshold;
        self
    }
}
