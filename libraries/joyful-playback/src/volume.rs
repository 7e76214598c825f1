//! Linear volume level
//!
//! The engine takes a gain in 0.0-1.0 and applies it directly, so the level
//! is stored as-is. Out-of-range requests clamp, non-finite ones are ignored.

/// Volume level in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    level: f64,
}

impl Volume {
    /// Create new volume, clamped into range
    ///
    /// Non-finite input falls back to silence.
    pub fn new(level: f64) -> Self {
        Self {
            level: clamp_unit(level).unwrap_or(0.0),
        }
    }

    /// Set volume level
    ///
    /// Returns false when `level` is NaN/infinite and nothing changed.
    pub fn set_level(&mut self, level: f64) -> bool {
        match clamp_unit(level) {
            Some(level) => {
                self.level = level;
                true
            }
            None => false,
        }
    }

    /// Current level (0.0-1.0)
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Level as a whole percentage for display
    pub fn percent(&self) -> u8 {
        (self.level * 100.0).round() as u8
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.8)
    }
}

/// Clamp into 0.0-1.0, rejecting NaN and infinities
pub(crate) fn clamp_unit(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(0.8);
        assert_eq!(vol.level(), 0.8);
        assert_eq!(vol.percent(), 80);
    }

    #[test]
    fn set_volume_level_clamps() {
        let mut vol = Volume::new(0.5);

        assert!(vol.set_level(-0.5));
        assert_eq!(vol.level(), 0.0);

        assert!(vol.set_level(1.7));
        assert_eq!(vol.level(), 1.0);
    }

    #[test]
    fn non_finite_is_ignored() {
        let mut vol = Volume::new(0.3);

        assert!(!vol.set_level(f64::NAN));
        assert!(!vol.set_level(f64::INFINITY));
        assert_eq!(vol.level(), 0.3);

        assert_eq!(Volume::new(f64::NAN).level(), 0.0);
    }
}
