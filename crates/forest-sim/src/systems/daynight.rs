//! Day-night cycle driving sun and ambient light intensities.

use std::f64::consts::{PI, TAU};

use forest_core::constants::{INITIAL_AMBIENT_INTENSITY, INITIAL_SUN_INTENSITY};
use forest_core::math::denormalize;
use forest_core::state::LightingView;

/// Day phase and the light intensities derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayNight {
    /// When false the phase is frozen and intensities keep their initial values.
    pub enabled: bool,
    /// Phase angle in `[0, 2π)`. Night when above π.
    pub daytime: f64,
    pub sun_intensity: f64,
    pub ambient_intensity: f64,
}

impl DayNight {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            daytime: 0.0,
            sun_intensity: INITIAL_SUN_INTENSITY,
            ambient_intensity: INITIAL_AMBIENT_INTENSITY,
        }
    }

    pub fn is_night(&self) -> bool {
        self.daytime > PI
    }

    pub fn advance(&mut self, dt: f64, day_length_secs: f64) {
        if !self.enabled {
            return;
        }
        self.daytime = (self.daytime + dt * TAU / day_length_secs).rem_euclid(TAU);
        let d = self.daytime;
        let day = (d.sin() + 1.0) / 2.0;

        // A faint moon keeps the night from going fully dark.
        let moon = if self.is_night() {
            0.05 * ((2.0 * d - PI / 2.0).sin() + 1.0) / 2.0
        } else {
            0.0
        };
        self.sun_intensity = denormalize(day + moon, 0.0, 0.4);
        let ambient = if self.is_night() { 0.0 } else { day };
        self.ambient_intensity = denormalize(ambient, 0.2, 0.4);
    }

    pub fn view(&self) -> LightingView {
        LightingView {
            daytime: self.daytime,
            sun_intensity: self.sun_intensity,
            ambient_intensity: self.ambient_intensity,
        }
    }
}
