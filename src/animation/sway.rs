/// Gentle bob and yaw of a planted flower
#[derive(Debug, Clone, Copy)]
pub struct Sway {
    /// Vertical travel either side of rest
    pub bob_amplitude: f32,
    /// Bob angular speed (rad/s)
    pub bob_speed: f32,
    /// Yaw swing either side of rest (radians)
    pub yaw_amplitude: f32,
    /// Yaw angular speed (rad/s)
    pub yaw_speed: f32,
}

impl Default for Sway {
    fn default() -> Self {
        Self {
            bob_amplitude: 0.05,
            bob_speed: 1.0,
            yaw_amplitude: 0.1,
            yaw_speed: 0.5,
        }
    }
}

impl Sway {
    /// Vertical offset at elapsed time `t`
    pub fn bob(&self, t: f32) -> f32 {
        (t * self.bob_speed).sin() * self.bob_amplitude
    }

    /// Yaw angle at elapsed time `t`
    pub fn yaw(&self, t: f32) -> f32 {
        (t * self.yaw_speed).sin() * self.yaw_amplitude
    }
}

/// Spin and breathing of the bouquet flowers
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    /// Continuous spin about Y (rad/s)
    pub spin_speed: f32,
    /// Breathing amplitude around unit scale
    pub amplitude: f32,
    /// Breathing angular speed (rad/s)
    pub speed: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            spin_speed: 0.3,
            amplitude: 0.1,
            speed: 2.0,
        }
    }
}

impl Pulse {
    pub fn spin(&self, t: f32) -> f32 {
        t * self.spin_speed
    }

    pub fn scale(&self, t: f32) -> f32 {
        1.0 + (t * self.speed).sin() * self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sway_at_rest() {
        let sway = Sway::default();
        assert_eq!(sway.bob(0.0), 0.0);
        assert_eq!(sway.yaw(0.0), 0.0);
    }

    #[test]
    fn test_sway_bounded() {
        let sway = Sway::default();
        for i in 0..1000 {
            let t = i as f32 * 0.037;
            assert!(sway.bob(t).abs() <= 0.05 + 1e-6);
            assert!(sway.yaw(t).abs() <= 0.1 + 1e-6);
        }
    }

    #[test]
    fn test_pulse_starts_at_unit_scale() {
        let pulse = Pulse::default();
        assert_eq!(pulse.scale(0.0), 1.0);
        // Peak of sin(2t) at t = pi/4
        assert!((pulse.scale(std::f32::consts::FRAC_PI_4) - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_pulse_breathes_around_one() {
        let pulse = Pulse::default();
        for i in 0..500 {
            let s = pulse.scale(i as f32 * 0.05);
            assert!((0.9 - 1e-6..=1.1 + 1e-6).contains(&s));
        }
    }
}
