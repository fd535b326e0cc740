//! Short-range boost dash towards a point fixed at activation

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thirdperson_core::vinterp_to;
use tracing::debug;

use crate::host::CharacterHost;

/// Distance from the end target at which a dash counts as arrived
pub const BOOST_ARRIVAL_DISTANCE: f32 = 50.0;

/// Boost configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostConfig {
    /// Travel distance along the forward vector
    pub distance: f32,
    /// Interpolation speed towards the end target
    pub speed: f32,
    /// Dash duration in seconds. Reserved; arrival and collision end the dash
    pub time: f32,
    /// Scale the vertical component of the end target by `distance` too.
    ///
    /// Off by default: the end target's height is the current height plus the
    /// raw vertical component of the forward vector.
    pub scale_vertical: bool,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            distance: 600.0,
            speed: 20.0,
            time: 1.0,
            scale_vertical: false,
        }
    }
}

/// Dash state machine: idle, or travelling towards `end_target`
#[derive(Debug, Clone, Default)]
pub struct BoostController {
    /// Configuration
    pub config: BoostConfig,
    /// Whether a dash is in progress
    is_boosting: bool,
    /// World-space destination of the current dash
    end_target: Vec3,
}

impl BoostController {
    /// Create a boost controller with custom config
    pub fn with_config(config: BoostConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Check if a dash is in progress
    pub fn is_boosting(&self) -> bool {
        self.is_boosting
    }

    /// Destination of the current (or last) dash
    pub fn end_target(&self) -> Vec3 {
        self.end_target
    }

    /// Begin a dash from the host's current location. Returns `false` and
    /// leaves the end target untouched if a dash is already in progress.
    pub fn start<H: CharacterHost + ?Sized>(&mut self, host: &H) -> bool {
        if self.is_boosting {
            return false;
        }

        let location = host.location();
        let forward = host.forward_vector();

        let mut target = location + forward * self.config.distance;
        target.z = if self.config.scale_vertical {
            location.z + forward.z * self.config.distance
        } else {
            forward.z + location.z
        };

        self.end_target = target;
        self.is_boosting = true;
        debug!(?location, ?target, "Boost started");
        true
    }

    /// Advance the dash by one frame.
    ///
    /// A blocking hit aborts the dash before the arrival check runs.
    pub fn tick<H: CharacterHost + ?Sized>(&mut self, host: &mut H, dt: f32) {
        if !self.is_boosting {
            return;
        }

        let next = vinterp_to(host.location(), self.end_target, dt, self.config.speed);
        let result = host.sweep_to(next);
        if result.blocking_hit {
            self.is_boosting = false;
            debug!(location = ?result.location, "Boost blocked");
        }

        self.check_arrival(host.location());
    }

    /// End the dash if `location` is within arrival distance of the end target
    pub fn check_arrival(&mut self, location: Vec3) {
        if self.is_boosting && location.distance(self.end_target) < BOOST_ARRIVAL_DISTANCE {
            self.is_boosting = false;
            debug!(?location, "Boost arrived");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockHost;
    use thirdperson_core::Rotator;

    #[test]
    fn test_start_computes_end_target() {
        let mut host = MockHost::new();
        host.location = Vec3::new(100.0, 50.0, 90.0);
        host.rotation = Rotator::new(30.0, 0.0, 0.0);

        let mut boost = BoostController::default();
        assert!(boost.start(&host));
        assert!(boost.is_boosting());

        let forward = host.rotation.forward_vector();
        let target = boost.end_target();
        assert!((target.x - (100.0 + forward.x * 600.0)).abs() < 1e-3);
        assert!((target.y - 50.0).abs() < 1e-3);
        // Height keeps the unscaled forward component
        assert!((target.z - (90.0 + forward.z)).abs() < 1e-3);
    }

    #[test]
    fn test_scaled_vertical_target() {
        let mut host = MockHost::new();
        host.rotation = Rotator::new(30.0, 0.0, 0.0);

        let mut boost = BoostController::with_config(BoostConfig {
            scale_vertical: true,
            ..Default::default()
        });
        boost.start(&host);
        assert!((boost.end_target().z - 300.0).abs() < 1e-2);
    }

    #[test]
    fn test_start_while_boosting_is_dropped() {
        let mut host = MockHost::new();
        let mut boost = BoostController::default();
        boost.start(&host);
        let first = boost.end_target();

        host.rotation = Rotator::from_yaw(90.0);
        host.location = Vec3::new(10.0, 10.0, 0.0);
        assert!(!boost.start(&host));
        assert_eq!(boost.end_target(), first);
    }

    #[test]
    fn test_dash_closes_distance_until_arrival() {
        let mut host = MockHost::new();
        let dt = host.delta;
        let mut boost = BoostController::default();
        boost.start(&host);
        let target = boost.end_target();

        let mut last_distance = host.location.distance(target);
        let mut frames = 0;
        while boost.is_boosting() {
            boost.tick(&mut host, dt);
            let distance = host.location.distance(target);
            assert!(distance < last_distance);
            last_distance = distance;
            frames += 1;
            assert!(frames < 100, "dash never arrived");
        }
        assert!(last_distance < BOOST_ARRIVAL_DISTANCE);
        assert_eq!(frames, 7);
    }

    #[test]
    fn test_arrival_distance_is_strict() {
        let mut host = MockHost::new();
        host.location = Vec3::ZERO;
        host.rotation = Rotator::ZERO;
        let mut boost = BoostController::default();
        boost.start(&host);
        assert_eq!(boost.end_target(), Vec3::new(600.0, 0.0, 0.0));

        // Exactly at arrival distance keeps dashing
        boost.check_arrival(Vec3::new(550.0, 0.0, 0.0));
        assert!(boost.is_boosting());

        boost.check_arrival(Vec3::new(550.1, 0.0, 0.0));
        assert!(!boost.is_boosting());
    }

    #[test]
    fn test_blocking_hit_aborts_dash() {
        let mut host = MockHost::new();
        host.wall_x = Some(300.0);
        let dt = host.delta;
        let mut boost = BoostController::default();
        boost.start(&host);

        boost.tick(&mut host, dt);
        assert!(boost.is_boosting());

        boost.tick(&mut host, dt);
        assert!(!boost.is_boosting());
        assert_eq!(host.location.x, 300.0);

        // Idle dashes do not move the host
        boost.tick(&mut host, dt);
        assert_eq!(host.location.x, 300.0);
    }
}
