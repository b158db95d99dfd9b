// Pilot control vector and the gesture normalizer that feeds it.

/// Bounded stick/throttle state read by the physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlVector {
    pub roll: f32,     // -1..=1, right positive
    pub pitch: f32,    // -1..=1, stick pushed forward positive
    pub throttle: f32, // 0..=1
    pub yaw: f32,      // -1..=1 (rudder)
}

/// Raw gestures coming from a pointer, touch surface or slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Finger/pointer down on the joystick.
    StickPress,
    /// Offset from the joystick centre in surface units.
    StickMove { dx: f32, dy: f32 },
    /// Finger/pointer lifted or left the surface.
    StickRelease,
    Throttle(f32),
    Rudder(f32),
}

/// Converts gestures into a [`ControlVector`].
#[derive(Debug, Clone)]
pub struct ControlInput {
    radius: f32,
    stick_active: bool,
    controls: ControlVector,
}

impl ControlInput {
    /// `radius` is the joystick travel in the same units as `StickMove`.
    pub fn new(radius: f32) -> Self {
        Self {
            radius: if radius.is_finite() && radius > 0.0 {
                radius
            } else {
                1.0
            },
            stick_active: false,
            controls: ControlVector::default(),
        }
    }

    pub fn controls(&self) -> ControlVector {
        self.controls
    }

    pub fn apply(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::StickPress => self.stick_active = true,
            Gesture::StickMove { dx, dy } => {
                // Moves are only tracked while the stick is held.
                if !self.stick_active {
                    return;
                }
                let (x, y) = normalize_stick(dx, dy, self.radius);
                self.controls.roll = x;
                self.controls.pitch = y;
            }
            Gesture::StickRelease => {
                self.stick_active = false;
                self.controls.roll = 0.0;
                self.controls.pitch = 0.0;
            }
            Gesture::Throttle(value) => self.controls.throttle = sanitize(value).clamp(0.0, 1.0),
            Gesture::Rudder(value) => self.controls.yaw = sanitize(value).clamp(-1.0, 1.0),
        }
    }

    /// Recentres everything, e.g. when a new mission starts.
    pub fn reset(&mut self) {
        self.stick_active = false;
        self.controls = ControlVector::default();
    }
}

impl Default for ControlInput {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Clamps a stick offset to the joystick circle and scales it to [-1, 1].
pub fn normalize_stick(dx: f32, dy: f32, radius: f32) -> (f32, f32) {
    if !(radius.is_finite() && radius > 0.0) {
        return (0.0, 0.0);
    }
    let (mut dx, mut dy) = (sanitize(dx), sanitize(dy));
    let dist = (dx * dx + dy * dy).sqrt();
    if dist > radius {
        // Keep direction, cap magnitude at the rim.
        let angle = dy.atan2(dx);
        dx = angle.cos() * radius;
        dy = angle.sin() * radius;
    }
    ((dx / radius).clamp(-1.0, 1.0), (dy / radius).clamp(-1.0, 1.0))
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stick_offset_beyond_rim_is_clamped_to_unit_circle() {
        let (x, y) = normalize_stick(120.0, 160.0, 50.0);
        assert_relative_eq!(x, 0.6, epsilon = 1e-5);
        assert_relative_eq!(y, 0.8, epsilon = 1e-5);
    }

    #[test]
    fn stick_offset_inside_rim_scales_linearly() {
        let (x, y) = normalize_stick(-25.0, 10.0, 50.0);
        assert_relative_eq!(x, -0.5);
        assert_relative_eq!(y, 0.2);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut input = ControlInput::new(50.0);
        input.apply(Gesture::StickMove { dx: 50.0, dy: 0.0 });
        assert_eq!(input.controls().roll, 0.0);

        input.apply(Gesture::StickPress);
        input.apply(Gesture::StickMove { dx: 50.0, dy: 0.0 });
        assert_relative_eq!(input.controls().roll, 1.0);
    }

    #[test]
    fn release_recentres_stick_but_keeps_throttle() {
        let mut input = ControlInput::new(50.0);
        input.apply(Gesture::Throttle(0.7));
        input.apply(Gesture::StickPress);
        input.apply(Gesture::StickMove { dx: 10.0, dy: -20.0 });
        input.apply(Gesture::StickRelease);

        let controls = input.controls();
        assert_eq!(controls.roll, 0.0);
        assert_eq!(controls.pitch, 0.0);
        assert_relative_eq!(controls.throttle, 0.7);
    }

    #[test]
    fn out_of_range_and_non_finite_values_are_bounded() {
        let mut input = ControlInput::default();
        input.apply(Gesture::Throttle(3.0));
        assert_eq!(input.controls().throttle, 1.0);
        input.apply(Gesture::Throttle(f32::NAN));
        assert_eq!(input.controls().throttle, 0.0);
        input.apply(Gesture::Rudder(-9.0));
        assert_eq!(input.controls().yaw, -1.0);
    }
}
