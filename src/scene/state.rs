use crate::error::SceneError;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Pose of the blimp plus its propeller phase. The composer draws from an
/// immutable copy; the application owns the one instance that changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlimpState {
    pub x: f32,
    pub z: f32,
    /// Degrees; positive turns clockwise seen from above.
    pub heading: f32,
    pub height: f32,
    /// Degrees, grows with every control step.
    pub propeller_angle: f32,
}

impl Default for BlimpState {
    fn default() -> Self {
        Self {
            x: 0.0,
            z: 0.0,
            heading: 90.0,
            height: 0.0,
            propeller_angle: 0.0,
        }
    }
}

/// One discrete user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    TurnLeft,
    TurnRight,
    Ascend,
    Descend,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::Forward,
        Control::TurnLeft,
        Control::TurnRight,
        Control::Ascend,
        Control::Descend,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Control::Forward => "forward",
            Control::TurnLeft => "left",
            Control::TurnRight => "right",
            Control::Ascend => "up",
            Control::Descend => "down",
        }
    }

    /// Parses a comma separated list such as `"forward,left,up"`. Blank entries are skipped.
    pub fn parse_list(list: &str) -> Result<Vec<Control>, SceneError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Control {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" | "w" => Ok(Control::Forward),
            "left" => Ok(Control::TurnLeft),
            "right" => Ok(Control::TurnRight),
            "up" | "ascend" => Ok(Control::Ascend),
            "down" | "descend" => Ok(Control::Descend),
            _ => Err(SceneError::UnknownInput(s.to_string())),
        }
    }
}

/// Increments applied by one control step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSteps {
    pub move_step: f32,
    pub turn_step: f32,
    pub climb_step: f32,
    pub propeller_step: f32,
}

impl Default for ControlSteps {
    fn default() -> Self {
        Self {
            move_step: 1.0,
            turn_step: 2.0,
            climb_step: 1.0,
            propeller_step: 2.0,
        }
    }
}

impl BlimpState {
    /// Unit vector in the xz-plane the blimp moves along: `(-sin h, cos h)`.
    pub fn forward_direction(&self) -> (f32, f32) {
        let (s, c) = self.heading.to_radians().sin_cos();
        (-s, c)
    }

    /// Applies one command. Every command also spins the propellers.
    pub fn apply(&mut self, control: Control, steps: &ControlSteps) {
        match control {
            Control::Forward => {
                let (dx, dz) = self.forward_direction();
                self.x += dx * steps.move_step;
                self.z += dz * steps.move_step;
            }
            Control::TurnLeft => self.heading -= steps.turn_step,
            Control::TurnRight => self.heading += steps.turn_step,
            Control::Ascend => self.height += steps.climb_step,
            Control::Descend => self.height -= steps.climb_step,
        }
        self.propeller_angle += steps.propeller_step;

        debug!(
            "{}: pos=({:.2}, {:.2}) heading={:.1} height={:.1} propeller={:.1}",
            control, self.x, self.z, self.heading, self.height, self.propeller_angle
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn at_heading(heading: f32) -> BlimpState {
        BlimpState {
            heading,
            ..Default::default()
        }
    }

    #[test]
    fn forward_follows_heading() {
        let steps = ControlSteps::default();
        for (heading, dx, dz) in [
            (0.0, 0.0, 1.0),
            (90.0, -1.0, 0.0),
            (180.0, 0.0, -1.0),
            (270.0, 1.0, 0.0),
        ] {
            let mut state = at_heading(heading);
            state.apply(Control::Forward, &steps);
            assert_relative_eq!(state.x, dx, epsilon = 1e-5);
            assert_relative_eq!(state.z, dz, epsilon = 1e-5);
            assert_eq!(state.heading, heading);
            assert_eq!(state.height, 0.0);
        }
    }

    #[test]
    fn each_control_changes_one_quantity_and_the_propeller() {
        let steps = ControlSteps::default();
        let start = BlimpState::default();

        let cases: [(Control, fn(&BlimpState) -> f32, f32); 4] = [
            (Control::TurnLeft, |s| s.heading, 88.0),
            (Control::TurnRight, |s| s.heading, 92.0),
            (Control::Ascend, |s| s.height, 1.0),
            (Control::Descend, |s| s.height, -1.0),
        ];
        for (control, field, expected) in cases {
            let mut state = start;
            state.apply(control, &steps);
            assert_relative_eq!(field(&state), expected);
            assert_relative_eq!(state.propeller_angle, 2.0);

            let mut rest = state;
            rest.propeller_angle = start.propeller_angle;
            match control {
                Control::TurnLeft | Control::TurnRight => rest.heading = start.heading,
                _ => rest.height = start.height,
            }
            assert_eq!(rest, start, "{} changed more than one field", control);
        }
    }

    #[test]
    fn repeated_steps_accumulate() {
        let steps = ControlSteps::default();
        let mut state = BlimpState::default();
        for _ in 0..45 {
            state.apply(Control::TurnRight, &steps);
        }
        assert_relative_eq!(state.heading, 180.0);
        assert_relative_eq!(state.propeller_angle, 90.0);
    }

    #[test]
    fn control_names_parse() {
        let list = Control::parse_list("forward, left,right,,UP,down").unwrap();
        assert_eq!(list, Control::ALL.to_vec());
        for control in Control::ALL {
            assert_eq!(control.name().parse::<Control>().unwrap(), control);
        }
        assert!(matches!(
            "sideways".parse::<Control>(),
            Err(SceneError::UnknownInput(name)) if name == "sideways"
        ));
    }
}
