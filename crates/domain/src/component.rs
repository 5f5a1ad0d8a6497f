//! Component kinds — the device class a command targets.

use std::fmt;

/// Device class named by the `component` field of a payload.
///
/// Only [`Led`](Self::Led) drives a light zone. The other kinds are
/// recognized so they can be skipped explicitly instead of mis-routed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Led,
    Fan,
    Door,
    Switch,
    Other(String),
}

impl ComponentKind {
    /// Map a wire name onto a kind. Never fails: unknown names become
    /// [`Other`](Self::Other).
    #[must_use]
    pub fn from_wire(name: &str) -> Self {
        match name {
            "led" => Self::Led,
            "fan" => Self::Fan,
            "door" => Self::Door,
            "switch" => Self::Switch,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire name of the component.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Led => "led",
            Self::Fan => "fan",
            Self::Door => "door",
            Self::Switch => "switch",
            Self::Other(name) => name,
        }
    }

    /// Whether this component is handled by the light sync core.
    #[must_use]
    pub fn is_light(&self) -> bool {
        matches!(self, Self::Led)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_recognize_led() {
        assert_eq!(ComponentKind::from_wire("led"), ComponentKind::Led);
        assert!(ComponentKind::Led.is_light());
    }

    #[test]
    fn should_recognize_fan_without_treating_it_as_light() {
        let kind = ComponentKind::from_wire("fan");
        assert_eq!(kind, ComponentKind::Fan);
        assert!(!kind.is_light());
    }

    #[test]
    fn should_keep_unknown_component_name() {
        let kind = ComponentKind::from_wire("thermostat");
        assert_eq!(kind, ComponentKind::Other("thermostat".to_string()));
        assert_eq!(kind.to_string(), "thermostat");
    }

    #[test]
    fn should_not_match_led_case_insensitively() {
        assert!(!ComponentKind::from_wire("LED").is_light());
    }
}
