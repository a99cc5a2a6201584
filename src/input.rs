//! Parsing of user-entered launch parameters.
//!
//! Text entered at the prompts is validated by [`parse_parameter`]. The
//! launch path never fails: [`parse_or_default`] substitutes the documented
//! default and logs why.

use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::constants::{
    DEFAULT_HEIGHT, DEFAULT_MASS, MAX_LAUNCH_HEIGHT, MAX_LAUNCH_MASS, MIN_LAUNCH_HEIGHT,
    MIN_LAUNCH_MASS,
};

/// Reasons a raw parameter string was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Nothing was entered.
    #[error("no value entered")]
    Empty,
    /// The text is not a plain decimal number.
    #[error("`{0}` is not a decimal number")]
    NotANumber(String),
    /// The number lies outside the accepted range.
    #[error("{value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Parsed value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

/// Accepted range and fallback for one launch parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    /// Name used in log messages.
    pub name: &'static str,
    /// Unit suffix used in log messages.
    pub unit: &'static str,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Value substituted for rejected input.
    pub default: f64,
}

/// Ball mass in kilograms.
pub const MASS: ParameterSpec = ParameterSpec {
    name: "mass",
    unit: "kg",
    min: MIN_LAUNCH_MASS,
    max: MAX_LAUNCH_MASS,
    default: DEFAULT_MASS,
};

/// Drop height in metres.
pub const HEIGHT: ParameterSpec = ParameterSpec {
    name: "height",
    unit: "m",
    min: MIN_LAUNCH_HEIGHT,
    max: MAX_LAUNCH_HEIGHT,
    default: DEFAULT_HEIGHT,
};

/// Parses `raw` as a number within `spec`'s range.
///
/// Only digits and a decimal point are accepted, matching what the prompt
/// lets a user type. Surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`InputError`] describing why the text was rejected.
///
/// # Examples
/// ```
/// use gravr::input::{parse_parameter, InputError, MASS};
/// assert_eq!(parse_parameter("0.5", &MASS), Ok(0.5));
/// assert_eq!(parse_parameter("", &MASS), Err(InputError::Empty));
/// assert!(parse_parameter("-1", &MASS).is_err());
/// ```
pub fn parse_parameter(raw: &str, spec: &ParameterSpec) -> Result<f64, InputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    if !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(InputError::NotANumber(text.to_owned()));
    }
    let value: f64 = text
        .parse()
        .map_err(|_| InputError::NotANumber(text.to_owned()))?;
    if (spec.min..=spec.max).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange {
            value,
            min: spec.min,
            max: spec.max,
        })
    }
}

/// Parses `raw`, falling back to `spec.default` when it is rejected or
/// absent.
#[must_use]
pub fn parse_or_default(raw: Option<&str>, spec: &ParameterSpec) -> f64 {
    let Some(text) = raw else {
        return spec.default;
    };
    parse_parameter(text, spec).unwrap_or_else(|err| {
        warn!(
            "invalid {} ({err}), using default {} {}",
            spec.name, spec.default, spec.unit
        );
        spec.default
    })
}

/// Validated initial conditions for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaunchParams {
    /// Ball mass in kilograms.
    pub mass: f64,
    /// Drop height in metres.
    pub height: f64,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl LaunchParams {
    /// Builds launch parameters from raw prompt answers.
    #[must_use]
    pub fn from_raw(mass: Option<&str>, height: Option<&str>) -> Self {
        Self {
            mass: parse_or_default(mass, &MASS),
            height: parse_or_default(height, &HEIGHT),
        }
    }

    /// Named ball type matching the mass.
    #[must_use]
    pub fn ball_kind(&self) -> BallKind {
        BallKind::from_mass(self.mass)
    }
}

/// Everyday ball whose mass is closest to the simulated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BallKind {
    /// Up to 3 g.
    PingPong,
    /// Up to 50 g.
    Racquet,
    /// Up to 65 g.
    Tennis,
    /// Up to 160 g.
    Baseball,
    /// Up to 500 g.
    Soccer,
    /// Up to 700 g.
    Basketball,
    /// Up to 8 kg.
    Bowling,
    /// Up to 20 kg.
    LightMedicine,
    /// Up to 50 kg.
    HeavyMedicine,
    /// Up to 100 kg.
    Industrial,
    /// Anything heavier.
    ExtremelyHeavy,
}

impl BallKind {
    /// Classifies a mass in kilograms.
    ///
    /// # Examples
    /// ```
    /// use gravr::BallKind;
    /// assert_eq!(BallKind::from_mass(0.056), BallKind::Tennis);
    /// assert_eq!(BallKind::from_mass(150.0), BallKind::ExtremelyHeavy);
    /// ```
    #[must_use]
    pub fn from_mass(mass: f64) -> Self {
        const TABLE: [(f64, BallKind); 10] = [
            (0.003, BallKind::PingPong),
            (0.05, BallKind::Racquet),
            (0.065, BallKind::Tennis),
            (0.16, BallKind::Baseball),
            (0.5, BallKind::Soccer),
            (0.7, BallKind::Basketball),
            (8.0, BallKind::Bowling),
            (20.0, BallKind::LightMedicine),
            (50.0, BallKind::HeavyMedicine),
            (100.0, BallKind::Industrial),
        ];
        TABLE
            .iter()
            .find(|(limit, _)| mass <= *limit)
            .map_or(Self::ExtremelyHeavy, |(_, kind)| *kind)
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PingPong => "ping pong",
            Self::Racquet => "racquet ball",
            Self::Tennis => "tennis ball",
            Self::Baseball => "baseball",
            Self::Soccer => "soccer ball",
            Self::Basketball => "basketball",
            Self::Bowling => "bowling ball",
            Self::LightMedicine => "light medicine ball",
            Self::HeavyMedicine => "heavy medicine ball",
            Self::Industrial => "industrial ball",
            Self::ExtremelyHeavy => "extremely heavy / undefined ball",
        }
    }
}
