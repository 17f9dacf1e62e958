//! Easing curves for tween interpolation.
//!
//! An [`Easing`] maps a normalized time `t` in `[0, 1]` to a normalized
//! progress value. Every curve starts at 0 and ends at 1; `Back` and `Elastic`
//! overshoot in between.
//!
//! Each curve family is defined once by its "in" shape. The other modes are
//! derived from it:
//! - out(t) = 1 - in(1 - t)
//! - in_out(t) = in(2t) / 2 for the first half, mirrored out for the second
//! - out_in(t) = out(2t) / 2 for the first half, in for the second
//!
//! Curves are addressable by name (`"InQuad"`, `"OutInElastic"`, ...) so
//! configuration documents can select them.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SpriteFlowError;

/// Easing functions for smooth interpolation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant speed (no easing).
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    OutInQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    OutInCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    OutInQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    OutInQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    OutInExpo,
    InSine,
    OutSine,
    InOutSine,
    OutInSine,
    InCirc,
    OutCirc,
    InOutCirc,
    OutInCirc,
    InBack,
    OutBack,
    InOutBack,
    OutInBack,
    InBounce,
    OutBounce,
    InOutBounce,
    OutInBounce,
    InElastic,
    OutElastic,
    InOutElastic,
    OutInElastic,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Curve {
    Quad,
    Cubic,
    Quart,
    Quint,
    Expo,
    Sine,
    Circ,
    Back,
    Bounce,
    Elastic,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    In,
    Out,
    InOut,
    OutIn,
}

const BACK_OVERSHOOT: f32 = 1.70158;

impl Curve {
    fn ease_in(self, t: f32) -> f32 {
        match self {
            Curve::Quad => t * t,
            Curve::Cubic => t * t * t,
            Curve::Quart => t * t * t * t,
            Curve::Quint => t * t * t * t * t,
            Curve::Expo => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * (t - 1.0))
                }
            }
            Curve::Sine => 1.0 - (t * PI / 2.0).cos(),
            Curve::Circ => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Curve::Back => t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT),
            Curve::Bounce => 1.0 - bounce_out(1.0 - t),
            Curve::Elastic => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    let c4 = (2.0 * PI) / 3.0;
                    -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * c4).sin()
                }
            }
        }
    }

    fn ease_out(self, t: f32) -> f32 {
        1.0 - self.ease_in(1.0 - t)
    }

    fn apply(self, mode: Mode, t: f32) -> f32 {
        match mode {
            Mode::In => self.ease_in(t),
            Mode::Out => self.ease_out(t),
            Mode::InOut => {
                if t < 0.5 {
                    self.ease_in(2.0 * t) / 2.0
                } else {
                    0.5 + self.ease_out(2.0 * t - 1.0) / 2.0
                }
            }
            Mode::OutIn => {
                if t < 0.5 {
                    self.ease_out(2.0 * t) / 2.0
                } else {
                    0.5 + self.ease_in(2.0 * t - 1.0) / 2.0
                }
            }
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

impl Easing {
    /// Every catalog entry, in declaration order.
    pub const ALL: [Easing; 41] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::OutInQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::OutInCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::OutInQuart,
        Easing::InQuint,
        Easing::OutQuint,
        Easing::InOutQuint,
        Easing::OutInQuint,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::InOutExpo,
        Easing::OutInExpo,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::OutInSine,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutCirc,
        Easing::OutInCirc,
        Easing::InBack,
        Easing::OutBack,
        Easing::InOutBack,
        Easing::OutInBack,
        Easing::InBounce,
        Easing::OutBounce,
        Easing::InOutBounce,
        Easing::OutInBounce,
        Easing::InElastic,
        Easing::OutElastic,
        Easing::InOutElastic,
        Easing::OutInElastic,
    ];

    /// Apply the curve to a normalized time value.
    ///
    /// `t` is clamped to `[0, 1]`; the endpoints map exactly to 0 and 1.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self.split() {
            None => t,
            Some((curve, mode)) => curve.apply(mode, t),
        }
    }

    /// Catalog name, as used in configuration documents.
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::InQuad => "InQuad",
            Easing::OutQuad => "OutQuad",
            Easing::InOutQuad => "InOutQuad",
            Easing::OutInQuad => "OutInQuad",
            Easing::InCubic => "InCubic",
            Easing::OutCubic => "OutCubic",
            Easing::InOutCubic => "InOutCubic",
            Easing::OutInCubic => "OutInCubic",
            Easing::InQuart => "InQuart",
            Easing::OutQuart => "OutQuart",
            Easing::InOutQuart => "InOutQuart",
            Easing::OutInQuart => "OutInQuart",
            Easing::InQuint => "InQuint",
            Easing::OutQuint => "OutQuint",
            Easing::InOutQuint => "InOutQuint",
            Easing::OutInQuint => "OutInQuint",
            Easing::InExpo => "InExpo",
            Easing::OutExpo => "OutExpo",
            Easing::InOutExpo => "InOutExpo",
            Easing::OutInExpo => "OutInExpo",
            Easing::InSine => "InSine",
            Easing::OutSine => "OutSine",
            Easing::InOutSine => "InOutSine",
            Easing::OutInSine => "OutInSine",
            Easing::InCirc => "InCirc",
            Easing::OutCirc => "OutCirc",
            Easing::InOutCirc => "InOutCirc",
            Easing::OutInCirc => "OutInCirc",
            Easing::InBack => "InBack",
            Easing::OutBack => "OutBack",
            Easing::InOutBack => "InOutBack",
            Easing::OutInBack => "OutInBack",
            Easing::InBounce => "InBounce",
            Easing::OutBounce => "OutBounce",
            Easing::InOutBounce => "InOutBounce",
            Easing::OutInBounce => "OutInBounce",
            Easing::InElastic => "InElastic",
            Easing::OutElastic => "OutElastic",
            Easing::InOutElastic => "InOutElastic",
            Easing::OutInElastic => "OutInElastic",
        }
    }

    fn split(self) -> Option<(Curve, Mode)> {
        use Curve::*;
        use Mode::*;
        let pair = match self {
            Easing::Linear => return None,
            Easing::InQuad => (Quad, In),
            Easing::OutQuad => (Quad, Out),
            Easing::InOutQuad => (Quad, InOut),
            Easing::OutInQuad => (Quad, OutIn),
            Easing::InCubic => (Cubic, In),
            Easing::OutCubic => (Cubic, Out),
            Easing::InOutCubic => (Cubic, InOut),
            Easing::OutInCubic => (Cubic, OutIn),
            Easing::InQuart => (Quart, In),
            Easing::OutQuart => (Quart, Out),
            Easing::InOutQuart => (Quart, InOut),
            Easing::OutInQuart => (Quart, OutIn),
            Easing::InQuint => (Quint, In),
            Easing::OutQuint => (Quint, Out),
            Easing::InOutQuint => (Quint, InOut),
            Easing::OutInQuint => (Quint, OutIn),
            Easing::InExpo => (Expo, In),
            Easing::OutExpo => (Expo, Out),
            Easing::InOutExpo => (Expo, InOut),
            Easing::OutInExpo => (Expo, OutIn),
            Easing::InSine => (Sine, In),
            Easing::OutSine => (Sine, Out),
            Easing::InOutSine => (Sine, InOut),
            Easing::OutInSine => (Sine, OutIn),
            Easing::InCirc => (Circ, In),
            Easing::OutCirc => (Circ, Out),
            Easing::InOutCirc => (Circ, InOut),
            Easing::OutInCirc => (Circ, OutIn),
            Easing::InBack => (Back, In),
            Easing::OutBack => (Back, Out),
            Easing::InOutBack => (Back, InOut),
            Easing::OutInBack => (Back, OutIn),
            Easing::InBounce => (Bounce, In),
            Easing::OutBounce => (Bounce, Out),
            Easing::InOutBounce => (Bounce, InOut),
            Easing::OutInBounce => (Bounce, OutIn),
            Easing::InElastic => (Elastic, In),
            Easing::OutElastic => (Elastic, Out),
            Easing::InOutElastic => (Elastic, InOut),
            Easing::OutInElastic => (Elastic, OutIn),
        };
        Some(pair)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = SpriteFlowError;

    /// Resolve a catalog name. An empty name selects [`Easing::Linear`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Easing::Linear);
        }
        Easing::ALL
            .iter()
            .copied()
            .find(|e| e.name() == s)
            .ok_or_else(|| SpriteFlowError::UnknownEaseFunc(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_all_curves_hit_endpoints() {
        for e in Easing::ALL {
            assert!(approx_eq(e.apply(0.0), 0.0), "{e} at 0");
            assert!(approx_eq(e.apply(1.0), 1.0), "{e} at 1");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        for e in Easing::ALL {
            assert!(approx_eq(e.apply(-3.0), 0.0));
            assert!(approx_eq(e.apply(7.0), 1.0));
        }
    }

    #[test]
    fn test_linear_is_identity() {
        assert!(approx_eq(Easing::Linear.apply(0.25), 0.25));
        assert!(approx_eq(Easing::Linear.apply(0.5), 0.5));
    }

    #[test]
    fn test_quad_values() {
        assert!(approx_eq(Easing::InQuad.apply(0.5), 0.25));
        assert!(approx_eq(Easing::OutQuad.apply(0.5), 0.75));
        assert!(approx_eq(Easing::InOutQuad.apply(0.25), 0.125));
        assert!(approx_eq(Easing::InOutQuad.apply(0.75), 0.875));
    }

    #[test]
    fn test_symmetric_modes_pass_through_midpoint() {
        for e in Easing::ALL {
            if e.name().starts_with("InOut") || e.name().starts_with("OutIn") {
                assert!(approx_eq(e.apply(0.5), 0.5), "{e} at 0.5");
            }
        }
    }

    #[test]
    fn test_back_overshoots_below_zero() {
        assert!(Easing::InBack.apply(0.2) < 0.0);
        assert!(Easing::OutBack.apply(0.8) > 1.0);
    }

    #[test]
    fn test_bounce_out_stays_in_range() {
        let mut t = 0.0;
        while t <= 1.0 {
            let v = Easing::OutBounce.apply(t);
            assert!((-EPSILON..=1.0 + EPSILON).contains(&v));
            t += 0.01;
        }
    }

    #[test]
    fn test_parse_known_names() {
        assert_eq!("InQuad".parse::<Easing>().unwrap(), Easing::InQuad);
        assert_eq!(
            "OutInElastic".parse::<Easing>().unwrap(),
            Easing::OutInElastic
        );
        assert_eq!("".parse::<Easing>().unwrap(), Easing::Linear);
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "Wobble".parse::<Easing>().unwrap_err();
        assert!(matches!(err, SpriteFlowError::UnknownEaseFunc(name) if name == "Wobble"));
    }

    #[test]
    fn test_name_round_trips_through_parse() {
        for e in Easing::ALL {
            assert_eq!(e.name().parse::<Easing>().unwrap(), e);
        }
    }
}
