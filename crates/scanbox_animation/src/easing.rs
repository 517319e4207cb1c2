//! Easing functions for tweens

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0).
    /// Input outside the range is clamped.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => ease_in(t, 2),
            Easing::EaseOutQuad => ease_out(t, 2),
            Easing::EaseInOutQuad => ease_in_out(t, 2),
            Easing::EaseInCubic => ease_in(t, 3),
            Easing::EaseOutCubic => ease_out(t, 3),
            Easing::EaseInOutCubic => ease_in_out(t, 3),
            Easing::EaseInQuart => ease_in(t, 4),
            Easing::EaseOutQuart => ease_out(t, 4),
            Easing::EaseInOutQuart => ease_in_out(t, 4),
        }
    }

    /// Parse a GSAP-style ease name.
    ///
    /// `power1` is quadratic, `power2` cubic and `power3` quartic; a bare
    /// `powerN` means `powerN.out`. `none`, `linear` and `power0` are linear.
    pub fn from_name(name: &str) -> Option<Easing> {
        let name = name.trim();
        let (family, mode) = name.split_once('.').unwrap_or((name, "out"));

        let degree = match family {
            "none" | "linear" | "power0" => return Some(Easing::Linear),
            "power1" | "quad" => 2,
            "power2" | "cubic" => 3,
            "power3" | "quart" => 4,
            _ => return None,
        };

        let easing = match (degree, mode) {
            (2, "in") => Easing::EaseInQuad,
            (2, "out") => Easing::EaseOutQuad,
            (2, "inOut") => Easing::EaseInOutQuad,
            (3, "in") => Easing::EaseInCubic,
            (3, "out") => Easing::EaseOutCubic,
            (3, "inOut") => Easing::EaseInOutCubic,
            (4, "in") => Easing::EaseInQuart,
            (4, "out") => Easing::EaseOutQuart,
            (4, "inOut") => Easing::EaseInOutQuart,
            _ => return None,
        };
        Some(easing)
    }
}

#[inline]
fn ease_in(t: f32, degree: i32) -> f32 {
    t.powi(degree)
}

#[inline]
fn ease_out(t: f32, degree: i32) -> f32 {
    1.0 - (1.0 - t).powi(degree)
}

#[inline]
fn ease_in_out(t: f32, degree: i32) -> f32 {
    if t < 0.5 {
        // 2^(n-1) * t^n
        (2.0f32).powi(degree - 1) * t.powi(degree)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(degree) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 10] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?}");
        }
    }

    #[test]
    fn test_in_out_is_symmetric_at_midpoint() {
        for easing in [
            Easing::EaseInOutQuad,
            Easing::EaseInOutCubic,
            Easing::EaseInOutQuart,
        ] {
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-6, "{easing:?}");
        }
    }

    #[test]
    fn test_out_curves_lead_in_curves() {
        assert!(Easing::EaseOutCubic.apply(0.25) > 0.25);
        assert!(Easing::EaseInCubic.apply(0.25) < 0.25);
        assert_eq!(Easing::EaseInCubic.apply(0.5), 0.125);
    }

    #[test]
    fn test_out_of_range_input_clamps() {
        assert_eq!(Easing::EaseOutQuad.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseOutQuad.apply(3.0), 1.0);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Easing::from_name("power2.out"), Some(Easing::EaseOutCubic));
        assert_eq!(Easing::from_name("power2.in"), Some(Easing::EaseInCubic));
        assert_eq!(
            Easing::from_name("power2.inOut"),
            Some(Easing::EaseInOutCubic)
        );
        assert_eq!(Easing::from_name("power1"), Some(Easing::EaseOutQuad));
        assert_eq!(Easing::from_name("power3.in"), Some(Easing::EaseInQuart));
        assert_eq!(Easing::from_name("none"), Some(Easing::Linear));
        assert_eq!(Easing::from_name(" linear "), Some(Easing::Linear));
        assert_eq!(Easing::from_name("power2.sideways"), None);
        assert_eq!(Easing::from_name("elastic.out"), None);
    }
}
