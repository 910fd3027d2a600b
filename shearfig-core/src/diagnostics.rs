//! Derived flow diagnostics: vorticity, curvature, and the Fjørtoft criterion.
//!
//! Each diagnostic is a pure array transform over a parent
//! [`ShearProfile`]'s samples and has the same length as the profile.

use crate::ShearProfile;

/// Display scale applied to the first derivative when drawn as vorticity.
pub const VORTICITY_SCALE: f64 = 0.9;

/// Display scale applied to the Fjørtoft product.
pub const FJORTOFT_SCALE: f64 = 0.5;

/// Vorticity curve: the discrete gradient of v, rescaled for display.
#[must_use]
pub fn vorticity(profile: &ShearProfile) -> Vec<f64> {
    gradient(profile.v(), profile.x())
        .into_iter()
        .map(|dv_dx| dv_dx * VORTICITY_SCALE)
        .collect()
}

/// Curvature curve: the second discrete derivative of v.
///
/// The inner gradient is the unscaled first derivative; curvature is never
/// taken of the display-scaled vorticity.
#[must_use]
pub fn curvature(profile: &ShearProfile) -> Vec<f64> {
    gradient(&gradient(profile.v(), profile.x()), profile.x())
}

/// Fjørtoft criterion: curvature times the deviation of velocity from its
/// value at the midpoint sample, rescaled for display.
///
/// Exactly zero at the midpoint sample.
#[must_use]
pub fn fjortoft(profile: &ShearProfile) -> Vec<f64> {
    let reference = profile.midpoint_velocity();
    curvature(profile)
        .into_iter()
        .zip(profile.v())
        .map(|(d2v_dx2, &v)| d2v_dx2 * (v - reference) * FJORTOFT_SCALE)
        .collect()
}

/// Discrete gradient of `values` with respect to `coords`.
///
/// Central differences in the interior, one-sided differences at the
/// endpoints. Both slices must share a length of at least two;
/// [`ShearProfile`] guarantees this for its samples.
fn gradient(values: &[f64], coords: &[f64]) -> Vec<f64> {
    debug_assert_eq!(values.len(), coords.len());
    debug_assert!(values.len() >= 2);

    let len = values.len();
    let mut result = Vec::with_capacity(len);

    result.push((values[1] - values[0]) / (coords[1] - coords[0]));
    for i in 1..len - 1 {
        result.push((values[i + 1] - values[i - 1]) / (coords[i + 1] - coords[i - 1]));
    }
    result.push((values[len - 1] - values[len - 2]) / (coords[len - 1] - coords[len - 2]));

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn linear_profile(slope: f64) -> ShearProfile {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let v = x.iter().map(|x| 2.0 + slope * x).collect();
        ShearProfile::from_samples(x, v).expect("valid samples")
    }

    #[test]
    fn gradient_of_linear_data_is_the_slope_everywhere() {
        let profile = linear_profile(3.0);
        for dv_dx in gradient(profile.v(), profile.x()) {
            assert_relative_eq!(dv_dx, 3.0);
        }
    }

    #[test]
    fn gradient_of_quadratic_data_is_exact_in_the_interior() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let v: Vec<f64> = x.iter().map(|x| x * x).collect();

        // Central differences are exact for quadratics.
        let dv_dx = gradient(&v, &x);
        for i in 1..x.len() - 1 {
            assert_relative_eq!(dv_dx[i], 2.0 * x[i]);
        }
    }

    #[test]
    fn diagnostics_match_the_profile_length() {
        for profile in [ShearProfile::stable(), ShearProfile::unstable()] {
            assert_eq!(vorticity(&profile).len(), profile.len());
            assert_eq!(curvature(&profile).len(), profile.len());
            assert_eq!(fjortoft(&profile).len(), profile.len());
        }
    }

    #[test]
    fn vorticity_rescales_the_gradient() {
        let profile = linear_profile(2.0);
        for w in vorticity(&profile) {
            assert_relative_eq!(w, 2.0 * VORTICITY_SCALE);
        }
    }

    #[test]
    fn curvature_of_linear_data_vanishes() {
        let profile = linear_profile(4.0);
        for d2v_dx2 in curvature(&profile) {
            assert_relative_eq!(d2v_dx2, 0.0);
        }
    }

    #[test]
    fn curvature_changes_sign_across_the_inflection_point() {
        let stable = curvature(&ShearProfile::stable());
        assert!(stable[10] < 0.0);
        assert!(stable[189] > 0.0);

        let unstable = curvature(&ShearProfile::unstable());
        assert!(unstable[10] > 0.0);
        assert!(unstable[189] < 0.0);
    }

    #[test]
    fn fjortoft_vanishes_at_the_midpoint_sample() {
        for profile in [ShearProfile::stable(), ShearProfile::unstable()] {
            let criterion = fjortoft(&profile);
            assert_eq!(criterion[profile.midpoint_index()], 0.0);
        }
    }

    #[test]
    fn fjortoft_sign_separates_stable_from_unstable() {
        // Away from the inflection point the product is positive for the
        // stable profile and negative for the unstable one.
        let stable = fjortoft(&ShearProfile::stable());
        assert!(stable[10] > 0.0);
        assert!(stable[189] > 0.0);

        let unstable = fjortoft(&ShearProfile::unstable());
        assert!(unstable[10] < 0.0);
        assert!(unstable[189] < 0.0);
    }
}
