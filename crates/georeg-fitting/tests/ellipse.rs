use approx::assert_relative_eq;
use georeg_fitting::{EllipseFitParams, FitEllipseWeightedAlgebraic, FitError};
use georeg_geometry::{EllipseQuadratic, EllipseRotated};
use georeg_linalg::SvdParams;

const TEST_TOL_F64: f64 = 1e-8;
const OUTLIER: [f64; 2] = [20.0, 34.0];

const CONFIGS: [(f64, f64, f64, f64, f64); 4] = [
    (0.0, 0.0, 3.0, 1.5, 0.0),
    (1.0, 2.0, 3.0, 1.5, 0.0),
    (1.0, 2.0, 3.0, 1.5, 0.25),
    (0.0, 0.0, 3.0, 3.0, 0.0),
];

fn samples_with_outlier(ellipse: &EllipseRotated<f64>) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = (0..20)
        .map(|i| ellipse.point_at(i as f64 * std::f64::consts::TAU / 20.0))
        .collect();
    points.push(OUTLIER);
    points
}

fn weights_with_outlier(outlier: f64) -> Vec<f64> {
    let mut weights = vec![1.0; 20];
    weights.push(outlier);
    weights
}

fn coefficient_error(fitted: &EllipseQuadratic<f64>, expected: &EllipseQuadratic<f64>) -> f64 {
    fitted
        .normalized_by_f()
        .coefficients()
        .iter()
        .zip(expected.normalized_by_f().coefficients().iter())
        .map(|(a, b)| (a - b).abs())
        .sum()
}

#[test]
fn reproduces_sampled_ellipses() -> Result<(), FitError> {
    let fitter = FitEllipseWeightedAlgebraic::default();

    for (x0, y0, a, b, phi) in CONFIGS {
        let ellipse = EllipseRotated::new(x0, y0, a, b, phi);
        let points = samples_with_outlier(&ellipse);
        let weights = weights_with_outlier(0.0);

        let fitted = fitter.fit(&points, &weights)?.normalized_by_f();
        let expected = ellipse.to_quadratic().normalized_by_f();
        for (f, e) in fitted.coefficients().iter().zip(expected.coefficients().iter()) {
            assert_relative_eq!(*f, *e, epsilon = TEST_TOL_F64);
        }
    }
    Ok(())
}

#[test]
fn zero_weight_equals_omission() -> Result<(), FitError> {
    let fitter = FitEllipseWeightedAlgebraic::default();
    let ellipse = EllipseRotated::new(1.0, 2.0, 3.0, 1.5, 0.25);

    let with_outlier = samples_with_outlier(&ellipse);
    let fitted = fitter.fit(&with_outlier, &weights_with_outlier(0.0))?;

    let without = &with_outlier[..20];
    let omitted = fitter.fit(without, &vec![1.0; 20])?;

    let fitted = fitted.normalized_by_f().coefficients();
    let omitted = omitted.normalized_by_f().coefficients();
    for (f, o) in fitted.iter().zip(omitted.iter()) {
        assert_relative_eq!(*f, *o, epsilon = 1e-10);
    }
    Ok(())
}

#[test]
fn outlier_weight_increases_error() -> Result<(), FitError> {
    let fitter = FitEllipseWeightedAlgebraic::default();

    for (x0, y0, a, b, phi) in CONFIGS {
        let ellipse = EllipseRotated::new(x0, y0, a, b, phi);
        let expected = ellipse.to_quadratic();
        let points = samples_with_outlier(&ellipse);

        let mut previous = -1.0;
        for outlier in [0.0, 0.1, 0.5, 2.0] {
            let fitted = fitter.fit(&points, &weights_with_outlier(outlier))?;
            let error = coefficient_error(&fitted, &expected);
            assert!(
                error > previous,
                "error {error} for weight {outlier} is not above {previous}"
            );
            previous = error;
        }
    }
    Ok(())
}

#[test]
fn collinear_points_are_degenerate() {
    let points: Vec<[f64; 2]> = (0..8).map(|i| [0.5 * i as f64, 1.0 - 0.25 * i as f64]).collect();
    let weights = vec![1.0; points.len()];
    assert!(matches!(
        FitEllipseWeightedAlgebraic::default().fit(&points, &weights),
        Err(FitError::Degenerate(_))
    ));
}

#[test]
fn explicit_parameters() -> Result<(), FitError> {
    let fitter = FitEllipseWeightedAlgebraic::new(EllipseFitParams {
        svd: SvdParams { max_iterations: 0 },
    });
    let ellipse = EllipseRotated::new(-1.0f32, 0.5, 2.0, 1.0, 0.5);
    let points: Vec<[f32; 2]> = (0..16)
        .map(|i| ellipse.point_at(i as f32 * std::f32::consts::TAU / 16.0))
        .collect();
    let weights = vec![0.5f32; points.len()];

    let fitted = fitter.fit(&points, &weights)?;
    assert!(fitted.is_ellipse());
    for p in &points {
        let value = fitted.normalized_by_f().evaluate(p[0], p[1]);
        assert_relative_eq!(value, 0.0, epsilon = 1e-3);
    }
    Ok(())
}
