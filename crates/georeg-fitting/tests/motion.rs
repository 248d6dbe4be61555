use approx::assert_relative_eq;
use georeg_fitting::{
    FitError, MotionSe2PointSvd, MotionSe3PointCrossCovariance, MotionSe3PointSvd,
    MotionTransformPoint,
};
use georeg_geometry::{ops::det33, Se2, Se3};
use rand::{rngs::StdRng, Rng, SeedableRng};

const TEST_TOL_F64: f64 = 1e-8;
const TEST_TOL_F32: f32 = 1e-4;

fn random_points3(rng: &mut StdRng, n: usize) -> Vec<[f64; 3]> {
    (0..n)
        .map(|_| {
            [
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
            ]
        })
        .collect()
}

fn assert_se3_eq(actual: &Se3<f64>, expected: &Se3<f64>, tol: f64) {
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(actual.rotation[i][j], expected.rotation[i][j], epsilon = tol);
        }
        assert_relative_eq!(actual.translation[i], expected.translation[i], epsilon = tol);
    }
}

#[test]
fn se2_recovers_yaw_and_translation() -> Result<(), Box<dyn std::error::Error>> {
    let expected = Se2::new(5.0, -2.0, 0.3);
    let src = [
        [0.0, 0.0],
        [1.0, 0.0],
        [0.0, 1.0],
        [2.5, -1.0],
        [-3.0, 4.0],
    ];
    let mut dst = [[0.0; 2]; 5];
    expected.transform_points(&src, &mut dst);

    let motion = MotionSe2PointSvd::default().fit(&src, &dst)?;
    assert_relative_eq!(motion.yaw, 0.3, epsilon = 1e-6);
    assert_relative_eq!(motion.translation[0], 5.0, epsilon = 1e-6);
    assert_relative_eq!(motion.translation[1], -2.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn se3_recovers_random_transforms() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(42);
    let fitter = MotionSe3PointSvd::default();

    for _ in 0..10 {
        let expected = Se3::from_euler_xyz(
            rng.random_range(-3.0..3.0),
            rng.random_range(-1.5..1.5),
            rng.random_range(-3.0..3.0),
            [
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
            ],
        );
        let src = random_points3(&mut rng, 25);
        let dst: Vec<[f64; 3]> = src.iter().map(|p| expected.transform_point(p)).collect();

        let motion = fitter.fit(&src, &dst)?;
        assert_se3_eq(&motion, &expected, TEST_TOL_F64);
        assert_relative_eq!(det33(&motion.rotation), 1.0, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn se3_single_precision() -> Result<(), Box<dyn std::error::Error>> {
    let expected = Se3::<f32>::from_euler_xyz(0.2, -0.5, 1.1, [1.0, -3.0, 0.5]);
    let src: [[f32; 3]; 6] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 2.0, -1.0],
        [-2.0, 0.5, 1.5],
    ];
    let dst: Vec<[f32; 3]> = src.iter().map(|p| expected.transform_point(p)).collect();

    let motion = MotionSe3PointSvd::default().fit(&src, &dst)?;
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(
                motion.rotation[i][j],
                expected.rotation[i][j],
                epsilon = TEST_TOL_F32
            );
        }
        assert_relative_eq!(
            motion.translation[i],
            expected.translation[i],
            epsilon = TEST_TOL_F32
        );
    }
    Ok(())
}

#[test]
fn reflections_yield_proper_rotations() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(7);
    let fitter = MotionSe3PointSvd::default();

    // mirrored through the yz plane
    let src = random_points3(&mut rng, 12);
    let mirrored: Vec<[f64; 3]> = src.iter().map(|p| [-p[0], p[1], p[2]]).collect();
    let motion = fitter.fit(&src, &mirrored)?;
    assert_relative_eq!(det33(&motion.rotation), 1.0, epsilon = 1e-10);

    // coplanar points with a mirrored destination
    let planar: Vec<[f64; 3]> = src.iter().map(|p| [p[0], p[1], 0.0]).collect();
    let flipped: Vec<[f64; 3]> = planar.iter().map(|p| [p[1], p[0], 0.0]).collect();
    let motion = fitter.fit(&planar, &flipped)?;
    assert_relative_eq!(det33(&motion.rotation), 1.0, epsilon = 1e-10);

    // a coplanar set is still recovered exactly
    let expected = Se3::from_euler_xyz(0.4, 0.1, -0.9, [0.0, 1.0, 2.0]);
    let dst: Vec<[f64; 3]> = planar.iter().map(|p| expected.transform_point(p)).collect();
    let motion = fitter.fit(&planar, &dst)?;
    assert_se3_eq(&motion, &expected, TEST_TOL_F64);
    Ok(())
}

#[test]
fn quaternion_agrees_with_svd() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(434324);
    let expected = Se3::from_euler_xyz(-0.7, 0.35, 2.0, [5.0, 10.0, -6.0]);
    let src = random_points3(&mut rng, 30);
    let dst: Vec<[f64; 3]> = src
        .iter()
        .map(|p| {
            let q = expected.transform_point(p);
            [
                q[0] + rng.random_range(-0.01..0.01),
                q[1] + rng.random_range(-0.01..0.01),
                q[2] + rng.random_range(-0.01..0.01),
            ]
        })
        .collect();

    let svd = MotionSe3PointSvd::default().fit(&src, &dst)?;
    let quat = MotionSe3PointCrossCovariance::default().fit(&src, &dst)?;
    assert_se3_eq(&quat, &svd, TEST_TOL_F64);
    Ok(())
}

#[test]
fn mismatched_lengths_fail_first() {
    fn check<M: MotionTransformPoint<f64>>(fitter: &M, src: &[M::Point], dst: &[M::Point]) {
        assert!(matches!(
            fitter.fit(src, dst),
            Err(FitError::MismatchedLengths { .. })
        ));
    }

    // too few points on top of the mismatch, the mismatch is reported
    check(&MotionSe2PointSvd::default(), &[[0.0, 0.0]], &[]);
    check(
        &MotionSe3PointSvd::default(),
        &[[0.0, 0.0, 0.0]; 4],
        &[[0.0, 0.0, 0.0]; 5],
    );
    check(
        &MotionSe3PointCrossCovariance::default(),
        &[[0.0, 0.0, 0.0]; 2],
        &[[0.0, 0.0, 0.0]; 1],
    );
}

#[test]
fn non_finite_input_is_reported() {
    let src = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, f64::INFINITY, 0.0]];
    let err = MotionSe3PointSvd::default().fit(&src, &src);
    assert!(matches!(err, Err(FitError::Linalg(_))));
    assert!(!err.err().is_some_and(|e| e.is_fatal()));
}

#[test]
fn fitters_are_shareable_across_threads() -> Result<(), Box<dyn std::error::Error>> {
    let fitter = MotionSe2PointSvd::default();
    let src = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|k| {
                let fitter = &fitter;
                s.spawn(move || {
                    let motion = Se2::new(k as f64, 0.0, 0.1 * k as f64);
                    let dst: Vec<[f64; 2]> = src.iter().map(|p| motion.transform_point(p)).collect();
                    fitter.fit(&src, &dst).map(|m| (m, motion))
                })
            })
            .collect();

        for handle in handles {
            let Ok(Ok((fitted, expected))) = handle.join() else {
                panic!("fit failed");
            };
            assert_relative_eq!(fitted.yaw, expected.yaw, epsilon = 1e-10);
        }
    });
    Ok(())
}
