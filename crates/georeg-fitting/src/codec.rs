//! Bidirectional mappings between typed models and flat parameter vectors.
//!
//! The optimizer only sees `&[T]`; a codec fixes the order of the parameters. For every codec
//! `decode(&encode(m)) == m` holds exactly.

use georeg_geometry::{Affine2D, EllipseQuadratic, EllipseRotated, PlaneGeneral3D, Sphere3D};
use serde::{Deserialize, Serialize};

use crate::FitError;

/// Conversion between a model and its parameter vector.
pub trait ModelCodec<T: Copy> {
    /// The model type handled by the codec.
    type Model;

    /// Number of parameters of the model.
    const PARAM_LENGTH: usize;

    /// Encode the model into a new parameter vector of length [`ModelCodec::PARAM_LENGTH`].
    fn encode(&self, model: &Self::Model) -> Vec<T>;

    /// Decode a model from its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::ParameterLength`] if `params.len()` is not [`ModelCodec::PARAM_LENGTH`].
    fn decode(&self, params: &[T]) -> Result<Self::Model, FitError>;

    /// Encode the model into an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::ParameterLength`] if `params.len()` is not [`ModelCodec::PARAM_LENGTH`].
    fn encode_into(&self, model: &Self::Model, params: &mut [T]) -> Result<(), FitError> {
        check_length(params, Self::PARAM_LENGTH)?;
        params.copy_from_slice(&self.encode(model));
        Ok(())
    }
}

fn check_length<T>(params: &[T], expected: usize) -> Result<(), FitError> {
    if params.len() != expected {
        return Err(FitError::ParameterLength {
            expected,
            actual: params.len(),
        });
    }
    Ok(())
}

/// Sphere as `[cx, cy, cz, r]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecSphere3D;

impl<T: Copy> ModelCodec<T> for CodecSphere3D {
    type Model = Sphere3D<T>;
    const PARAM_LENGTH: usize = 4;

    fn encode(&self, model: &Sphere3D<T>) -> Vec<T> {
        let [x, y, z] = model.center;
        vec![x, y, z, model.radius]
    }

    fn decode(&self, params: &[T]) -> Result<Sphere3D<T>, FitError> {
        check_length(params, 4)?;
        Ok(Sphere3D {
            center: [params[0], params[1], params[2]],
            radius: params[3],
        })
    }
}

/// Plane as `[A, B, C, D]` of `A x + B y + C z + D = 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecPlaneGeneral3D;

impl<T: Copy> ModelCodec<T> for CodecPlaneGeneral3D {
    type Model = PlaneGeneral3D<T>;
    const PARAM_LENGTH: usize = 4;

    fn encode(&self, model: &PlaneGeneral3D<T>) -> Vec<T> {
        vec![model.a, model.b, model.c, model.d]
    }

    fn decode(&self, params: &[T]) -> Result<PlaneGeneral3D<T>, FitError> {
        check_length(params, 4)?;
        Ok(PlaneGeneral3D {
            a: params[0],
            b: params[1],
            c: params[2],
            d: params[3],
        })
    }
}

/// Conic as `[a, b, c, d, e, f]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecEllipseQuadratic;

impl<T: Copy> ModelCodec<T> for CodecEllipseQuadratic {
    type Model = EllipseQuadratic<T>;
    const PARAM_LENGTH: usize = 6;

    fn encode(&self, model: &EllipseQuadratic<T>) -> Vec<T> {
        vec![model.a, model.b, model.c, model.d, model.e, model.f]
    }

    fn decode(&self, params: &[T]) -> Result<EllipseQuadratic<T>, FitError> {
        check_length(params, 6)?;
        Ok(EllipseQuadratic {
            a: params[0],
            b: params[1],
            c: params[2],
            d: params[3],
            e: params[4],
            f: params[5],
        })
    }
}

/// Rotated ellipse as `[cx, cy, a, b, phi]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecEllipseRotated;

impl<T: Copy> ModelCodec<T> for CodecEllipseRotated {
    type Model = EllipseRotated<T>;
    const PARAM_LENGTH: usize = 5;

    fn encode(&self, model: &EllipseRotated<T>) -> Vec<T> {
        let [cx, cy] = model.center;
        vec![cx, cy, model.a, model.b, model.phi]
    }

    fn decode(&self, params: &[T]) -> Result<EllipseRotated<T>, FitError> {
        check_length(params, 5)?;
        Ok(EllipseRotated {
            center: [params[0], params[1]],
            a: params[2],
            b: params[3],
            phi: params[4],
        })
    }
}

/// Affine transform as `[a11, a12, a21, a22, tx, ty]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecAffine2D;

impl<T: Copy> ModelCodec<T> for CodecAffine2D {
    type Model = Affine2D<T>;
    const PARAM_LENGTH: usize = 6;

    fn encode(&self, model: &Affine2D<T>) -> Vec<T> {
        vec![model.a11, model.a12, model.a21, model.a22, model.tx, model.ty]
    }

    fn decode(&self, params: &[T]) -> Result<Affine2D<T>, FitError> {
        check_length(params, 6)?;
        Ok(Affine2D {
            a11: params[0],
            a12: params[1],
            a21: params[2],
            a22: params[3],
            tx: params[4],
            ty: params[5],
        })
    }
}

/// Variant tag of a [`ShapeModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// [`Sphere3D`]
    Sphere,
    /// [`EllipseQuadratic`]
    EllipseQuadratic,
    /// [`EllipseRotated`]
    EllipseRotated,
}

impl ShapeKind {
    /// Number of parameters of the variant.
    pub fn param_length(&self) -> usize {
        match self {
            ShapeKind::Sphere => <CodecSphere3D as ModelCodec<f64>>::PARAM_LENGTH,
            ShapeKind::EllipseQuadratic => <CodecEllipseQuadratic as ModelCodec<f64>>::PARAM_LENGTH,
            ShapeKind::EllipseRotated => <CodecEllipseRotated as ModelCodec<f64>>::PARAM_LENGTH,
        }
    }

    /// Decode a model of this kind from its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::ParameterLength`] if the length does not match the variant.
    pub fn decode<T: Copy>(&self, params: &[T]) -> Result<ShapeModel<T>, FitError> {
        Ok(match self {
            ShapeKind::Sphere => ShapeModel::Sphere(CodecSphere3D.decode(params)?),
            ShapeKind::EllipseQuadratic => {
                ShapeModel::EllipseQuadratic(CodecEllipseQuadratic.decode(params)?)
            }
            ShapeKind::EllipseRotated => {
                ShapeModel::EllipseRotated(CodecEllipseRotated.decode(params)?)
            }
        })
    }
}

/// Closed set of parametric shape models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeModel<T> {
    /// A sphere in 3D.
    Sphere(Sphere3D<T>),
    /// An ellipse in implicit quadratic form.
    EllipseQuadratic(EllipseQuadratic<T>),
    /// An ellipse given by center, semi-axes and rotation.
    EllipseRotated(EllipseRotated<T>),
}

impl<T: Copy> ShapeModel<T> {
    /// Variant tag of the model.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeModel::Sphere(_) => ShapeKind::Sphere,
            ShapeModel::EllipseQuadratic(_) => ShapeKind::EllipseQuadratic,
            ShapeModel::EllipseRotated(_) => ShapeKind::EllipseRotated,
        }
    }

    /// Encode the model with the codec of its variant.
    pub fn encode(&self) -> Vec<T> {
        match self {
            ShapeModel::Sphere(m) => CodecSphere3D.encode(m),
            ShapeModel::EllipseQuadratic(m) => CodecEllipseQuadratic.encode(m),
            ShapeModel::EllipseRotated(m) => CodecEllipseRotated.encode(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_codec() -> Result<(), FitError> {
        let sphere = Sphere3D::new(1.5, -2.25, 0.1, 3.7);
        let params = CodecSphere3D.encode(&sphere);
        assert_eq!(params, vec![1.5, -2.25, 0.1, 3.7]);
        assert_eq!(CodecSphere3D.decode(&params)?, sphere);
        Ok(())
    }

    #[test]
    fn test_rotated_ellipse_order() -> Result<(), FitError> {
        let ellipse = EllipseRotated::new(1.0f32, 2.0, 3.0, 1.5, 0.25);
        let params = CodecEllipseRotated.encode(&ellipse);
        assert_eq!(params, vec![1.0, 2.0, 3.0, 1.5, 0.25]);
        assert_eq!(CodecEllipseRotated.decode(&params)?, ellipse);
        Ok(())
    }

    #[test]
    fn test_encode_into() -> Result<(), FitError> {
        let plane = PlaneGeneral3D::new(0.0, 0.0, 1.0, -2.0);
        let mut params = [0.0; 4];
        CodecPlaneGeneral3D.encode_into(&plane, &mut params)?;
        assert_eq!(params, [0.0, 0.0, 1.0, -2.0]);

        let mut short = [0.0; 3];
        assert_eq!(
            CodecPlaneGeneral3D.encode_into(&plane, &mut short),
            Err(FitError::ParameterLength {
                expected: 4,
                actual: 3
            })
        );
        Ok(())
    }

    #[test]
    fn test_decode_wrong_length() {
        assert_eq!(
            CodecEllipseQuadratic.decode(&[1.0, 2.0, 3.0]),
            Err(FitError::ParameterLength {
                expected: 6,
                actual: 3
            })
        );
        assert_eq!(
            CodecAffine2D.decode(&[0.0f32; 7]),
            Err(FitError::ParameterLength {
                expected: 6,
                actual: 7
            })
        );
    }

    #[test]
    fn test_shape_model_dispatch() -> Result<(), FitError> {
        let models = [
            ShapeModel::Sphere(Sphere3D::new(0.0, 1.0, 2.0, 3.0)),
            ShapeModel::EllipseQuadratic(EllipseQuadratic::new(1.0, 0.0, 1.0, 0.0, 0.0, -4.0)),
            ShapeModel::EllipseRotated(EllipseRotated::new(1.0, 2.0, 3.0, 1.5, 0.25)),
        ];
        for model in models {
            let params = model.encode();
            assert_eq!(params.len(), model.kind().param_length());
            assert_eq!(model.kind().decode(&params)?, model);
        }

        assert!(ShapeKind::Sphere.decode(&[0.0; 5]).is_err());
        Ok(())
    }
}
