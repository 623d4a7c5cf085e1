// Transform utilities for Mat4
//
// glam already provides the translation/rotation/scale builders and an
// unchecked inverse(); this adds the checked inverse and the homogeneous
// point/direction mappings ray casting needs.

use crate::{MathError, Mat4, Vec3, Vec4};

/// Determinants smaller than this are treated as singular.
const SINGULAR_DETERMINANT: f64 = 1e-12;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext: Sized {
    /// Invert the matrix, failing if it is singular.
    fn try_inverse(&self) -> Result<Self, MathError>;

    /// Transform a point with implicit w=1, dividing by the resulting w
    /// when it is nonzero.
    fn transform_point_homogeneous(&self, point: Vec3) -> Vec3;

    /// Transform a direction with implicit w=0 (translation is ignored and
    /// no perspective divide happens).
    fn transform_direction(&self, direction: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn try_inverse(&self) -> Result<Self, MathError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_DETERMINANT {
            return Err(MathError::SingularMatrix);
        }
        Ok(self.inverse())
    }

    fn transform_point_homogeneous(&self, point: Vec3) -> Vec3 {
        let transformed = *self * point.extend(1.0);
        if transformed.w != 0.0 {
            transformed.truncate() / transformed.w
        } else {
            transformed.truncate()
        }
    }

    fn transform_direction(&self, direction: Vec3) -> Vec3 {
        (*self * direction.extend(0.0)).truncate()
    }
}

/// Build a shear matrix. `xy` is how much x moves per unit of y, and so on.
pub fn shear(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(1.0, yx, zx, 0.0),
        Vec4::new(xy, 1.0, zy, 0.0),
        Vec4::new(xz, yz, 1.0, 0.0),
        Vec4::W,
    )
}
