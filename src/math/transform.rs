// Copyright 2020 @TwoCookingMice

use super::constants::{ Vector3f, Vector4f, Matrix4f };
use super::ray::Ray3f;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4f,
    inv_matrix: Matrix4f
}

impl Default for Transform {
    fn default() -> Self {
        Self { matrix: Matrix4f::identity(),
               inv_matrix: Matrix4f::identity() }
    }
}

impl Transform {
    pub fn new(matrix: Matrix4f) -> Self {
        Self { matrix,
               inv_matrix: matrix.try_inverse().unwrap_or_else(Matrix4f::identity) }
    }

    /// Affine frame mapping the local axes onto `x`, `y`, `z` and the origin onto `origin`.
    pub fn from_frame(x: Vector3f, y: Vector3f, z: Vector3f, origin: Vector3f) -> Self {
        Self::new(Matrix4f::from_columns(&[
            Vector4f::new(x.x, x.y, x.z, 0.0),
            Vector4f::new(y.x, y.y, y.z, 0.0),
            Vector4f::new(z.x, z.y, z.z, 0.0),
            Vector4f::new(origin.x, origin.y, origin.z, 1.0),
        ]))
    }

    pub fn is_invertible(&self) -> bool {
        self.matrix.try_inverse().is_some()
    }

    pub fn apply_point(&self, p: Vector3f) -> Vector3f {
        Self::project(&self.matrix, p)
    }

    pub fn apply_vector(&self, v: Vector3f) -> Vector3f {
        self.matrix.fixed_slice::<3, 3>(0, 0) * v
    }

    // Normals transform with the inverse transpose: if n^T x = 0 before,
    // then ((M^{-1})^T n)^T (M x) = 0 after.
    pub fn apply_normal(&self, n: Vector3f) -> Vector3f {
        self.inv_matrix.fixed_slice::<3, 3>(0, 0).transpose() * n
    }

    pub fn inv_apply_point(&self, p: Vector3f) -> Vector3f {
        Self::project(&self.inv_matrix, p)
    }

    pub fn inv_apply_vector(&self, v: Vector3f) -> Vector3f {
        self.inv_matrix.fixed_slice::<3, 3>(0, 0) * v
    }

    pub fn inv_apply_ray(&self, ray: &Ray3f) -> Ray3f {
        let new_p = self.inv_apply_point(ray.origin());
        let new_d = self.inv_apply_vector(ray.dir());

        Ray3f::new(new_p, new_d, Some(ray.min_t), Some(ray.max_t))
    }

    fn project(m: &Matrix4f, p: Vector3f) -> Vector3f {
        let h = m * Vector4f::new(p.x, p.y, p.z, 1.0);
        Vector3f::new(h.x / h.w, h.y / h.w, h.z / h.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_transform() {
        let t = Transform::from_frame(Vector3f::new(2.0, 0.0, 0.0),
                                      Vector3f::new(0.0, 0.0, -1.0),
                                      Vector3f::new(0.0, 1.0, 0.0),
                                      Vector3f::new(1.0, 2.0, 3.0));
        assert!(t.is_invertible());

        let p = t.apply_point(Vector3f::new(1.0, 1.0, 0.0));
        assert!((p - Vector3f::new(3.0, 2.0, 2.0)).norm() < 1e-5);
        let back = t.inv_apply_point(p);
        assert!((back - Vector3f::new(1.0, 1.0, 0.0)).norm() < 1e-5);

        let v = t.apply_vector(Vector3f::new(0.0, 0.0, 1.0));
        assert!((v - Vector3f::new(0.0, 1.0, 0.0)).norm() < 1e-6);

        let n = t.apply_normal(Vector3f::new(0.0, 0.0, 1.0)).normalize();
        assert!((n - Vector3f::new(0.0, 1.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_singular_transform_falls_back_to_identity_inverse() {
        let t = Transform::from_frame(Vector3f::zeros(), Vector3f::zeros(),
                                      Vector3f::zeros(), Vector3f::zeros());
        assert!(!t.is_invertible());
        let p = Vector3f::new(1.0, 2.0, 3.0);
        assert_eq!(t.inv_apply_point(p), p);
    }
}
