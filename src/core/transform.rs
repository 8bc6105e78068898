/// World-space placement of a light, wrapped so callers derive positions and
/// orientation axes from one validated affine matrix.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    trans: glam::Affine3A,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        trans: glam::Affine3A::IDENTITY,
    };

    pub fn new(trans: glam::Affine3A) -> Self {
        Self { trans }
    }

    /// Build from a 4x4 matrix, rejecting singular ones. Light transforms
    /// must stay invertible or the derived orientation axes are meaningless.
    pub fn from_matrix(matrix: glam::Mat4) -> anyhow::Result<Self> {
        let det = matrix.determinant();
        if det == 0.0 || !det.is_finite() {
            anyhow::bail!("light transform is not invertible (det = {})", det);
        }
        Ok(Self {
            trans: glam::Affine3A::from_mat4(matrix),
        })
    }

    /// Translation component, the world position of a placed light.
    pub fn translation(&self) -> glam::Vec3A {
        self.trans.translation
    }

    /// World direction of the local +Z axis. Lights emit along local -Z by
    /// convention, so the emission direction is the negation of this.
    pub fn z_axis(&self) -> glam::Vec3A {
        self.trans.matrix3.z_axis.normalize()
    }

    /// World direction of the local +X axis, used to orient area lights.
    pub fn x_axis(&self) -> glam::Vec3A {
        self.trans.matrix3.x_axis.normalize()
    }

    pub fn transform_point3a(&self, other: glam::Vec3A) -> glam::Vec3A {
        self.trans.transform_point3a(other)
    }

    pub fn transform_vector3a(&self, other: glam::Vec3A) -> glam::Vec3A {
        self.trans.transform_vector3a(other)
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Self) -> Self::Output {
        Transform {
            trans: self.trans * rhs.trans,
        }
    }
}
