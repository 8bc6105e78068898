use crate::core::{
    color::Color, loader::InputParams, ray::Ray, rng::Rng, transform::Transform,
};

use super::{LightSample, LightT, Unsupported};

/// Rectangular area light emitting from one face, along the local -Z axis of
/// its transform.
pub struct RectLight {
    center: glam::Vec3A,
    direction: glam::Vec3A,
    right: glam::Vec3A,
    up: glam::Vec3A,
    width: f32,
    height: f32,
    emission: Color,
    area_inv: f32,
}

impl RectLight {
    pub fn new(
        center: glam::Vec3A,
        direction: glam::Vec3A,
        right: glam::Vec3A,
        width: f32,
        height: f32,
        emission: Color,
    ) -> Self {
        let direction = direction.normalize();
        let right = (right - direction * right.dot(direction)).normalize();
        let up = right.cross(direction);
        let area_inv = 1.0 / (width * height);
        Self {
            center,
            direction,
            right,
            up,
            width,
            height,
            emission,
            area_inv,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let transform = Transform::from_matrix(params.get_matrix("transform")?)?;
        let width = params.get_float("width")?;
        let height = params.get_float("height")?;
        if width <= 0.0 || height <= 0.0 {
            anyhow::bail!(format!(
                "{} - 'width' and 'height' should be > 0",
                params.name()
            ));
        }
        let emission = super::emission_from_params(params)?;
        // Convention is to emit along local -Z; local +X spans the width.
        Ok(Self::new(
            transform.translation(),
            -transform.z_axis(),
            transform.x_axis(),
            width,
            height,
            emission,
        ))
    }
}

impl LightT for RectLight {
    fn sample(&self, position: glam::Vec3A, rng: &mut Rng) -> Result<LightSample, Unsupported> {
        let (offset_x, offset_y) = rng.uniform_2d();
        let sample_pos = self.center
            + (offset_x - 0.5) * self.width * self.right
            + (offset_y - 0.5) * self.height * self.up;
        let sample = sample_pos - position;
        let dist_sqr = sample.length_squared();
        if dist_sqr == 0.0 {
            return Ok(LightSample::zero(self.direction));
        }
        let dist = dist_sqr.sqrt();
        let sample = sample / dist;
        let cos = -sample.dot(self.direction);
        // The back face emits nothing and the draw carries no usable pdf.
        let (pdf, radiance) = if cos > 0.0 {
            (self.area_inv * dist_sqr / cos, self.emission)
        } else {
            (0.0, Color::BLACK)
        };
        Ok(LightSample {
            direction: sample,
            radiance,
            pdf,
        })
    }

    fn intersect(&self, ray: &Ray) -> Result<Option<f32>, Unsupported> {
        let cos = self.direction.dot(ray.direction);
        // Only the emitting face is visible to rays.
        if cos < 0.0 {
            let t = (self.center - ray.origin).dot(self.direction) / cos;
            if t > ray.t_min && t.is_finite() {
                let offset = ray.point_at(t) - self.center;
                let x = offset.dot(self.right);
                let y = offset.dot(self.up);
                if x.abs() <= 0.5 * self.width && y.abs() <= 0.5 * self.height {
                    return Ok(Some(t));
                }
            }
        }
        Ok(None)
    }

    fn is_delta(&self) -> bool {
        false
    }
}
