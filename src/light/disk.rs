use crate::core::{
    color::Color, loader::InputParams, ray::Ray, rng::Rng, transform::Transform,
};

use super::{LightSample, LightT, Unsupported};

/// Disk area light emitting from one face, along the local -Z axis of its
/// transform.
pub struct DiskLight {
    center: glam::Vec3A,
    direction: glam::Vec3A,
    right: glam::Vec3A,
    up: glam::Vec3A,
    radius: f32,
    emission: Color,
    area_inv: f32,
}

impl DiskLight {
    pub fn new(
        center: glam::Vec3A,
        direction: glam::Vec3A,
        right: glam::Vec3A,
        radius: f32,
        emission: Color,
    ) -> Self {
        let direction = direction.normalize();
        let right = (right - direction * right.dot(direction)).normalize();
        let up = right.cross(direction);
        let area_inv = 1.0 / (std::f32::consts::PI * radius * radius);
        Self {
            center,
            direction,
            right,
            up,
            radius,
            emission,
            area_inv,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let transform = Transform::from_matrix(params.get_matrix("transform")?)?;
        let radius = params.get_float("radius")?;
        if radius <= 0.0 {
            anyhow::bail!(format!("{} - 'radius' should be > 0", params.name()));
        }
        let emission = super::emission_from_params(params)?;
        Ok(Self::new(
            transform.translation(),
            -transform.z_axis(),
            transform.x_axis(),
            radius,
            emission,
        ))
    }

    /// Rejection-sample a point uniformly inside the unit disk.
    fn uniform_in_disk(rng: &mut Rng) -> (f32, f32) {
        loop {
            let (rand_x, rand_y) = rng.uniform_2d();
            let x = rand_x * 2.0 - 1.0;
            let y = rand_y * 2.0 - 1.0;
            if x * x + y * y <= 1.0 {
                return (x, y);
            }
        }
    }
}

impl LightT for DiskLight {
    fn sample(&self, position: glam::Vec3A, rng: &mut Rng) -> Result<LightSample, Unsupported> {
        let (offset_x, offset_y) = Self::uniform_in_disk(rng);
        let sample_pos = self.center
            + offset_x * self.radius * self.right
            + offset_y * self.radius * self.up;
        let sample = sample_pos - position;
        let dist_sqr = sample.length_squared();
        if dist_sqr == 0.0 {
            return Ok(LightSample::zero(self.direction));
        }
        let dist = dist_sqr.sqrt();
        let sample = sample / dist;
        let cos = -sample.dot(self.direction);
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
        if cos < 0.0 {
            let t = (self.center - ray.origin).dot(self.direction) / cos;
            if t > ray.t_min && t.is_finite() {
                let offset = ray.point_at(t) - self.center;
                if offset.length_squared() <= self.radius * self.radius {
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn facing_down_light() -> DiskLight {
        DiskLight::new(
            glam::Vec3A::new(0.0, 0.0, 3.0),
            -glam::Vec3A::Z,
            glam::Vec3A::X,
            0.5,
            Color::WHITE,
        )
    }

    #[test]
    fn samples_land_on_the_disk() {
        let light = facing_down_light();
        let position = glam::Vec3A::ZERO;
        let mut rng = Rng::seeded(13);
        for _ in 0..1000 {
            let sample = light.sample(position, &mut rng).unwrap();
            assert!(sample.pdf > 0.0);
            // Project the direction onto the z = 3 plane and check the hit
            // point lies within the radius.
            let t = 3.0 / sample.direction.z;
            let hit = position + sample.direction * t;
            let r_sqr = hit.x * hit.x + hit.y * hit.y;
            assert!(r_sqr <= 0.25 + 1e-4);
        }
    }

    #[test]
    fn back_side_is_dark() {
        let light = facing_down_light();
        let sample = light
            .sample(glam::Vec3A::new(0.0, 0.0, 10.0), &mut Rng::seeded(17))
            .unwrap();
        assert_eq!(sample.pdf, 0.0);
        assert_eq!(sample.radiance, Color::BLACK);
    }

    #[test]
    fn ray_hits_inside_radius_only() {
        let light = facing_down_light();
        let center_ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::Z);
        let t = light.intersect(&center_ray).unwrap().unwrap();
        assert_abs_diff_eq!(t, 3.0, epsilon = 1e-5);

        let rim_miss = Ray::new(glam::Vec3A::new(0.6, 0.0, 0.0), glam::Vec3A::Z);
        assert_eq!(light.intersect(&rim_miss).unwrap(), None);
    }
}
