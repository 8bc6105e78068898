use crate::core::{
    color::Color, loader::InputParams, ray::Ray, rng::Rng, transform::Transform,
};

use super::{LightSample, LightT, Unsupported};

/// Directional light at infinity. The transform places it at the +Z
/// homogeneous limit, so its emission travels along the local -Z axis.
pub struct DistantLight {
    direction: glam::Vec3A,
    emission: Color,
}

impl DistantLight {
    /// `direction` is the direction the light travels.
    pub fn new(direction: glam::Vec3A, emission: Color) -> Self {
        Self {
            direction: direction.normalize(),
            emission,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let transform = Transform::from_matrix(params.get_matrix("transform")?)?;
        let emission = super::emission_from_params(params)?;
        Ok(Self::new(-transform.z_axis(), emission))
    }
}

impl LightT for DistantLight {
    fn sample(&self, _position: glam::Vec3A, _rng: &mut Rng) -> Result<LightSample, Unsupported> {
        Ok(LightSample {
            direction: -self.direction,
            radiance: self.emission,
            pdf: 1.0,
        })
    }

    fn intersect(&self, _ray: &Ray) -> Result<Option<f32>, Unsupported> {
        // No geometry to hit.
        Ok(None)
    }

    fn is_delta(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_sample_points_against_travel() {
        let light = DistantLight::new(glam::Vec3A::new(0.0, -1.0, 0.0), Color::WHITE);
        let sample = light
            .sample(glam::Vec3A::new(3.0, 0.0, 0.0), &mut Rng::seeded(0))
            .unwrap();
        assert_eq!(sample.direction, glam::Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(sample.pdf, 1.0);
        assert_eq!(sample.radiance, Color::WHITE);
        assert!(light.is_delta());
    }

    #[test]
    fn rays_never_hit() {
        let light = DistantLight::new(-glam::Vec3A::Z, Color::WHITE);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::Z);
        assert_eq!(light.intersect(&ray).unwrap(), None);
    }
}
