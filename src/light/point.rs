use crate::core::{
    color::Color, loader::InputParams, ray::Ray, rng::Rng, transform::Transform,
};

use super::{LightSample, LightT, Unsupported};

/// Point light with inverse-square falloff.
pub struct PointLight {
    position: glam::Vec3A,
    emission: Color,
}

impl PointLight {
    pub fn new(position: glam::Vec3A, emission: Color) -> Self {
        Self { position, emission }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        // Simple lights may carry an explicit position in their params
        // instead of a placing transform.
        let position = if params.contains_key("position") {
            params.get_float3("position")?.into()
        } else {
            Transform::from_matrix(params.get_matrix("transform")?)?.translation()
        };
        let emission = super::emission_from_params(params)?;
        Ok(Self::new(position, emission))
    }
}

impl LightT for PointLight {
    fn sample(&self, position: glam::Vec3A, _rng: &mut Rng) -> Result<LightSample, Unsupported> {
        let sample = self.position - position;
        let dist_sqr = sample.length_squared();
        if dist_sqr == 0.0 {
            return Ok(LightSample::zero(glam::Vec3A::Z));
        }
        let dist = dist_sqr.sqrt();
        Ok(LightSample {
            direction: sample / dist,
            radiance: self.emission / dist_sqr,
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
    use approx::assert_abs_diff_eq;

    #[test]
    fn inverse_square_falloff() {
        let light = PointLight::new(glam::Vec3A::new(0.0, 2.0, 0.0), Color::WHITE);
        let sample = light.sample(glam::Vec3A::ZERO, &mut Rng::seeded(0)).unwrap();
        assert_eq!(sample.direction, glam::Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(sample.pdf, 1.0);
        assert_abs_diff_eq!(sample.radiance.r, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn coincident_point_yields_zero_sample() {
        let p = glam::Vec3A::new(1.0, 1.0, 1.0);
        let light = PointLight::new(p, Color::WHITE);
        let sample = light.sample(p, &mut Rng::seeded(0)).unwrap();
        assert_eq!(sample.pdf, 0.0);
        assert_eq!(sample.radiance, Color::BLACK);
    }

    #[test]
    fn rays_never_hit() {
        let light = PointLight::new(glam::Vec3A::new(0.0, 0.0, 5.0), Color::WHITE);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::Z);
        assert_eq!(light.intersect(&ray).unwrap(), None);
    }
}
