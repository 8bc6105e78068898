use crate::core::{
    color::Color, coord::Coordinate, loader::InputParams, ray::Ray, rng::Rng, sampling,
    transform::Transform,
};

use super::{LightSample, LightT, Unsupported};

/// Spherical area light. The surface is treated as spreading the light's
/// total power uniformly, so every surface point emits the same radiance.
pub struct SphereLight {
    center: glam::Vec3A,
    radius: f32,
    emission: Color,
}

impl SphereLight {
    pub fn new(center: glam::Vec3A, radius: f32, emission: Color) -> Self {
        Self {
            center,
            radius,
            emission,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let transform = Transform::from_matrix(params.get_matrix("transform")?)?;
        let radius = params.get_float("radius")?;
        if radius < 0.0 {
            anyhow::bail!(format!("{} - 'radius' should be >= 0", params.name()));
        }
        let emission = super::emission_from_params(params)?;
        let center = transform.translation();
        log::debug!(
            "{}: sphere light at {:?} with radius {}",
            params.name(),
            center,
            radius
        );
        Ok(Self::new(center, radius, emission))
    }

    /// Sampling core with the two uniform draws passed in explicitly, so
    /// fixed inputs can drive it deterministically.
    pub fn sample_with(&self, position: glam::Vec3A, rand: (f32, f32)) -> LightSample {
        let to_light = self.center - position;
        let dist_sqr = to_light.length_squared();
        // Coincident shading point or zero emitting area: nothing sensible
        // to draw, return the zero-pdf guard instead of dividing by zero.
        if dist_sqr == 0.0 || self.radius == 0.0 {
            return LightSample::zero(glam::Vec3A::Z);
        }
        let dist = dist_sqr.sqrt();

        // Hemisphere facing the shading point: its axis points from the
        // light center back toward the viewer side.
        let frame = Coordinate::from_z(-to_light / dist);
        let (local_dir, pos_pdf) = sampling::uniform_hemisphere(rand.0, rand.1);
        let world_dir = frame.to_world(local_dir);

        let surface_pt = world_dir * self.radius + self.center;
        let offset = surface_pt - position;
        let offset_len_sqr = offset.length_squared();
        if offset_len_sqr == 0.0 {
            // Shading point sits exactly on the sampled surface point.
            return LightSample::zero(glam::Vec3A::Z);
        }
        let direction = offset / offset_len_sqr.sqrt();

        // Cosine at the sampled surface point, between its outward normal
        // and the direction back toward the shading point.
        let cos_val = (-direction).dot(world_dir);

        // Hemisphere pdf rescaled to the sphere's area measure, then the
        // area-to-solid-angle Jacobian cos / dist^2. A backfacing draw is
        // not rejected: it keeps the mirrored (|cos|) pdf and zero radiance,
        // which keeps the estimator defined without resampling and the pdf
        // non-negative.
        let pdf = pos_pdf / (self.radius * self.radius) * cos_val.abs() / dist_sqr;

        let area = 4.0 * std::f32::consts::PI * self.radius * self.radius;
        let irradiance = self.emission / area;
        let radiance = if cos_val < 0.0 {
            Color::BLACK
        } else {
            irradiance * cos_val / dist_sqr * std::f32::consts::FRAC_1_PI
        };

        LightSample {
            direction,
            radiance,
            pdf,
        }
    }

    fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        let delta = b * b - a * c;
        if delta >= 0.0 {
            let delta = delta.sqrt();
            let min = (-b - delta) / a;
            let max = (-b + delta) / a;
            Some((min, max))
        } else {
            None
        }
    }
}

impl LightT for SphereLight {
    fn sample(&self, position: glam::Vec3A, rng: &mut Rng) -> Result<LightSample, Unsupported> {
        Ok(self.sample_with(position, rng.uniform_2d()))
    }

    fn intersect(&self, ray: &Ray) -> Result<Option<f32>, Unsupported> {
        if self.radius == 0.0 {
            return Ok(None);
        }
        if let Some((min, max)) = self.intersect_ray(ray) {
            let t = if min < ray.t_min { max } else { min };
            if t > ray.t_min {
                return Ok(Some(t));
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

    #[test]
    fn estimator_matches_far_field_constant() {
        // For this radiometric model radiance / pdf is the per-sample
        // constant emission / (2 pi) whenever the draw is front-facing, so
        // with the light far above the shading point (cos of the shading
        // normal ~= 1, no backfacing draws) the Monte Carlo mean of
        // radiance * cos / pdf must converge to emission / (2 pi).
        let light = SphereLight::new(glam::Vec3A::new(0.0, 0.0, 10.0), 0.01, Color::WHITE);
        let position = glam::Vec3A::ZERO;
        let normal = glam::Vec3A::Z;

        let mut rng = Rng::seeded(42);
        let n = 100_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let sample = light.sample(position, &mut rng).unwrap();
            assert!(sample.pdf >= 0.0);
            assert!(sample.radiance.is_finite());
            if sample.pdf > 0.0 {
                let cos = sample.direction.dot(normal);
                sum += (sample.radiance.r * cos / sample.pdf) as f64;
            }
        }
        let mean = sum / n as f64;
        let expected = 0.5 * std::f64::consts::FRAC_1_PI;
        assert_abs_diff_eq!(mean, expected, epsilon = expected * 0.01);
    }

    #[test]
    fn zero_radius_yields_zero_sample() {
        let light = SphereLight::new(glam::Vec3A::new(0.0, 0.0, 5.0), 0.0, Color::WHITE);
        let sample = light.sample(glam::Vec3A::ZERO, &mut Rng::seeded(3)).unwrap();
        assert_eq!(sample.pdf, 0.0);
        assert_eq!(sample.radiance, Color::BLACK);
        assert!(sample.direction.is_finite());
    }

    #[test]
    fn coincident_point_yields_zero_sample() {
        let center = glam::Vec3A::new(1.0, -2.0, 3.0);
        let light = SphereLight::new(center, 1.0, Color::WHITE);
        let sample = light.sample(center, &mut Rng::seeded(4)).unwrap();
        assert_eq!(sample.pdf, 0.0);
        assert_eq!(sample.radiance, Color::BLACK);
        assert!(sample.direction.is_finite());
    }

    #[test]
    fn pdf_is_never_negative() {
        // Shading point close to a large sphere, where backfacing draws are
        // common.
        let light = SphereLight::new(glam::Vec3A::new(0.0, 0.0, 1.5), 1.0, Color::WHITE);
        let mut rng = Rng::seeded(11);
        for _ in 0..10_000 {
            let sample = light.sample(glam::Vec3A::ZERO, &mut rng).unwrap();
            assert!(sample.pdf >= 0.0);
            assert!(sample.pdf.is_finite());
            assert!(sample.radiance.is_finite());
            assert!(sample.direction.is_finite());
        }
    }

    #[test]
    fn backfacing_draw_keeps_mirrored_pdf() {
        // center at distance 1.5, radius 1: draws whose local cos (rand_y)
        // is below radius / distance = 2/3 land on surface points facing
        // away from the shading point.
        let center = glam::Vec3A::new(0.0, 0.0, 1.5);
        let radius = 1.0;
        let light = SphereLight::new(center, radius, Color::WHITE);
        let position = glam::Vec3A::ZERO;
        let rand = (0.1, 0.3);

        let sample = light.sample_with(position, rand);
        assert_eq!(sample.radiance, Color::BLACK);
        assert!(sample.pdf > 0.0);

        // Recompute the surface cosine the same way the sampler derives it
        // and check the pdf is the mirrored-|cos| formula value.
        let to_light = center - position;
        let dist_sqr = to_light.length_squared();
        let frame = Coordinate::from_z(-to_light.normalize());
        let (local_dir, pos_pdf) = sampling::uniform_hemisphere(rand.0, rand.1);
        let world_dir = frame.to_world(local_dir);
        let direction = (world_dir * radius + center - position).normalize();
        let cos_val = (-direction).dot(world_dir);
        assert!(cos_val < 0.0);
        let expected_pdf = pos_pdf / (radius * radius) * cos_val.abs() / dist_sqr;
        assert_abs_diff_eq!(sample.pdf, expected_pdf, epsilon = 1e-6);
    }

    #[test]
    fn head_on_ray_hits_front_of_sphere() {
        let light = SphereLight::new(glam::Vec3A::new(0.0, 0.0, 5.0), 1.0, Color::WHITE);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::Z);
        let t = light.intersect(&ray).unwrap().unwrap();
        assert_abs_diff_eq!(t, 4.0, epsilon = 1e-4);
    }

    #[test]
    fn parallel_offset_ray_misses() {
        let light = SphereLight::new(glam::Vec3A::new(0.0, 0.0, 5.0), 1.0, Color::WHITE);
        let ray = Ray::new(glam::Vec3A::new(2.0, 0.0, 0.0), glam::Vec3A::Z);
        assert_eq!(light.intersect(&ray).unwrap(), None);
    }

    #[test]
    fn ray_from_inside_hits_far_side() {
        let center = glam::Vec3A::new(0.0, 0.0, 5.0);
        let light = SphereLight::new(center, 1.0, Color::WHITE);
        let ray = Ray::new(center, glam::Vec3A::Z);
        let t = light.intersect(&ray).unwrap().unwrap();
        assert_abs_diff_eq!(t, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn zero_radius_never_intersects() {
        let light = SphereLight::new(glam::Vec3A::new(0.0, 0.0, 5.0), 0.0, Color::WHITE);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::Z);
        assert_eq!(light.intersect(&ray).unwrap(), None);
    }
}
