use crate::core::{
    color::Color, loader::InputParams, ray::Ray, rng::Rng, transform::Transform,
};

use super::{LightSample, LightT, Unsupported};

/// Dome (environment) light. The scene side syncs its placement and scale,
/// but its radiance is image-based, which this descriptor does not carry, so
/// sampling and intersection report [`Unsupported`] instead of guessing.
pub struct DomeLight {
    transform: Transform,
    emission: Color,
}

impl DomeLight {
    pub fn new(transform: Transform, emission: Color) -> Self {
        Self {
            transform,
            emission,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let mut transform = Transform::from_matrix(params.get_matrix("transform")?)?;
        // An optional dome offset is pre-multiplied into the placement.
        if params.contains_key("dome_offset") {
            let offset = Transform::from_matrix(params.get_matrix("dome_offset")?)?;
            transform = offset * transform;
        }
        let emission = super::emission_from_params(params)?;
        Ok(Self::new(transform, emission))
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn emission(&self) -> Color {
        self.emission
    }
}

impl LightT for DomeLight {
    fn sample(&self, _position: glam::Vec3A, _rng: &mut Rng) -> Result<LightSample, Unsupported> {
        Err(Unsupported::new("dome"))
    }

    fn intersect(&self, _ray: &Ray) -> Result<Option<f32>, Unsupported> {
        Err(Unsupported::new("dome"))
    }

    fn is_delta(&self) -> bool {
        false
    }
}
