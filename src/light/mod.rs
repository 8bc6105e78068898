mod disk;
mod distant;
mod dome;
mod point;
mod rect;
mod sphere;

pub use disk::*;
pub use distant::*;
pub use dome::*;
pub use point::*;
pub use rect::*;
pub use sphere::*;

use crate::core::{color::Color, loader::InputParams, ray::Ray, rng::Rng};

/// One direct-lighting sample toward a shading point.
///
/// `pdf` is in solid-angle measure. A zero pdf marks a degenerate draw;
/// callers combining strategies must treat such a sample as contributing
/// nothing regardless of `radiance`.
#[derive(Debug, Clone, Copy)]
pub struct LightSample {
    pub direction: glam::Vec3A,
    pub radiance: Color,
    pub pdf: f32,
}

impl LightSample {
    /// Guard value for degenerate geometry: contributes nothing and combines
    /// as pdf zero.
    pub fn zero(direction: glam::Vec3A) -> Self {
        Self {
            direction,
            radiance: Color::BLACK,
            pdf: 0.0,
        }
    }
}

/// The operation exists but is not implemented for this light kind.
///
/// Distinct from a zero-contribution sample or a ray miss, so callers can
/// fall back or report instead of silently shading with garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported {
    kind: &'static str,
}

impl Unsupported {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} lights have no sampling/intersection support", self.kind)
    }
}

impl std::error::Error for Unsupported {}

#[enum_dispatch::enum_dispatch(Light)]
pub trait LightT: Send + Sync {
    /// Draw one importance-sampled direction toward this light from
    /// `position`, with its radiance estimate and solid-angle pdf. Uniform
    /// draws come from the caller's own `rng` stream, as many as the light
    /// kind needs.
    fn sample(&self, position: glam::Vec3A, rng: &mut Rng) -> Result<LightSample, Unsupported>;

    /// Nearest entry distance of `ray` against the emitting geometry, or
    /// `None` when the ray misses (delta lights always miss).
    fn intersect(&self, ray: &Ray) -> Result<Option<f32>, Unsupported>;

    /// Delta lights occupy zero solid angle: rays never hit them and MIS
    /// weighting does not apply.
    fn is_delta(&self) -> bool;
}

#[enum_dispatch::enum_dispatch]
pub enum Light {
    SphereLight,
    RectLight,
    DiskLight,
    DistantLight,
    DomeLight,
    PointLight,
}

/// Immutable snapshot of one scene light, refreshed wholesale by the scene
/// side whenever it signals a change; samplers only ever observe a complete
/// snapshot.
pub struct LightDescriptor {
    pub light: Light,
    /// Opaque scene reference consumed by shadow passes, carried through
    /// untouched.
    pub shadow_collection: Option<String>,
}

impl LightDescriptor {
    pub fn sample(
        &self,
        position: glam::Vec3A,
        rng: &mut Rng,
    ) -> Result<LightSample, Unsupported> {
        self.light.sample(position, rng)
    }

    pub fn intersect(&self, ray: &Ray) -> Result<Option<f32>, Unsupported> {
        self.light.intersect(ray)
    }

    pub fn is_delta(&self) -> bool {
        self.light.is_delta()
    }
}

/// Emitted color scaled by the diffuse multiplier. Accepts 3- or 4-component
/// input; the extra channel is ignored.
fn emission_from_params(params: &mut InputParams) -> anyhow::Result<Color> {
    let color: Color = if params.contains_key("color") {
        match params.get_float3("color") {
            Ok(c) => c.into(),
            Err(_) => params.get_float4("color")?.into(),
        }
    } else {
        anyhow::bail!(format!("{} - there is no 'color' field", params.name()));
    };
    let diffuse = params.get_float_or("diffuse", 1.0);
    Ok(color * diffuse)
}

pub fn create_light_from_params(params: &mut InputParams) -> anyhow::Result<LightDescriptor> {
    params.set_name("light".into());
    let ty = params.get_str("type")?;
    let name = params.get_str_or("name", "unnamed");
    params.set_name(format!("light-{}-{}", ty, name).into());

    let light = match ty.as_str() {
        "sphere" => SphereLight::load(params)?.into(),
        "rect" => RectLight::load(params)?.into(),
        "disk" => DiskLight::load(params)?.into(),
        "distant" => DistantLight::load(params)?.into(),
        "dome" => DomeLight::load(params)?.into(),
        "point" => PointLight::load(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    let shadow_collection = if params.contains_key("shadow_collection") {
        Some(params.get_str("shadow_collection")?)
    } else {
        None
    };

    params.check_unused_keys();

    Ok(LightDescriptor {
        light,
        shadow_collection,
    })
}
