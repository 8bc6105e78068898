//! Direct illumination from emissive light sources.
//!
//! Given a shading point and a light, this crate draws an importance-sampled
//! direction toward the light together with a radiance estimate and its
//! solid-angle pdf, and tests rays against the light's emitting geometry for
//! visibility and MIS. Scene synchronization is somebody else's job: lights
//! arrive here as immutable snapshots built by [`light::create_light_from_params`].

pub mod core;
pub mod light;
