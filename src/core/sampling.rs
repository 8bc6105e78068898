/// Uniform direction over the local hemisphere `z >= 0` from two independent
/// uniforms in [0, 1), together with its constant solid-angle pdf `1 / (2pi)`.
///
/// Pure function so callers can hand it fixed inputs (tests) or fresh draws
/// from their own stream; nothing is retained between calls.
pub fn uniform_hemisphere(rand_x: f32, rand_y: f32) -> (glam::Vec3A, f32) {
    let phi = rand_x * 2.0 * std::f32::consts::PI;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let cos_theta = rand_y;
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let dir = glam::Vec3A::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta);
    (dir, uniform_hemisphere_pdf())
}

pub fn uniform_hemisphere_pdf() -> f32 {
    0.5 * std::f32::consts::FRAC_1_PI
}
