/// Stateless hash noise in `[0, 1)`: `frac(sin(x*0.143 + z*0.173) * 43758.5453)`.
///
/// Evaluated in `f64` so that meshing and sampling agree bit-for-bit for the
/// same input.
#[inline]
pub fn pseudo_noise(x: f64, z: f64) -> f64 {
    let v = (x * 0.143 + z * 0.173).sin() * 43_758.545_3;
    v - v.floor()
}
