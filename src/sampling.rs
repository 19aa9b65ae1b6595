use rand::Rng;
use std::f64::consts::PI;

/// Uniform point in the unit disc, as (x, y).
pub fn random_in_unit_disc() -> (f64, f64) {
    let mut rng = rand::thread_rng();

    // sqrt keeps the density uniform over area rather than radius
    let r = rng.gen::<f64>().sqrt();
    let theta = rng.gen_range(0.0..(2.0 * PI));

    (r * theta.cos(), r * theta.sin())
}
