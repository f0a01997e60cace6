//! Hash-based value noise
//!
//! Every function here is pure: the same `(x, z, seed)` always produces the
//! same value, with no tables or generator state. World content is rebuilt
//! from `(seed, coordinates)` alone, so nothing in this module may depend on
//! call order.

/// Hermite smoothstep on [0, 1]
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Integer lattice hash producing a value in [-1, 1].
///
/// Mixes the coordinates and seed linearly, folds the high bits back with a
/// shift-xor, then runs the result through a cubic polynomial. All arithmetic
/// wraps on `i32`, so the output is identical on every platform.
#[inline]
pub fn hash2(ix: i32, iz: i32, seed: i32) -> f32 {
    let mut n = ix
        .wrapping_add(iz.wrapping_mul(57))
        .wrapping_add(seed.wrapping_mul(2_654_435_761_u32 as i32));
    n = (n << 13) ^ n;
    let poly = n
        .wrapping_mul(n).wrapping_mul(15731).wrapping_add(789_221);
    let m = n.wrapping_mul(poly).wrapping_add(1_376_312_589) & 0x7fff_ffff;
    1.0 - m as f32 / 1_073_741_824.0
}

/// Smoothed 2D value noise in [-1, 1]
pub fn noise2d(x: f32, z: f32, seed: i32) -> f32 {
    let fx = x.floor();
    let fz = z.floor();
    let ix = fx as i32;
    let iz = fz as i32;

    let tx = smoothstep(x - fx);
    let tz = smoothstep(z - fz);

    let a = hash2(ix, iz, seed);
    let b = hash2(ix.wrapping_add(1), iz, seed);
    let c = hash2(ix, iz.wrapping_add(1), seed);
    let d = hash2(ix.wrapping_add(1), iz.wrapping_add(1), seed);

    let i1 = lerp(a, b, tx);
    let i2 = lerp(c, d, tx);
    lerp(i1, i2, tz)
}

/// Fractal Brownian motion: octaves of [`noise2d`] at doubling frequency and
/// halving amplitude, normalized back into [-1, 1].
///
/// Each octave uses its own seed (`seed + octave`) so layers do not align.
pub fn fbm(x: f32, z: f32, octaves: u32, seed: i32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut total = 0.0;

    for octave in 0..octaves {
        value += noise2d(x * frequency, z * frequency, seed.wrapping_add(octave as i32)) * amplitude;
        total += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    if total > 0.0 { value / total } else { 0.0 }
}

/// Ridge transform of a 4-octave fBm: `1 - |fbm|`, in [0, 1]
pub fn ridge_noise(x: f32, z: f32, seed: i32) -> f32 {
    1.0 - fbm(x, z, 4, seed).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_pure() {
        for i in -20..20 {
            let a = hash2(i, i * 3 - 7, 2);
            let b = hash2(i, i * 3 - 7, 2);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_hash_range() {
        for x in -64..64 {
            for z in -64..64 {
                let h = hash2(x * 97, z * 31, 12345);
                assert!((-1.0..=1.0).contains(&h), "hash2({x}, {z}) = {h}");
            }
        }
    }

    #[test]
    fn test_hash_extreme_inputs_do_not_panic() {
        let h = hash2(i32::MAX, i32::MIN, i32::MAX);
        assert!(h.is_finite());
    }

    #[test]
    fn test_hash_seed_changes_output() {
        let differing = (0..32).filter(|&i| hash2(i, 0, 1) != hash2(i, 0, 2)).count();
        assert!(differing > 28);
    }

    #[test]
    fn test_noise_matches_hash_on_lattice() {
        for x in -5..5 {
            for z in -5..5 {
                let n = noise2d(x as f32, z as f32, 9);
                assert!((n - hash2(x, z, 9)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_noise_continuous_across_negative_cell_edges() {
        let left = noise2d(-1.0 - 1e-4, 0.5, 3);
        let right = noise2d(-1.0 + 1e-4, 0.5, 3);
        assert!((left - right).abs() < 1e-2);
    }

    #[test]
    fn test_fbm_range() {
        for i in 0..500 {
            let x = i as f32 * 0.37 - 80.0;
            let z = i as f32 * -0.91 + 13.0;
            let v = fbm(x, z, 6, 2);
            assert!((-1.0..=1.0).contains(&v), "fbm = {v}");
        }
    }

    #[test]
    fn test_fbm_zero_octaves() {
        assert_eq!(fbm(1.5, 2.5, 0, 4), 0.0);
    }

    #[test]
    fn test_ridge_range() {
        for i in 0..500 {
            let r = ridge_noise(i as f32 * 0.13, i as f32 * 0.29, 5);
            assert!((0.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }
}
