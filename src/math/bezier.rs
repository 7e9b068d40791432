use super::Vec3;

/// Evaluate a cubic Bézier curve at t in [0, 1]
pub fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;

    // Bernstein basis
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;

    p0.scale(b0) + p1.scale(b1) + p2.scale(b2) + p3.scale(b3)
}

/// Sample `segments + 1` evenly spaced points, endpoints included
pub fn sample_cubic(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| cubic_bezier(p0, p1, p2, p3, i as f32 / segments as f32))
        .collect()
}
