/// Evenly spaced sample angles, in degrees, covering one rotation.
pub fn rotation_angles(resolution_deg: f32) -> Vec<f32> {
    (0u32..)
        .map(|i| i as f32 * resolution_deg)
        .take_while(|angle| *angle < 360.0)
        .collect()
}

/// True when `angle` lies within `[start, start + span)`, following the
/// rotation past 360 degrees.
pub fn in_sector(angle: f32, start: f32, span: f32) -> bool {
    (angle - start).rem_euclid(360.0) < span
}
