use glam::{EulerRot, Mat3, Quat, Vec3};

const DEFAULT_FORWARD: Vec3 = Vec3::Z;
const DEFAULT_UP: Vec3 = Vec3::Y;

/// Orientation basis for a look-at pose, columns = [right, up, forward].
pub fn look_at_orientation(position: Vec3, target: Vec3, up: Vec3) -> Mat3 {
    let forward = (target - position).normalize_or_zero();
    if forward == Vec3::ZERO {
        return Mat3::IDENTITY;
    }
    let reference_up = if up.normalize_or_zero() == Vec3::ZERO { DEFAULT_UP } else { up };
    let mut right = reference_up.cross(forward).normalize_or_zero();
    if right == Vec3::ZERO {
        // Up is parallel to the view direction; pick a fallback axis.
        let fallback = if forward.dot(DEFAULT_UP).abs() > 0.999 { DEFAULT_FORWARD } else { DEFAULT_UP };
        right = fallback.cross(forward).normalize();
    }
    let ortho_up = forward.cross(right);
    Mat3::from_cols(right, ortho_up, forward)
}

/// Rotation matrix applying yaw about Y, then pitch about X, then roll about Z.
pub fn yaw_pitch_roll(yaw_radians: f32, pitch_radians: f32, roll_radians: f32) -> Mat3 {
    Mat3::from_euler(EulerRot::YXZ, yaw_radians, pitch_radians, roll_radians)
}

/// Recovers (yaw, pitch, roll) in degrees from an orientation basis.
///
/// Exact inverse of [`yaw_pitch_roll`] for pitch within (-90, 90) degrees;
/// at the gimbal poles yaw and roll are not separable and one solution is
/// returned.
pub fn extract_yaw_pitch_roll_degrees(orientation: Mat3) -> Vec3 {
    let (yaw, pitch, roll) = Quat::from_mat3(&orientation).to_euler(EulerRot::YXZ);
    Vec3::new(yaw.to_degrees(), pitch.to_degrees(), roll.to_degrees())
}
