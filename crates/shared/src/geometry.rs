//! Point transforms: translate, rotate about an axis, scale.

use glam::{Mat4, Vec3};

/// Point in 3D space
pub type Point3 = Vec3;

/// Offset a point
pub fn translate(point: Point3, offset: Vec3) -> Point3 {
    point + offset
}

/// Rotate a point by `angle` radians about `axis` (through the origin).
///
/// The axis is normalized before building the rotation matrix. An axis that
/// cannot be normalized (zero length, NaN or infinite) leaves the point
/// unchanged.
pub fn rotate(point: Point3, angle: f32, axis: Vec3) -> Point3 {
    let Some(axis) = axis.try_normalize() else {
        return point;
    };
    Mat4::from_axis_angle(axis, angle)
        .mul_vec4(point.extend(1.0))
        .truncate()
}

/// Componentwise scale
pub fn scale(point: Point3, factors: Vec3) -> Point3 {
    point * factors
}

pub fn translate_all(points: &[Point3], offset: Vec3) -> Vec<Point3> {
    points.iter().map(|&p| translate(p, offset)).collect()
}

pub fn rotate_all(points: &[Point3], angle: f32, axis: Vec3) -> Vec<Point3> {
    points.iter().map(|&p| rotate(p, angle, axis)).collect()
}

pub fn scale_all(points: &[Point3], factors: Vec3) -> Vec<Point3> {
    points.iter().map(|&p| scale(p, factors)).collect()
}
