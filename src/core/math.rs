//! 数学类型别名
//!
//! 基于 `nalgebra`，统一使用 `f32`。

pub use nalgebra::{Point3 as Pt3, Unit, Matrix4 as Mat4, Vector3 as Vec3};

pub type Vector3 = Vec3<f32>;
pub type Point3 = Pt3<f32>;
pub type Matrix4 = Mat4<f32>;

/// 数学常量
pub mod constants {
    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;
}

/// 从数组构造向量
#[inline]
pub fn vec3(v: [f32; 3]) -> Vector3 {
    Vector3::new(v[0], v[1], v[2])
}

/// 从数组构造点
#[inline]
pub fn point3(v: [f32; 3]) -> Point3 {
    Point3::new(v[0], v[1], v[2])
}

/// 归一化，零向量原样返回
pub fn normalize_or_zero(v: Vector3) -> Vector3 {
    v.try_normalize(constants::EPSILON).unwrap_or(v)
}

/// 近似比较两个矩阵
pub fn approx_eq(a: &Matrix4, b: &Matrix4, epsilon: f32) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= epsilon)
}
