/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f32;
pub type Int = i32;
pub type UInt = u32;

pub type Vector2f = na::Vector2<Float>;
pub type Vector3f = na::Vector3<Float>;
pub type Vector4f = na::Vector4<Float>;
pub type Matrix4f = na::Matrix4<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = 3.14159265359;
pub const INV_PI: Float = 0.31830988618;
pub const INV_2PI: Float = 0.15915494309;

pub const FLOAT_MIN: Float = std::f32::MIN;
pub const FLOAT_MAX: Float = std::f32::MAX;

// Offset applied along the shading normal before casting secondary rays.
pub const SHADOW_EPSILON: Float = 1e-3;
