//! Geometry

// Define macros for property based testing.
#[cfg(test)]
#[macro_export]
macro_rules! prop_range {
    ($name: ident, $t: ty, $r: expr) => {
        prop_compose! {
            fn $name()(f in $r) -> $t {
                f
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_point2 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr) -> Point2<$t> {
                Point2 { x, y }
            }
        }
    };
}

/// Generates unit vectors uniformly distributed on the sphere, optionally
/// restricted to the upper (+z) hemisphere.
#[cfg(test)]
#[macro_export]
macro_rules! prop_unit_vector3 {
    ($name: ident) => {
        prop_compose! {
            fn $name()(z in -0.999f32..0.999f32, phi in 0.0f32..6.283f32) -> Vector3f {
                let r = (1.0 - z * z).sqrt();
                Vector3f::new(r * phi.cos(), r * phi.sin(), z)
            }
        }
    };
    ($name: ident, upper) => {
        prop_compose! {
            fn $name()(z in 0.01f32..0.999f32, phi in 0.0f32..6.283f32) -> Vector3f {
                let r = (1.0 - z * z).sqrt();
                Vector3f::new(r * phi.cos(), r * phi.sin(), z)
            }
        }
    };
}

mod bounds3;
mod common;
mod frame;
mod normal3;
mod point2;
mod point3;
mod ray;
mod shape;
mod vector3;

// Re-export
pub use bounds3::*;
pub use common::*;
pub use frame::*;
pub use normal3::*;
pub use point2::*;
pub use point3::*;
pub use ray::*;
pub use shape::*;
pub use vector3::*;
