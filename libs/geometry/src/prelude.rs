//! A prelude containing commonly used items.

pub use crate::bbox::Bbox;
pub use crate::dir::Dir;
pub use crate::point::Point;
pub use crate::polygon::Polygon;
pub use crate::rect::Rect;
pub use crate::side::Side;
pub use crate::transform::{
    reflect_point, reflect_points, rotate_point, rotate_points, Transform, TransformMut,
    Transformation, Translate, TranslateMut,
};
pub use crate::wrap_angle;
