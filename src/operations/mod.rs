//! Combinator building blocks
//!
//! Distance combination rules for the CSG operations and the point maps
//! used by the spatial combinators (affine placement, radial
//! segmentation, rectangular tiling).
//!
//! Author: Moroya Sakamoto

mod affine;
mod array;
mod combine;
mod segmented;

pub use affine::affine_point;
pub use array::array_cell_point;
pub use combine::{sdb_difference, sdb_intersection, sdb_union};
pub use segmented::{radial_coordinate, select_segment};
