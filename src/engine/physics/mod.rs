// Physics: entity bodies, gravity integration and mask-based collision
//
// Collision is axis separated. Horizontal motion is checked with
// probe-revert tests before input is applied; vertical motion is applied
// first and overlaps are then resolved by snapping to the touched edge.

pub mod body;
pub mod collision;
pub mod kinematics;
pub mod mask;

pub use body::Body;
pub use collision::{probe_sides, resolve_vertical, Collider, ContactSide, Kinematic};
pub use mask::PixelMask;
