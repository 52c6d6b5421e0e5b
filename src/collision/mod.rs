pub mod boundary;
pub mod contact;
mod handle;

pub use boundary::{resolve_boundary, WorldBounds, FLOOR_CONTACT_TOLERANCE};
pub use contact::{
    resolve_collision, Resolution, SphereContact, BALL_JITTER, CORRECTION_PERCENT,
    CORRECTION_SLOP, FALLBACK_NORMAL,
};
pub use handle::BodyHandle;
