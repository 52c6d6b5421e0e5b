mod ball;
mod body;
mod integrator;

pub use ball::{random_color, BallState, COLOR_CHANNEL_MAX, COLOR_CHANNEL_MIN, THROW_LIFT};
pub use body::{Body, BodyDesc, BodyKind, MOVING_SPEED_THRESHOLD};
pub use integrator::{
    clamp_to_floor, integrate_ball, integrate_body, step_body, DampingMode, LINEAR_DAMPING,
    REFERENCE_DT, SPIN_DAMPING,
};
