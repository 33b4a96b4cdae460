// Per-frame gravity and position integration

use super::body::Body;

/// Vertical acceleration applied this frame
///
/// Grows linearly with the number of frames spent falling and is capped at
/// one unit per frame. The cap limits how fast velocity grows, not the
/// velocity itself.
pub fn gravity_increment(fall_frames: u32, fps: u32, gravity: f32) -> f32 {
    if fps == 0 {
        return 0.0;
    }
    ((fall_frames as f32 / fps as f32) * gravity).min(1.0)
}

/// Accumulate gravity into the vertical velocity and move the body by its
/// velocity. Horizontal velocity is left as set by input handling.
pub fn integrate(body: &mut Body, fall_frames: u32, fps: u32, gravity: f32) {
    body.velocity.y += gravity_increment(fall_frames, fps, gravity);
    let velocity = body.velocity;
    body.translate(velocity);
}
