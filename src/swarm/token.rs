use bevy::prelude::*;

use crate::config::*;

/// Numeric state of one floating tool icon.
///
/// Coordinates are container-local: origin at the top-left corner, +Y down,
/// `position` is the icon's top-left corner. The rendered `Transform` is a
/// projection of this state (see [`ToolToken::to_transform`]) and is never
/// read back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolToken {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Screen degrees, clockwise.
    pub rotation: f32,
    /// Degrees per frame.
    pub rotation_speed: f32,
    /// Set while a pointer or touch rests on the token.
    pub paused: bool,
    /// Edge length in logical px, fixed for the token's lifetime.
    pub size: f32,
}

impl ToolToken {
    pub fn new(position: Vec2, velocity: Vec2, rotation: f32, rotation_speed: f32, size: f32) -> Self {
        Self {
            position,
            velocity,
            rotation,
            rotation_speed,
            paused: false,
            size,
        }
    }

    /// Largest legal top-left offset inside `extents`.
    /// Collapses to zero on axes where the container is smaller than the token.
    pub fn max_offset(&self, extents: Vec2) -> Vec2 {
        (extents - Vec2::splat(self.size)).max(Vec2::ZERO)
    }

    /// Advance one frame: friction, integration, then wall collisions.
    ///
    /// Returns false (and changes nothing) while paused.
    pub fn step(&mut self, extents: Vec2) -> bool {
        if self.paused {
            return false;
        }

        self.velocity *= FRICTION;
        self.position += self.velocity;
        self.rotation += self.rotation_speed;

        let max = self.max_offset(extents);
        bounce_axis(
            &mut self.position.x,
            &mut self.velocity.x,
            &mut self.rotation_speed,
            max.x,
        );
        bounce_axis(
            &mut self.position.y,
            &mut self.velocity.y,
            &mut self.rotation_speed,
            max.y,
        );
        true
    }

    /// Pointer-enter / touch-start.
    pub fn on_interaction_start(&mut self) {
        self.paused = true;
    }

    /// Pointer-leave / touch-end / touch-cancel. Motion resumes from the
    /// frozen state; velocity is left as it was.
    pub fn on_interaction_end(&mut self) {
        self.paused = false;
    }

    /// Hit test in container-local coordinates (unrotated bounding box).
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.position;
        let max = self.position + Vec2::splat(self.size);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Centre of the token in container-local coordinates.
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size * 0.5)
    }

    /// Project onto a Bevy 2D transform for a container of `extents`.
    ///
    /// Bevy's default 2D camera puts the origin at the window centre with +Y up,
    /// so the centre is flipped on Y and screen-clockwise degrees become a
    /// negative Z rotation. A paused token shows the hover emphasis instead of
    /// its own spin.
    pub fn to_transform(&self, extents: Vec2) -> Transform {
        let c = self.center();
        let world = Vec2::new(c.x - extents.x * 0.5, extents.y * 0.5 - c.y);

        let (degrees, scale, z) = if self.paused {
            (HOVER_TILT_DEG, HOVER_SCALE, HOVER_Z)
        } else {
            (self.rotation, 1.0, BASE_Z)
        };

        Transform::from_translation(world.extend(z))
            .with_rotation(Quat::from_rotation_z(-degrees.to_radians()))
            .with_scale(Vec3::splat(scale))
    }
}

/// Clamp one axis into [0, max] and reflect on contact.
/// Touching a wall reverses and damps both the axis velocity and the spin.
#[inline]
fn bounce_axis(pos: &mut f32, vel: &mut f32, spin: &mut f32, max: f32) {
    if *pos <= 0.0 {
        *pos = 0.0;
    } else if *pos >= max {
        *pos = max;
    } else {
        return;
    }
    *vel = -*vel * WALL_BOUNCE;
    *spin *= SPIN_BOUNCE;
}
