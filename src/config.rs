use bevy::prelude::*;

/// Page canvas the primary window binds to on wasm32.
pub const CONTAINER_CANVAS: &str = "#toolsContainer";
pub const BACKGROUND: Color = Color::srgb(0.133, 0.157, 0.192);

/// Motion (per rendered frame, no delta-time scaling)
pub const FRICTION: f32 = 0.99;
pub const WALL_BOUNCE: f32 = 0.8;
pub const SPIN_BOUNCE: f32 = -0.9;

/// Initial motion: each axis samples (u - 0.5) * MAX_SPEED
pub const NARROW_MAX_SPEED: f32 = 0.8;
pub const WIDE_MAX_SPEED: f32 = 1.5;
pub const MAX_SPIN: f32 = 0.8; // degrees per frame, same sampling

/// Viewport classes
pub const NARROW_BREAKPOINT: f32 = 768.0; // logical px, inclusive
pub const NARROW_MAX_TOKENS: usize = 8;
pub const NARROW_TOKEN_SIZE: f32 = 50.0;
pub const WIDE_TOKEN_SIZE: f32 = 75.0;

/// Scheduling (seconds)
pub const START_STAGGER: f32 = 0.150;
pub const RESIZE_SETTLE: f32 = 0.250;
pub const ORIENTATION_SETTLE: f32 = 0.300;

/// Hover / touch emphasis
pub const HOVER_SCALE: f32 = 1.2;
pub const HOVER_TILT_DEG: f32 = 5.0;
pub const BASE_Z: f32 = 1.0;
pub const HOVER_Z: f32 = 100.0;

/// Icons live under assets/ICON_DIR
pub const ICON_DIR: &str = "logos";
pub const FALLBACK_FONT_SIZE: f32 = 28.0;
pub const FALLBACK_COLOR: Color = Color::srgb(0.0, 0.678, 0.710);
