use bevy::prelude::*;
use thiserror::Error;
use tracing::debug;

use super::token::ToolToken;
use super::tools::ToolDescriptor;
use super::viewport::ViewportClass;
use crate::config::*;

/// Parent of every visual in one build. Despawning it removes the whole swarm.
#[derive(Component, Debug)]
pub struct SwarmRoot;

/// Node entity of one token (carries the projected Transform).
#[derive(Component, Debug, Clone, Copy)]
pub struct ToolIcon {
    pub index: usize,
}

/// Hidden label child shown when the icon image fails to load.
#[derive(Component, Debug)]
pub struct IconFallback;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SwarmError {
    #[error("no container region to build the tool swarm in")]
    MissingContainer,
}

/// Per-token simulation task. Each tick a task either steps once or does nothing;
/// `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenTask {
    Pending { starts_at: f32 },
    Running,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct TokenSlot {
    pub tool: ToolDescriptor,
    pub token: ToolToken,
    pub task: TokenTask,
    pub node: Entity,
    pub sprite: Entity,
    pub label: Entity,
    pub icon: Handle<Image>,
    pub fallback_shown: bool,
}

impl TokenSlot {
    /// Interaction is only registered once the token's task has started.
    pub fn listening(&self) -> bool {
        self.task == TokenTask::Running
    }
}

/// Covers every token of one build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwarmHandle {
    pub root: Entity,
    pub generation: u64,
    pub tokens: usize,
}

/// Inputs a build reads from the host.
#[derive(Clone, Copy, Debug)]
pub struct BuildContext {
    /// Container size in logical px; None when there is no container.
    pub container: Option<Vec2>,
    /// Width of the page viewport, which picks the narrow/wide class. This is
    /// not the container width: the container can be a box inside a wider page.
    pub viewport_width: f32,
    /// Clock (seconds) the start stagger is measured from.
    pub now: f32,
}

/// Entities to flip when an icon falls back to its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconSwap {
    pub sprite: Entity,
    pub label: Entity,
}

/// Owns the tokens of the current build and their tasks.
#[derive(Resource, Default, Debug)]
pub struct SwarmManager {
    generation: u64,
    root: Option<Entity>,
    slots: Vec<TokenSlot>,
}

impl SwarmManager {
    /// Tear down the previous build and populate the container with a fresh one.
    ///
    /// `load_icon` requests the image for a descriptor; `sample` yields uniform
    /// values in `[0, 1)` for positions, angles and velocities.
    pub fn build(
        &mut self,
        commands: &mut Commands,
        ctx: BuildContext,
        tools: &[ToolDescriptor],
        mut load_icon: impl FnMut(&ToolDescriptor) -> Handle<Image>,
        mut sample: impl FnMut() -> f32,
    ) -> Result<SwarmHandle, SwarmError> {
        self.teardown(commands);
        let container = ctx.container.ok_or(SwarmError::MissingContainer)?;

        let viewport = ViewportClass::from_width(ctx.viewport_width);
        let count = viewport.token_budget(tools.len());
        let size = viewport.token_size();
        let speed = viewport.max_speed();
        let room = (container - Vec2::splat(size)).max(Vec2::ZERO);
        let font_size = FALLBACK_FONT_SIZE * size / WIDE_TOKEN_SIZE;

        self.generation += 1;
        let root = commands
            .spawn((SwarmRoot, Transform::default(), Visibility::default()))
            .id();

        for (index, tool) in tools.iter().take(count).enumerate() {
            let position = Vec2::new(sample() * room.x, sample() * room.y);
            let rotation = sample() * 360.0;
            let velocity = Vec2::new((sample() - 0.5) * speed, (sample() - 0.5) * speed);
            let rotation_speed = (sample() - 0.5) * MAX_SPIN;
            let token = ToolToken::new(position, velocity, rotation, rotation_speed, size);

            let icon = load_icon(tool);
            let node = commands
                .spawn((
                    ToolIcon { index },
                    token.to_transform(container),
                    Visibility::default(),
                    ChildOf(root),
                ))
                .id();
            let sprite = commands
                .spawn((
                    Sprite {
                        image: icon.clone(),
                        custom_size: Some(Vec2::splat(size)),
                        ..default()
                    },
                    Transform::default(),
                    ChildOf(node),
                ))
                .id();
            let label = commands
                .spawn((
                    IconFallback,
                    Text2d::new(tool.fallback_glyph()),
                    TextFont {
                        font_size,
                        ..default()
                    },
                    TextColor(FALLBACK_COLOR),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                    Visibility::Hidden,
                    ChildOf(node),
                ))
                .id();

            self.slots.push(TokenSlot {
                tool: tool.clone(),
                token,
                task: TokenTask::Pending {
                    starts_at: ctx.now + index as f32 * START_STAGGER,
                },
                node,
                sprite,
                label,
                icon,
                fallback_shown: false,
            });
        }
        self.root = Some(root);

        debug!(
            generation = self.generation,
            tokens = count,
            ?viewport,
            width = container.x,
            height = container.y,
            "built tool swarm"
        );
        Ok(SwarmHandle {
            root,
            generation: self.generation,
            tokens: count,
        })
    }

    /// Drop every task and despawn every visual of the current build.
    /// Returns false when there was nothing to tear down.
    pub fn teardown(&mut self, commands: &mut Commands) -> bool {
        let Some(root) = self.root.take() else {
            return false;
        };
        let tokens = self.slots.len();
        self.slots.clear();

        // The root may already be gone if the host despawned it.
        if let Ok(mut entity) = commands.get_entity(root) {
            entity.try_despawn();
        }
        debug!(generation = self.generation, tokens, "tore down tool swarm");
        true
    }

    /// Advance one rendered frame. `container` is None once the container is
    /// detached, which stops every task for good.
    ///
    /// Returns how many tokens stepped.
    pub fn tick(&mut self, now: f32, container: Option<Vec2>) -> usize {
        let Some(extents) = container else {
            self.detach();
            return 0;
        };

        let mut stepped = 0;
        for slot in &mut self.slots {
            match slot.task {
                TokenTask::Stopped => continue,
                TokenTask::Pending { starts_at } if now < starts_at => continue,
                TokenTask::Pending { .. } => {
                    // The spin angle restarts from zero once motion begins.
                    slot.task = TokenTask::Running;
                    slot.token.rotation = 0.0;
                }
                TokenTask::Running => {}
            }
            if slot.token.step(extents) {
                stepped += 1;
            }
        }
        stepped
    }

    /// Feed every active pointer (cursor and touches) in container coordinates.
    pub fn update_pointers(&mut self, points: &[Vec2]) {
        for slot in self.slots.iter_mut().filter(|s| s.listening()) {
            let hit = points.iter().any(|&p| slot.token.contains(p));
            match (hit, slot.token.paused) {
                (true, false) => slot.token.on_interaction_start(),
                (false, true) => slot.token.on_interaction_end(),
                _ => {}
            }
        }
    }

    /// Switch token `index` to its fallback label. Yields the entities to flip
    /// the first time only.
    pub fn icon_failed(&mut self, index: usize) -> Option<IconSwap> {
        let slot = self.slots.get_mut(index)?;
        if slot.fallback_shown {
            return None;
        }
        slot.fallback_shown = true;
        debug!(tool = %slot.tool.name, "icon failed to load, showing fallback");
        Some(IconSwap {
            sprite: slot.sprite,
            label: slot.label,
        })
    }

    /// Hide the sprite and reveal the letter label of each failed icon in
    /// `failed`. Tokens already switched, or not in the list, are untouched.
    /// Returns how many tokens switched.
    pub fn show_fallbacks(&mut self, commands: &mut Commands, failed: &[usize]) -> usize {
        let mut switched = 0;
        for &index in failed {
            let Some(swap) = self.icon_failed(index) else {
                continue;
            };
            if let Ok(mut sprite) = commands.get_entity(swap.sprite) {
                sprite.try_insert(Visibility::Hidden);
            }
            if let Ok(mut label) = commands.get_entity(swap.label) {
                label.try_insert(Visibility::Visible);
            }
            switched += 1;
        }
        switched
    }

    pub fn slots(&self) -> &[TokenSlot] {
        &self.slots
    }

    pub fn handle(&self) -> Option<SwarmHandle> {
        self.root.map(|root| SwarmHandle {
            root,
            generation: self.generation,
            tokens: self.slots.len(),
        })
    }

    fn detach(&mut self) {
        let mut stopped = 0;
        for slot in &mut self.slots {
            if slot.task != TokenTask::Stopped {
                slot.task = TokenTask::Stopped;
                stopped += 1;
            }
        }
        if stopped > 0 {
            debug!(stopped, "container detached, stopping tool tasks");
        }
    }
}
