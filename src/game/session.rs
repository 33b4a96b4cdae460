// Game session: the per-frame world step and level progression

use glam::Vec2;
use log::{debug, error, info};

use crate::engine::assets::Frame;
use crate::engine::game_loop::FrameContext;
use crate::engine::input::InputSnapshot;
use crate::engine::physics::{probe_sides, resolve_vertical, Collider, ContactSide, Kinematic};
use crate::game::camera::Camera;
use crate::game::level::{LevelAssets, LevelDescription, LevelError, Variant};
use crate::game::obstacles::{Obstacle, ObstacleKind};
use crate::game::player::Player;
use crate::game::settings::GameSettings;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The world is advancing
    Playing,
    /// Health ran out; the world is frozen until restart
    GameOver,
    /// The last level was finished
    Won,
    /// The player asked to leave
    Quit,
}

/// Things that happened during the last step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A jump started; carries the jump number since landing
    Jumped(u8),
    Landed,
    HeadBump,
    Damaged { health: i32 },
    LevelComplete(Variant),
    GameOver,
    Restarted(Variant),
    Won,
    Quit,
}

/// One image to draw, in window coordinates
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub frame: &'a Frame,
    pub screen: Vec2,
}

/// Everything an external renderer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderSnapshot<'a> {
    pub offset_x: f32,
    pub player: DrawItem<'a>,
    /// Sheet the player image comes from, e.g. `run_left`
    pub player_sprite: String,
    pub obstacles: Vec<(ObstacleKind, DrawItem<'a>)>,
    pub health: i32,
    pub level: usize,
    pub state: SessionState,
}

/// A running game: one level's world plus everything needed to rebuild it
pub struct Session {
    settings: GameSettings,
    assets: LevelAssets,
    variant: Variant,
    player: Player,
    obstacles: Vec<Obstacle>,
    camera: Camera,
    state: SessionState,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Start a session at `variant`
    ///
    /// Every level is built once up front, so a level that cannot be built
    /// fails here rather than halfway through a game.
    pub fn new(
        settings: GameSettings,
        mut assets: LevelAssets,
        variant: Variant,
    ) -> Result<Self, LevelError> {
        for level in Variant::ALL {
            LevelDescription::for_variant(level, &settings).build(&mut assets)?;
        }

        let world = LevelDescription::for_variant(variant, &settings).build(&mut assets)?;
        let camera = Self::start_camera(&settings);
        info!(
            "Starting level {} with {} obstacles",
            variant.number(),
            world.obstacles.len()
        );

        Ok(Self {
            settings,
            assets,
            variant,
            player: world.player,
            obstacles: world.obstacles,
            camera,
            state: SessionState::Playing,
            events: Vec::new(),
        })
    }

    fn start_camera(settings: &GameSettings) -> Camera {
        Camera::new(
            settings.initial_offset_x,
            settings.width(),
            settings.scroll_area_width,
        )
    }

    /// Run one frame
    pub fn step(&mut self, input: InputSnapshot, ctx: &FrameContext) {
        self.events.clear();

        if self.state == SessionState::Quit {
            return;
        }
        if input.quit {
            info!("Quit requested");
            self.state = SessionState::Quit;
            self.events.push(SessionEvent::Quit);
            return;
        }

        match self.state {
            SessionState::Playing => self.advance_world(input, ctx),
            SessionState::GameOver | SessionState::Won => {
                if input.restart {
                    self.restart();
                }
            }
            SessionState::Quit => {}
        }
    }

    fn advance_world(&mut self, input: InputSnapshot, ctx: &FrameContext) {
        if input.jump && self.player.try_jump() {
            self.events
                .push(SessionEvent::Jumped(self.player.jump_count()));
        }

        self.player.tick(ctx.fps);
        for obstacle in &mut self.obstacles {
            obstacle.tick();
        }

        // Horizontal: probe both sides, then let input move only toward a free side
        self.player.stop();
        let reach = self.player.stats().probe_reach();
        let probe = probe_sides(&mut self.player, reach, &self.obstacles);
        if input.left && !probe.blocked_left() {
            self.player.move_left();
        }
        if input.right && !probe.blocked_right() {
            self.player.move_right();
        }

        // Vertical
        let dy = self.player.velocity().y;
        let contacts = resolve_vertical(&mut self.player, dy, &self.obstacles);
        if contacts.iter().any(|c| c.side == ContactSide::Floor) {
            debug!(
                "Frame {}: landed at y = {}",
                ctx.frame,
                self.player.bounds().bottom()
            );
            self.events.push(SessionEvent::Landed);
        }
        if contacts.iter().any(|c| c.side == ContactSide::Ceiling) {
            debug!("Head bump, vy now {}", self.player.velocity().y);
            self.events.push(SessionEvent::HeadBump);
        }

        let touched = probe
            .left
            .into_iter()
            .chain(probe.right)
            .chain(contacts.iter().map(|c| c.index));

        let mut level_complete = false;
        for index in touched {
            let Some(obstacle) = self.obstacles.get(index) else {
                continue;
            };
            match obstacle.kind() {
                kind if kind.is_hazard() => {
                    if self.player.take_damage() {
                        debug!("Frame {}: hit by {}", ctx.frame, kind.name());
                        self.events.push(SessionEvent::Damaged {
                            health: self.player.health(),
                        });
                    }
                }
                ObstacleKind::LevelEnd => level_complete = true,
                _ => {}
            }
        }

        if !self.player.is_alive() {
            info!(
                "Game over on level {} after {:.1}s",
                self.variant.number(),
                ctx.elapsed.as_secs_f32()
            );
            self.state = SessionState::GameOver;
            self.events.push(SessionEvent::GameOver);
            return;
        }

        self.camera
            .follow(self.player.bounds(), self.player.velocity().x);

        if level_complete {
            self.complete_level();
        }
    }

    fn complete_level(&mut self) {
        info!("Level {} complete", self.variant.number());
        self.events.push(SessionEvent::LevelComplete(self.variant));

        match self.variant.next() {
            Some(next) => self.load_level(next),
            None => {
                info!("All levels complete");
                self.state = SessionState::Won;
                self.events.push(SessionEvent::Won);
            }
        }
    }

    /// Rebuild the world from scratch
    ///
    /// After a game over the current level starts again; after winning the
    /// game starts over from the first level.
    pub fn restart(&mut self) {
        let variant = match self.state {
            SessionState::Won => Variant::ALL[0],
            _ => self.variant,
        };
        info!("Restarting at level {}", variant.number());
        self.load_level(variant);
        if self.state == SessionState::Playing {
            self.events.push(SessionEvent::Restarted(variant));
        }
    }

    fn load_level(&mut self, variant: Variant) {
        let description = LevelDescription::for_variant(variant, &self.settings);
        match description.build(&mut self.assets) {
            Ok(world) => {
                info!(
                    "Starting level {} with {} obstacles",
                    variant.number(),
                    world.obstacles.len()
                );
                self.variant = variant;
                self.player = world.player;
                self.obstacles = world.obstacles;
                self.camera = Self::start_camera(&self.settings);
                self.state = SessionState::Playing;
            }
            Err(err) => {
                error!("{err}");
                self.state = SessionState::Quit;
                self.events.push(SessionEvent::Quit);
            }
        }
    }

    /// Events from the last step, in the order they happened
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    #[cfg(test)]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[cfg(test)]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[cfg(test)]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[cfg(test)]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current frame as draw items
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        let player = DrawItem {
            frame: self.player.current_frame(),
            screen: self.camera.to_screen(self.player.position()),
        };
        let obstacles = self
            .obstacles
            .iter()
            .map(|o| {
                let item = DrawItem {
                    frame: o.current_frame(),
                    screen: self.camera.to_screen(o.position()),
                };
                (o.kind(), item)
            })
            .collect();

        RenderSnapshot {
            offset_x: self.camera.offset_x(),
            player,
            player_sprite: self.player.sprite_key(),
            obstacles,
            health: self.player.health(),
            level: self.variant.number(),
            state: self.state,
        }
    }

    /// One-line status for the window title
    pub fn hud_text(&self) -> String {
        match self.state {
            SessionState::Playing => format!(
                "Level {} - Health: {}",
                self.variant.number(),
                self.player.health()
            ),
            SessionState::GameOver => "Game Over - press R to restart or Q to quit".to_string(),
            SessionState::Won => "You win! - press R to play again or Q to quit".to_string(),
            SessionState::Quit => "Quitting".to_string(),
        }
    }
}
