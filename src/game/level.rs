// Level layouts and world construction
//
// A level is pure data: a spawn point and an ordered obstacle list. The
// order matters, since collision probes report the first obstacle hit, so
// layouts are listed in a fixed, reproducible order.

use glam::Vec2;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::assets::{AssetError, AssetLoader, AssetResult, Frame, SpriteLibrary, TerrainSheet};
use crate::game::obstacles::{Obstacle, Oscillator};
use crate::game::player::{AnimationSet, Player, PlayerStats, FIRE_STATS, SAW_STATS, SPIKE_HEAD_STATS};
use crate::game::settings::GameSettings;

/// Level construction errors
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("Level {level}: cannot build {obstacle}: {source}")]
    Obstacle {
        level: usize,
        obstacle: &'static str,
        source: AssetError,
    },
}

/// The three levels, each with its own hazard, character and tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Fire,
    Saw,
    SpikeHead,
}

impl Variant {
    /// Levels in play order
    pub const ALL: [Variant; 3] = [Self::Fire, Self::Saw, Self::SpikeHead];

    /// 1-based level number
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    fn index(&self) -> usize {
        match self {
            Self::Fire => 0,
            Self::Saw => 1,
            Self::SpikeHead => 2,
        }
    }

    pub fn stats(&self) -> PlayerStats {
        match self {
            Self::Fire => FIRE_STATS,
            Self::Saw => SAW_STATS,
            Self::SpikeHead => SPIKE_HEAD_STATS,
        }
    }

    /// Character sheet directory under `MainCharacters`
    pub fn character(&self) -> &'static str {
        match self {
            Self::Fire => "VirtualGuy",
            Self::Saw => "PinkMan",
            Self::SpikeHead => "MaskDude",
        }
    }

    /// The level after this one
    pub fn next(&self) -> Option<Variant> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

/// Top-left corner of a tile on the terrain sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerrainSprite {
    pub x: u32,
    pub y: u32,
}

impl TerrainSprite {
    pub const fn at(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

pub const STONE: TerrainSprite = TerrainSprite::at(0, 0);
pub const GRASS: TerrainSprite = TerrainSprite::at(96, 0);
pub const COPPER: TerrainSprite = TerrainSprite::at(192, 0);
pub const WOOD: TerrainSprite = TerrainSprite::at(0, 64);
pub const EMERALD: TerrainSprite = TerrainSprite::at(0, 128);
pub const BROWN_GRASS: TerrainSprite = TerrainSprite::at(96, 64);
pub const PURPLE_GRASS: TerrainSprite = TerrainSprite::at(96, 128);
pub const GOAL: TerrainSprite = TerrainSprite::at(272, 128);

/// The two on/off trap types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapType {
    Fire,
    Saw,
}

/// One obstacle in a level layout
#[derive(Debug, Clone, PartialEq)]
pub enum ObstacleSpec {
    Block {
        at: Vec2,
        sprite: TerrainSprite,
    },
    LevelEnd {
        at: Vec2,
        sprite: TerrainSprite,
    },
    Trap {
        at: Vec2,
        trap: TrapType,
        lit: bool,
    },
    SpikeHead {
        at: Vec2,
        speed: f32,
        min_y: f32,
        max_y: f32,
    },
    MovingPlatform {
        at: Vec2,
        size: Vec2,
        speed: f32,
        min_y: f32,
        max_y: f32,
    },
}

impl ObstacleSpec {
    fn name(&self) -> &'static str {
        match self {
            Self::Block { .. } => "block",
            Self::LevelEnd { .. } => "level end",
            Self::Trap {
                trap: TrapType::Fire,
                ..
            } => "fire trap",
            Self::Trap {
                trap: TrapType::Saw,
                ..
            } => "saw trap",
            Self::SpikeHead { .. } => "spike head",
            Self::MovingPlatform { .. } => "moving platform",
        }
    }
}

/// Every sprite a level can need, loaded once per session
pub struct LevelAssets {
    terrain: TerrainSheet,
    block_size: u32,
    blocks: HashMap<TerrainSprite, Arc<[Frame]>>,
    fire_on: Arc<[Frame]>,
    fire_off: Arc<[Frame]>,
    saw_on: Arc<[Frame]>,
    saw_off: Arc<[Frame]>,
    spike_blink: Arc<[Frame]>,
    characters: [AnimationSet; 3],
}

impl LevelAssets {
    /// Load terrain, traps and all three characters
    pub fn load(loader: &AssetLoader, block_size: u32) -> AssetResult<Self> {
        let terrain_path = loader.base_path().join("Terrain").join("Terrain.png");
        let terrain = TerrainSheet::new(loader.load_image(&terrain_path)?);

        let fire = SpriteLibrary::load(loader, "Traps", "Fire", 16, 32, false)?;
        let saw = SpriteLibrary::load(loader, "Traps", "Saw", 38, 80, false)?;
        let spike = SpriteLibrary::load(loader, "Traps", "Spike Head", 54, 70, false)?;

        let characters = [
            AnimationSet::load(loader, Variant::Fire.character())?,
            AnimationSet::load(loader, Variant::Saw.character())?,
            AnimationSet::load(loader, Variant::SpikeHead.character())?,
        ];

        let assets = Self {
            terrain,
            block_size,
            blocks: HashMap::new(),
            fire_on: fire.require("on")?,
            fire_off: fire.require("off")?,
            saw_on: saw.require("on")?,
            saw_off: saw.require("off")?,
            spike_blink: spike.require("Blink (54x52)")?,
            characters,
        };
        info!(
            "Loaded level assets from {} ({} fire, {} saw, {} spike-head sheets)",
            loader.base_path().display(),
            fire.len(),
            saw.len(),
            spike.len()
        );
        Ok(assets)
    }

    /// A terrain block, cut on first use and shared afterwards
    fn block(&mut self, sprite: TerrainSprite) -> Arc<[Frame]> {
        let terrain = &self.terrain;
        let size = self.block_size;
        Arc::clone(
            self.blocks
                .entry(sprite)
                .or_insert_with(|| Arc::from(vec![terrain.block(size, sprite.x, sprite.y)])),
        )
    }

    pub fn character(&self, variant: Variant) -> &AnimationSet {
        &self.characters[variant.index()]
    }

    /// Solid-colour stand-ins sized like the real sprites
    #[cfg(test)]
    pub fn placeholder(block_size: u32) -> Self {
        use image::{Rgba, RgbaImage};

        fn solid(len: usize, w: u32, h: u32) -> Arc<[Frame]> {
            (0..len)
                .map(|i| Frame::solid(w, h, [200, i as u8, 0, 255]))
                .collect::<Vec<_>>()
                .into()
        }

        let sheet = RgbaImage::from_pixel(400, 300, Rgba([90, 60, 30, 255]));
        let character = AnimationSet::uniform(Frame::solid(64, 64, [255, 255, 255, 255]));

        Self {
            terrain: TerrainSheet::new(sheet),
            block_size,
            blocks: HashMap::new(),
            fire_on: solid(3, 32, 64),
            fire_off: solid(1, 32, 64),
            saw_on: solid(8, 76, 160),
            saw_off: solid(1, 76, 160),
            spike_blink: solid(4, 108, 140),
            characters: [character.clone(), character.clone(), character],
        }
    }
}

/// A built level: the player and every obstacle, in layout order
pub struct World {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
}

/// Static description of one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDescription {
    pub variant: Variant,
    /// Top-left corner of the player at level start
    pub spawn: Vec2,
    pub obstacles: Vec<ObstacleSpec>,
}

impl LevelDescription {
    /// The layout for a level
    pub fn for_variant(variant: Variant, settings: &GameSettings) -> Self {
        match variant {
            Variant::Fire => fire_level(settings),
            Variant::Saw => saw_level(settings),
            Variant::SpikeHead => spike_head_level(settings),
        }
    }

    /// Instantiate the player and obstacles
    pub fn build(&self, assets: &mut LevelAssets) -> Result<World, LevelError> {
        let level = self.variant.number();
        let mut obstacles = Vec::with_capacity(self.obstacles.len());

        for spec in &self.obstacles {
            let obstacle = build_obstacle(spec, assets).map_err(|source| LevelError::Obstacle {
                level,
                obstacle: spec.name(),
                source,
            })?;
            obstacles.push(obstacle);
        }

        let player = Player::new(
            self.spawn,
            self.variant.stats(),
            assets.character(self.variant).clone(),
        );

        Ok(World { player, obstacles })
    }
}

fn build_obstacle(spec: &ObstacleSpec, assets: &mut LevelAssets) -> AssetResult<Obstacle> {
    match *spec {
        ObstacleSpec::Block { at, sprite } => Obstacle::block(at, assets.block(sprite)),
        ObstacleSpec::LevelEnd { at, sprite } => Obstacle::level_end(at, assets.block(sprite)),
        ObstacleSpec::Trap { at, trap, lit } => {
            let (on, off) = match trap {
                TrapType::Fire => (&assets.fire_on, &assets.fire_off),
                TrapType::Saw => (&assets.saw_on, &assets.saw_off),
            };
            let mut obstacle = Obstacle::trap(at, Arc::clone(on), Arc::clone(off))?;
            if lit {
                obstacle.switch_on();
            } else {
                obstacle.switch_off();
            }
            Ok(obstacle)
        }
        ObstacleSpec::SpikeHead {
            at,
            speed,
            min_y,
            max_y,
        } => Obstacle::spike_head(
            at,
            Arc::clone(&assets.spike_blink),
            Oscillator::new(speed, min_y, max_y),
        ),
        ObstacleSpec::MovingPlatform {
            at,
            size,
            speed,
            min_y,
            max_y,
        } => Ok(Obstacle::moving_platform(
            at,
            size,
            Oscillator::new(speed, min_y, max_y),
        )),
    }
}

/// Layout helper: positions are given as x plus a row counted up from the
/// bottom of the window, so row 1 is the floor
struct Layout {
    height: f32,
    block: f32,
    width: f32,
    specs: Vec<ObstacleSpec>,
}

impl Layout {
    fn new(settings: &GameSettings) -> Self {
        Self {
            height: settings.height(),
            block: settings.block(),
            width: settings.width(),
            specs: Vec::new(),
        }
    }

    /// y of the top of row `row`
    fn row_y(&self, row: f32) -> f32 {
        self.height - self.block * row
    }

    fn block(&mut self, x: f32, row: f32, sprite: TerrainSprite) {
        let at = Vec2::new(x, self.row_y(row));
        self.specs.push(ObstacleSpec::Block { at, sprite });
    }

    /// Blocks stacked at `x`, one per listed row, in the listed order
    fn column(&mut self, x: f32, rows: impl IntoIterator<Item = u32>, sprite: TerrainSprite) {
        for row in rows {
            self.block(x, row as f32, sprite);
        }
    }

    /// `count` blocks left to right starting at `start_x`
    fn row(&mut self, start_x: f32, row: f32, count: u32, sprite: TerrainSprite) {
        for i in 0..count {
            self.block(start_x + i as f32 * self.block, row, sprite);
        }
    }

    /// The default grass floor spanning one window width either side of 0
    fn floor(&mut self) {
        let per_width = (self.width / self.block).floor() as i32;
        let first = (-self.width / self.block).floor() as i32;
        for i in first..per_width {
            self.block(i as f32 * self.block, 1.0, GRASS);
        }
    }

    fn trap(&mut self, x: f32, y: f32, trap: TrapType) {
        self.specs.push(ObstacleSpec::Trap {
            at: Vec2::new(x, y),
            trap,
            lit: true,
        });
    }

    fn spike_head(&mut self, x: f32, speed: f32, min_y: f32) {
        let at = Vec2::new(x, self.height - self.block - 500.0);
        let max_y = self.height - self.block;
        self.specs.push(ObstacleSpec::SpikeHead {
            at,
            speed,
            min_y,
            max_y,
        });
    }

    fn moving_platform(&mut self, x: f32, row: f32, width_blocks: f32, max_row: f32) {
        let block = self.block;
        self.specs.push(ObstacleSpec::MovingPlatform {
            at: Vec2::new(x, self.row_y(row)),
            size: Vec2::new(block * width_blocks, (block / 4.0).floor()),
            speed: 2.0,
            min_y: self.row_y(7.0),
            max_y: self.row_y(max_row),
        });
    }

    fn level_end(&mut self, x: f32, row: f32) {
        let at = Vec2::new(x, self.row_y(row));
        self.specs.push(ObstacleSpec::LevelEnd { at, sprite: GOAL });
    }

    fn finish(self, variant: Variant, spawn: Vec2) -> LevelDescription {
        LevelDescription {
            variant,
            spawn,
            obstacles: self.specs,
        }
    }
}

fn fire_level(settings: &GameSettings) -> LevelDescription {
    let mut l = Layout::new(settings);
    let ground = l.height - l.block - 64.0;
    let ledge = l.height - l.block * 3.0 - 64.0;

    l.floor();
    for x in [-642.0, -450.0, -355.0, -260.0, 124.0, 220.0, 28.0, -68.0] {
        l.trap(x, ground, TrapType::Fire);
    }
    l.trap(316.0, ledge, TrapType::Fire);
    l.trap(508.0, ledge, TrapType::Fire);

    // Walls
    l.column(-1056.0, 2..=9, WOOD);
    l.column(864.0, [2, 3, 4, 5, 6, 7, 9], WOOD);
    l.block(960.0, 9.0, WOOD);
    l.column(1056.0, [9, 8, 7], WOOD);

    // Platforms
    l.block(-768.0, 2.0, COPPER);
    l.column(-576.0, 2..=3, COPPER);
    l.column(-192.0, 2..=3, COPPER);
    l.block(-291.0, 6.0, COPPER);
    l.block(-3.0, 4.0, COPPER);
    l.column(768.0, [3, 5, 7], COPPER);

    l.block(-3.0, 7.0, WOOD);
    l.block(93.0, 7.0, WOOD);
    l.column(189.0, [7, 6, 5, 4, 3], WOOD);
    l.column(573.0, [8, 7, 6, 5, 4, 3], WOOD);
    l.block(477.0, 3.0, WOOD);
    l.block(285.0, 2.0, WOOD);
    l.block(381.0, 6.0, WOOD);
    l.block(285.0, 3.0, WOOD);

    l.level_end(960.0, 7.0);
    l.row(-960.0, 9.0, 19, WOOD);

    l.finish(Variant::Fire, Vec2::new(-950.0, 600.0))
}

fn saw_level(settings: &GameSettings) -> LevelDescription {
    let mut l = Layout::new(settings);
    let base = l.height - l.block;

    l.moving_platform(-288.0, 6.0, 1.0, 1.8);
    l.floor();
    for (x, lift) in [
        (-760.0, 565.0),
        (-850.0, 180.0),
        (-660.0, 565.0),
        (-660.0, 365.0),
        (-570.0, 365.0),
        (-860.0, 365.0),
        (10.0, 560.0),
        (215.0, 510.0),
        (300.0, 400.0),
        (490.0, 240.0),
    ] {
        l.trap(x, base - lift, TrapType::Saw);
    }

    // Walls
    l.column(-1056.0, 2..=9, STONE);
    l.column(864.0, [2, 4, 5, 6, 7, 8, 9], STONE);
    l.block(960.0, 4.0, STONE);
    l.column(1056.0, [4, 3, 2], STONE);

    // Platforms
    let ledge = TerrainSprite::at(192, 64);
    l.block(-960.0, 7.0, ledge);
    l.block(-864.0, 7.0, ledge);
    l.block(-576.0, 7.0, ledge);
    l.block(-768.0, 5.0, ledge);
    l.block(-480.0, 5.0, ledge);
    l.block(-960.0, 3.0, ledge);
    for x in [-672.0, -576.0, -480.0, -768.0, -384.0, -288.0, -768.0] {
        l.block(x, 2.0, ledge);
    }
    l.block(-96.0, 7.0, ledge);
    l.block(96.0, 7.0, ledge);
    l.block(384.0, 4.0, ledge);
    l.block(576.0, 3.0, ledge);
    l.block(672.0, 2.0, ledge);

    l.column(-384.0, [8, 7, 6, 5, 4], STONE);
    l.column(-192.0, [7, 6, 5, 4, 3, 2], STONE);
    l.column(768.0, [4, 2], STONE);

    l.level_end(960.0, 2.0);
    l.row(-960.0, 9.0, 19, STONE);
    l.row(-1056.0, 1.0, 21, BROWN_GRASS);

    l.finish(Variant::Saw, Vec2::new(-950.0, 100.0))
}

fn spike_head_level(settings: &GameSettings) -> LevelDescription {
    let mut l = Layout::new(settings);
    let h = l.height;

    l.moving_platform(94.0, 6.0, 4.0, 0.0);
    l.floor();
    for (x, speed, min_from_bottom) in [
        (-584.0, 5.0, 800.0),
        (-384.0, 5.0, 500.0),
        (-284.0, 5.0, 600.0),
        (-184.0, 5.0, 700.0),
        (100.0, 4.0, 800.0),
        (240.0, 4.0, 600.0),
        (380.0, 4.0, 700.0),
        (761.0, 7.0, 900.0),
    ] {
        l.spike_head(x, speed, h - min_from_bottom);
    }

    // Walls
    l.column(-1056.0, 2..=12, EMERALD);
    l.column(864.0, (2..=7).chain(9..=15), EMERALD);
    l.block(960.0, 9.0, EMERALD);
    l.column(1056.0, [9, 8, 7], EMERALD);

    // Platforms
    let pillar = TerrainSprite::at(192, 128);
    l.column(-864.0, 2..=5, pillar);
    l.column(-672.0, 2..=3, pillar);
    l.column(-480.0, 2..=3, pillar);
    l.column(0.0, 2..=6, EMERALD);
    l.block(672.0, 2.0, pillar);
    l.column(480.0, 3..=15, EMERALD);

    l.level_end(960.0, 7.0);
    l.row(-1056.0, 1.0, 21, PURPLE_GRASS);

    l.finish(Variant::SpikeHead, Vec2::new(-950.0, 600.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::obstacles::ObstacleKind;

    fn settings() -> GameSettings {
        GameSettings::default()
    }

    fn count(desc: &LevelDescription, pred: impl Fn(&ObstacleSpec) -> bool) -> usize {
        desc.obstacles.iter().filter(|s| pred(s)).count()
    }

    #[test]
    fn test_variant_progression() {
        assert_eq!(Variant::Fire.next(), Some(Variant::Saw));
        assert_eq!(Variant::Saw.next(), Some(Variant::SpikeHead));
        assert_eq!(Variant::SpikeHead.next(), None);
        assert_eq!(Variant::SpikeHead.number(), 3);
    }

    #[test]
    fn test_variant_presets() {
        assert_eq!(Variant::Fire.stats(), FIRE_STATS);
        assert_eq!(Variant::Saw.character(), "PinkMan");
        assert_eq!(Variant::SpikeHead.stats().gravity, 5.0);
    }

    #[test]
    fn test_floor_spans_both_sides() {
        let mut layout = Layout::new(&settings());
        layout.floor();

        assert_eq!(layout.specs.len(), 21);
        assert_eq!(
            layout.specs.first(),
            Some(&ObstacleSpec::Block {
                at: Vec2::new(-1056.0, 704.0),
                sprite: GRASS
            })
        );
        assert_eq!(
            layout.specs.last(),
            Some(&ObstacleSpec::Block {
                at: Vec2::new(864.0, 704.0),
                sprite: GRASS
            })
        );
    }

    #[test]
    fn test_fire_level_contents() {
        let desc = LevelDescription::for_variant(Variant::Fire, &settings());
        assert_eq!(desc.spawn, Vec2::new(-950.0, 600.0));
        assert_eq!(count(&desc, |s| matches!(s, ObstacleSpec::Trap { .. })), 10);
        assert_eq!(count(&desc, |s| matches!(s, ObstacleSpec::LevelEnd { .. })), 1);
        assert!(desc.obstacles.contains(&ObstacleSpec::LevelEnd {
            at: Vec2::new(960.0, 128.0),
            sprite: GOAL
        }));
        assert!(desc.obstacles.contains(&ObstacleSpec::Trap {
            at: Vec2::new(-642.0, 640.0),
            trap: TrapType::Fire,
            lit: true
        }));
    }

    #[test]
    fn test_saw_level_platform() {
        let desc = LevelDescription::for_variant(Variant::Saw, &settings());
        assert_eq!(desc.spawn, Vec2::new(-950.0, 100.0));
        assert_eq!(
            desc.obstacles[0],
            ObstacleSpec::MovingPlatform {
                at: Vec2::new(-288.0, 224.0),
                size: Vec2::new(96.0, 24.0),
                speed: 2.0,
                min_y: 128.0,
                max_y: 800.0 - 96.0 * 1.8,
            }
        );
        assert_eq!(count(&desc, |s| matches!(s, ObstacleSpec::Trap { trap: TrapType::Saw, .. })), 10);
    }

    #[test]
    fn test_spike_head_level_contents() {
        let desc = LevelDescription::for_variant(Variant::SpikeHead, &settings());
        assert_eq!(count(&desc, |s| matches!(s, ObstacleSpec::SpikeHead { .. })), 8);
        assert!(desc.obstacles.contains(&ObstacleSpec::SpikeHead {
            at: Vec2::new(761.0, 204.0),
            speed: 7.0,
            min_y: -100.0,
            max_y: 704.0,
        }));
        assert!(matches!(
            desc.obstacles[0],
            ObstacleSpec::MovingPlatform { size, max_y, .. } if size == Vec2::new(384.0, 24.0) && max_y == 800.0
        ));
    }

    #[test]
    fn test_build_keeps_layout_order() {
        let mut assets = LevelAssets::placeholder(96);
        for variant in Variant::ALL {
            let desc = LevelDescription::for_variant(variant, &settings());
            let world = desc.build(&mut assets).unwrap();

            assert_eq!(world.obstacles.len(), desc.obstacles.len());
            for (spec, obstacle) in desc.obstacles.iter().zip(&world.obstacles) {
                let expected = match spec {
                    ObstacleSpec::Block { .. } => ObstacleKind::Block,
                    ObstacleSpec::LevelEnd { .. } => ObstacleKind::LevelEnd,
                    ObstacleSpec::Trap { .. } => ObstacleKind::Trap,
                    ObstacleSpec::SpikeHead { .. } => ObstacleKind::SpikeHead,
                    ObstacleSpec::MovingPlatform { .. } => ObstacleKind::MovingPlatform,
                };
                assert_eq!(obstacle.kind(), expected);
            }
        }
    }

    #[test]
    fn test_build_lights_traps_and_places_player() {
        let mut assets = LevelAssets::placeholder(96);
        let desc = LevelDescription::for_variant(Variant::Fire, &settings());
        let world = desc.build(&mut assets).unwrap();

        assert!(world
            .obstacles
            .iter()
            .filter(|o| o.kind() == ObstacleKind::Trap)
            .all(|o| o.is_on() == Some(true)));
        assert_eq!(world.player.stats(), &FIRE_STATS);
        assert_eq!(crate::engine::physics::Kinematic::position(&world.player), desc.spawn);
    }

    #[test]
    fn test_blocks_share_frames() {
        let mut assets = LevelAssets::placeholder(96);
        let a = assets.block(GRASS);
        let b = assets.block(GRASS);
        let c = assets.block(STONE);

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(a[0].width(), 96);
    }

    #[test]
    fn test_empty_trap_sequence_reports_level() {
        let mut assets = LevelAssets::placeholder(96);
        assets.saw_on = Arc::from(Vec::<Frame>::new());

        let desc = LevelDescription::for_variant(Variant::Saw, &settings());
        match desc.build(&mut assets) {
            Err(LevelError::Obstacle { level, obstacle, .. }) => {
                assert_eq!(level, 2);
                assert_eq!(obstacle, "saw trap");
            }
            Ok(_) => panic!("Expected the empty saw sequence to fail"),
        }
    }
}
