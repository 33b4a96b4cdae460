use glam::Vec2;

use super::mask::PixelMask;
use crate::core::math::Rect;

/// Anything that takes part in collision tests
pub trait Collider {
    /// Bounding box in world space
    fn bounds(&self) -> Rect;

    /// Opaque-pixel mask aligned with the top-left corner of `bounds()`
    fn mask(&self) -> &PixelMask;
}

/// A collider the resolver is allowed to move
///
/// `position()` must be the top-left corner of `bounds()`.
pub trait Kinematic: Collider {
    fn position(&self) -> Vec2;

    fn set_position(&mut self, position: Vec2);

    /// Called after the collider was snapped onto a surface while falling
    fn land(&mut self);

    /// Called after the collider was snapped below a surface while rising
    fn bump_head(&mut self);
}

/// Which edge a vertical contact was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSide {
    /// Actor was falling and now stands on the obstacle
    Floor,
    /// Actor was rising and hit the obstacle's underside
    Ceiling,
    /// Actor had no vertical motion; overlap recorded without snapping
    Touch,
}

/// A single vertical overlap found during resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalContact {
    /// Index of the obstacle in the slice passed to the resolver
    pub index: usize,
    pub side: ContactSide,
}

/// Blockers recorded by the two horizontal probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HorizontalProbe {
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl HorizontalProbe {
    pub fn blocked_left(&self) -> bool {
        self.left.is_some()
    }

    pub fn blocked_right(&self) -> bool {
        self.right.is_some()
    }
}

/// Bounding-box test refined by the two pixel masks
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let (ra, rb) = (a.bounds(), b.bounds());
    if !ra.intersects(&rb) {
        return false;
    }

    let offset = (
        (rb.left().floor() - ra.left().floor()) as i32,
        (rb.top().floor() - ra.top().floor()) as i32,
    );
    a.mask().overlaps(b.mask(), offset)
}

/// Tentatively move `actor` by `dx`, find the first overlapping obstacle in
/// slice order, then restore the original position
pub fn probe<K, C>(actor: &mut K, dx: f32, obstacles: &[C]) -> Option<usize>
where
    K: Kinematic + ?Sized,
    C: Collider,
{
    let start = actor.position();
    actor.set_position(start + Vec2::new(dx, 0.0));
    let hit = obstacles.iter().position(|obstacle| overlaps(&*actor, obstacle));
    actor.set_position(start);
    hit
}

/// Probe both sides at `reach` units. The actor ends where it started.
pub fn probe_sides<K, C>(actor: &mut K, reach: f32, obstacles: &[C]) -> HorizontalProbe
where
    K: Kinematic + ?Sized,
    C: Collider,
{
    HorizontalProbe {
        left: probe(actor, -reach, obstacles),
        right: probe(actor, reach, obstacles),
    }
}

/// Resolve overlaps after the actor moved vertically by `dy`
///
/// Every overlapping obstacle is handled in slice order. Falling snaps the
/// actor's bottom to the obstacle's top and lands it; rising snaps the
/// actor's top to the obstacle's bottom and bumps its head. `dy` is sampled
/// once, so a landing does not change how later overlaps are treated.
/// Later snaps overwrite earlier ones.
pub fn resolve_vertical<K, C>(actor: &mut K, dy: f32, obstacles: &[C]) -> Vec<VerticalContact>
where
    K: Kinematic + ?Sized,
    C: Collider,
{
    let mut contacts = Vec::new();

    for (index, obstacle) in obstacles.iter().enumerate() {
        if !overlaps(&*actor, obstacle) {
            continue;
        }

        let target = obstacle.bounds();
        let height = actor.bounds().height();
        let mut position = actor.position();

        let side = if dy > 0.0 {
            position.y = target.top() - height;
            actor.set_position(position);
            actor.land();
            ContactSide::Floor
        } else if dy < 0.0 {
            position.y = target.bottom();
            actor.set_position(position);
            actor.bump_head();
            ContactSide::Ceiling
        } else {
            ContactSide::Touch
        };

        contacts.push(VerticalContact { index, side });
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Block {
        rect: Rect,
        mask: PixelMask,
    }

    impl Block {
        fn solid(x: f32, y: f32, w: u32, h: u32) -> Self {
            Self {
                rect: Rect::new(x, y, w as f32, h as f32),
                mask: PixelMask::solid(w, h),
            }
        }
    }

    impl Collider for Block {
        fn bounds(&self) -> Rect {
            self.rect
        }

        fn mask(&self) -> &PixelMask {
            &self.mask
        }
    }

    struct Mover {
        rect: Rect,
        mask: PixelMask,
        vy: f32,
        landings: u32,
        bumps: u32,
    }

    impl Mover {
        fn new(x: f32, y: f32, size: u32, vy: f32) -> Self {
            Self {
                rect: Rect::new(x, y, size as f32, size as f32),
                mask: PixelMask::solid(size, size),
                vy,
                landings: 0,
                bumps: 0,
            }
        }
    }

    impl Collider for Mover {
        fn bounds(&self) -> Rect {
            self.rect
        }

        fn mask(&self) -> &PixelMask {
            &self.mask
        }
    }

    impl Kinematic for Mover {
        fn position(&self) -> Vec2 {
            self.rect.origin
        }

        fn set_position(&mut self, position: Vec2) {
            self.rect.origin = position;
        }

        fn land(&mut self) {
            self.vy = 0.0;
            self.landings += 1;
        }

        fn bump_head(&mut self) {
            self.vy = -self.vy;
            self.bumps += 1;
        }
    }

    #[test]
    fn test_bounding_boxes_must_intersect() {
        let a = Block::solid(0.0, 0.0, 10, 10);
        let b = Block::solid(10.0, 0.0, 10, 10);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_transparent_pixels_prevent_collision() {
        let actor = Block {
            rect: Rect::new(0.0, 0.0, 8.0, 8.0),
            mask: PixelMask::from_fn(8, 8, |x, _| x < 2),
        };
        let wall = Block::solid(4.0, 0.0, 8, 8);

        // Rectangles overlap, but the actor's opaque column is left of the wall
        assert!(!overlaps(&actor, &wall));
    }

    #[test]
    fn test_probe_finds_blocker_and_restores_position() {
        let mut actor = Mover::new(100.0, 0.0, 10, 0.0);
        let obstacles = [Block::solid(115.0, 0.0, 10, 10)];

        let probe = probe_sides(&mut actor, 8.0, &obstacles);

        assert_eq!(probe.left, None);
        assert_eq!(probe.right, Some(0));
        assert_eq!(actor.position(), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_probe_first_obstacle_wins() {
        let mut actor = Mover::new(0.0, 0.0, 10, 0.0);
        let obstacles = [
            Block::solid(50.0, 0.0, 10, 10),
            Block::solid(-12.0, 0.0, 10, 10),
            Block::solid(-14.0, 0.0, 10, 10),
        ];

        assert_eq!(probe(&mut actor, -8.0, &obstacles), Some(1));
    }

    #[test]
    fn test_probe_detects_both_sides_independently() {
        let mut actor = Mover::new(0.0, 0.0, 10, 0.0);
        let obstacles = [
            Block::solid(14.0, 0.0, 10, 10),
            Block::solid(-14.0, 0.0, 10, 10),
        ];

        let probe = probe_sides(&mut actor, 8.0, &obstacles);
        assert_eq!(probe.left, Some(1));
        assert_eq!(probe.right, Some(0));
        assert!(probe.blocked_left() && probe.blocked_right());
    }

    #[test]
    fn test_landing_snaps_to_top() {
        let mut actor = Mover::new(0.0, 95.0, 10, 6.0);
        let obstacles = [Block::solid(0.0, 100.0, 40, 40)];

        let contacts = resolve_vertical(&mut actor, 6.0, &obstacles);

        assert_eq!(
            contacts,
            vec![VerticalContact {
                index: 0,
                side: ContactSide::Floor
            }]
        );
        assert_eq!(actor.bounds().bottom(), 100.0);
        assert_eq!(actor.vy, 0.0);
        assert_eq!(actor.landings, 1);
    }

    #[test]
    fn test_ceiling_snaps_to_bottom_and_inverts() {
        let mut actor = Mover::new(0.0, 36.0, 10, -8.0);
        let obstacles = [Block::solid(0.0, 0.0, 40, 40)];

        let contacts = resolve_vertical(&mut actor, -8.0, &obstacles);

        assert_eq!(contacts[0].side, ContactSide::Ceiling);
        assert_eq!(actor.bounds().top(), 40.0);
        assert_eq!(actor.vy, 8.0);
        assert_eq!(actor.bumps, 1);
    }

    #[test]
    fn test_no_vertical_motion_records_touch() {
        let mut actor = Mover::new(0.0, 35.0, 10, 0.0);
        let obstacles = [Block::solid(0.0, 0.0, 40, 40)];

        let contacts = resolve_vertical(&mut actor, 0.0, &obstacles);

        assert_eq!(contacts[0].side, ContactSide::Touch);
        assert_eq!(actor.position(), Vec2::new(0.0, 35.0));
    }

    #[test]
    fn test_resolution_continues_after_landing() {
        // Actor straddles two tiles whose tops differ by two units
        let mut actor = Mover::new(35.0, 95.0, 10, 6.0);
        let obstacles = [
            Block::solid(0.0, 100.0, 40, 40),
            Block::solid(40.0, 98.0, 40, 40),
        ];

        let contacts = resolve_vertical(&mut actor, 6.0, &obstacles);

        // Still overlapping the higher tile after the first snap, so the
        // second snap is applied and wins
        assert_eq!(contacts.len(), 2);
        assert_eq!(actor.landings, 2);
        assert_eq!(actor.bounds().bottom(), 98.0);
    }

    #[test]
    fn test_snapped_actor_clears_neighbouring_tile() {
        let mut actor = Mover::new(35.0, 95.0, 10, 6.0);
        let obstacles = [
            Block::solid(0.0, 100.0, 40, 40),
            Block::solid(40.0, 100.0, 40, 40),
        ];

        let contacts = resolve_vertical(&mut actor, 6.0, &obstacles);

        // After snapping onto the first tile the actor only touches the second
        assert_eq!(contacts.len(), 1);
        assert_eq!(actor.bounds().bottom(), 100.0);
    }

    #[test]
    fn test_fast_actor_tunnels_through_thin_floor() {
        // Known limitation: discrete steps, no swept test. An actor that
        // starts above a 4-unit platform and ends below it never overlaps.
        let mut actor = Mover::new(0.0, 120.0, 10, 40.0);
        let obstacles = [Block::solid(0.0, 100.0, 40, 4)];

        let contacts = resolve_vertical(&mut actor, 40.0, &obstacles);

        assert!(contacts.is_empty());
        assert_eq!(actor.landings, 0);
    }

    #[test]
    fn test_sub_unit_overlap_is_lost_to_floored_offsets() {
        // Known limitation: each origin is floored on its own. Bottom edge at
        // 50.9 sinks 0.9 into a floor at 50, the boxes intersect, but the
        // mask offset is floor(50) - floor(40.9) = 10, one full actor height.
        let floor = [Block::solid(0.0, 50.0, 40, 40)];
        let mut actor = Mover::new(0.0, 40.9, 10, 3.0);
        assert!(actor.bounds().intersects(&floor[0].bounds()));
        assert!(!overlaps(&actor, &floor[0]));

        let contacts = resolve_vertical(&mut actor, 3.0, &floor);
        assert!(contacts.is_empty());
        assert_eq!(actor.position(), Vec2::new(0.0, 40.9));

        // Crossing the next integer brings the mask rows into range
        let mut actor = Mover::new(0.0, 41.0, 10, 3.0);
        let contacts = resolve_vertical(&mut actor, 3.0, &floor);
        assert_eq!(contacts.len(), 1);
        assert_eq!(actor.bounds().bottom(), 50.0);
        assert_eq!(actor.landings, 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn probing_never_moves_the_actor(
                x in -500i32..500,
                y in -500i32..500,
                reach in 0.5f32..20.0,
                offsets in proptest::collection::vec((-40i32..40, -40i32..40), 0..12)
            ) {
                let mut actor = Mover::new(x as f32, y as f32, 16, 0.0);
                let obstacles: Vec<Block> = offsets
                    .iter()
                    .map(|(dx, dy)| Block::solid((x + dx) as f32, (y + dy) as f32, 16, 16))
                    .collect();

                probe_sides(&mut actor, reach, &obstacles);

                prop_assert_eq!(actor.position(), Vec2::new(x as f32, y as f32));
            }

            #[test]
            fn side_detection_ignores_iteration_order(
                gap_left in 1i32..30,
                gap_right in 1i32..30,
                reversed in any::<bool>()
            ) {
                let mut actor = Mover::new(0.0, 0.0, 16, 0.0);
                let mut obstacles = vec![
                    Block::solid((-16 - gap_left) as f32, 0.0, 16, 16),
                    Block::solid((16 + gap_right) as f32, 0.0, 16, 16),
                ];
                if reversed {
                    obstacles.reverse();
                }

                let probe = probe_sides(&mut actor, 12.0, &obstacles);

                prop_assert_eq!(probe.left.is_some(), gap_left < 12);
                prop_assert_eq!(probe.right.is_some(), gap_right < 12);
            }
        }
    }
}
