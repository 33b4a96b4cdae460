// Vertical back-and-forth motion

/// Moves a coordinate between two bounds at constant speed
///
/// The direction starts as +1 (down). After each step it becomes +1 when
/// `y <= min` and -1 when `y >= max`; the `min` check runs first, so it
/// wins when both hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    speed: f32,
    min: f32,
    max: f32,
    direction: f32,
}

impl Oscillator {
    pub fn new(speed: f32, min: f32, max: f32) -> Self {
        Self {
            speed,
            min,
            max,
            direction: 1.0,
        }
    }

    /// Move `y` one step and return the new value
    ///
    /// A step that would cross a bound stops on it. A position that starts
    /// outside the range walks towards it at normal speed.
    pub fn step(&mut self, y: f32) -> f32 {
        let mut next = y + self.speed * self.direction;

        if self.direction > 0.0 && y <= self.max && next > self.max {
            next = self.max;
        } else if self.direction < 0.0 && y >= self.min && next < self.min {
            next = self.min;
        }

        if next <= self.min {
            self.direction = 1.0;
        } else if next >= self.max {
            self.direction = -1.0;
        }

        next
    }

    /// +1 while moving down, -1 while moving up
    #[cfg(test)]
    pub fn direction(&self) -> f32 {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_moving_down() {
        let mut osc = Oscillator::new(2.0, 100.0, 200.0);
        assert_eq!(osc.step(150.0), 152.0);
        assert_eq!(osc.direction(), 1.0);
    }

    #[test]
    fn test_turns_exactly_at_max() {
        let mut osc = Oscillator::new(5.0, 0.0, 20.0);
        let mut y = 10.0;
        y = osc.step(y);
        assert_eq!((y, osc.direction()), (15.0, 1.0));
        y = osc.step(y);
        assert_eq!((y, osc.direction()), (20.0, -1.0));
        y = osc.step(y);
        assert_eq!((y, osc.direction()), (15.0, -1.0));
    }

    #[test]
    fn test_overshoot_stops_on_bound() {
        let mut osc = Oscillator::new(2.0, 128.0, 627.2);
        let y = osc.step(626.0);
        assert_eq!(y, 627.2);
        assert_eq!(osc.direction(), -1.0);
    }

    #[test]
    fn test_turns_at_min() {
        let mut osc = Oscillator::new(4.0, 0.0, 100.0);
        let mut y = osc.step(99.0);
        assert_eq!(y, 100.0);
        for _ in 0..25 {
            y = osc.step(y);
        }
        assert_eq!(y, 0.0);
        assert_eq!(osc.direction(), 1.0);
    }

    #[test]
    fn test_min_check_wins_on_collapsed_range() {
        let mut osc = Oscillator::new(3.0, 50.0, 50.0);
        let y = osc.step(50.0);
        assert_eq!(y, 50.0);
        assert_eq!(osc.direction(), 1.0);
    }

    #[test]
    fn test_start_above_range_walks_in() {
        // Smaller y is higher on screen
        let mut osc = Oscillator::new(5.0, 300.0, 704.0);
        let y = osc.step(204.0);
        assert_eq!(y, 209.0);
        assert_eq!(osc.direction(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_stays_within_bounds(
            min in -500.0f32..500.0,
            span in 1.0f32..800.0,
            speed in 0.5f32..20.0,
            start in 0.0f32..1.0,
            steps in 1usize..600,
        ) {
            let max = min + span;
            let mut osc = Oscillator::new(speed, min, max);
            let mut y = min + span * start;

            for _ in 0..steps {
                let before = osc.direction();
                y = osc.step(y);
                prop_assert!(y >= min && y <= max, "y = {} left [{}, {}]", y, min, max);

                // Direction only changes on a boundary sample
                if osc.direction() != before {
                    prop_assert!(y == min || y == max);
                }
            }
        }
    }
}
