use crate::pages::game::{
    bird::Bird,
    object::{Bounds, Object},
};

/// One rectangle of a pipe pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    bounds: Bounds,
}

impl Segment {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Segment { bounds: Bounds::new(left, top, right, bottom) }
    }
}

impl Object for Segment {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.bounds.left += dx;
        self.bounds.right += dx;
        self.bounds.top += dy;
        self.bounds.bottom += dy;
    }
}

/// Upper and lower segment sharing one horizontal span. The gap between them is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    pub upper: Segment,
    pub lower: Segment,
}

impl PipePair {
    pub fn new(x: f64, width: f64, height: f64, gap: f64, field_height: f64) -> Self {
        PipePair {
            upper: Segment::new(x, 0.0, x + width, height),
            lower: Segment::new(x, height + gap, x + width, field_height),
        }
    }

    pub fn shift(&mut self, dx: f64) {
        self.upper.translate(dx, 0.0);
        self.lower.translate(dx, 0.0);
    }

    pub fn right(&self) -> f64 {
        self.upper.bounds().right
    }

    pub fn gap(&self) -> f64 {
        self.lower.bounds().top - self.upper.bounds().bottom
    }

    /// The upper segment has fully left the field on the left side.
    pub fn exited(&self) -> bool {
        self.upper.left_of(0.0)
    }

    /// Hit test on the current coordinates.
    ///
    /// Inside the horizontal span the bird collides when its bottom is below the lower segment's top
    /// or its top is above the upper segment's bottom.
    pub fn collides_with(&self, bird: &Bird) -> bool {
        let b = bird.bounds();
        let upper = self.upper.bounds();
        let lower = self.lower.bounds();

        b.overlaps_horizontally(&upper) && (b.bottom > lower.top || b.top < upper.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_at(x: f64, height: f64) -> PipePair {
        PipePair::new(x, 80.0, height, 150.0, 600.0)
    }

    #[test]
    fn test_segments_span_the_field() {
        let pair = pair_at(400.0, 250.0);
        assert_eq!(pair.upper.bounds(), Bounds::new(400.0, 0.0, 480.0, 250.0));
        assert_eq!(pair.lower.bounds(), Bounds::new(400.0, 400.0, 480.0, 600.0));
    }

    #[test]
    fn test_gap_survives_moves() {
        let mut pair = pair_at(400.0, 137.0);
        assert_eq!(pair.gap(), 150.0);
        for _ in 0..200 {
            pair.shift(-5.0);
            assert_eq!(pair.gap(), 150.0);
            assert_eq!(pair.lower.bounds().top, 137.0 + 150.0);
        }
        assert_eq!(pair.upper.bounds().left, pair.lower.bounds().left);
    }

    #[test]
    fn test_exit_requires_right_edge_past_zero() {
        let mut pair = pair_at(-80.0, 200.0);
        assert_eq!(pair.right(), 0.0);
        assert!(!pair.exited());
        pair.shift(-0.5);
        assert!(pair.exited());
    }

    #[test]
    fn test_bird_above_upper_bottom_collides() {
        // top 50 is above the upper segment bottom 200
        let bird = Bird::new(50.0, 50.0, 40.0);
        let pair = pair_at(60.0, 200.0);
        assert!(pair.collides_with(&bird));
    }

    #[test]
    fn test_bird_inside_gap_is_clear() {
        let bird = Bird::new(50.0, 250.0, 40.0);
        let pair = pair_at(60.0, 200.0);
        assert!(!pair.collides_with(&bird));
    }

    #[test]
    fn test_bird_below_lower_top_collides() {
        let bird = Bird::new(50.0, 330.0, 40.0);
        let pair = pair_at(60.0, 200.0);
        assert!(pair.collides_with(&bird));
    }

    #[test]
    fn test_no_collision_without_horizontal_overlap() {
        let bird = Bird::new(50.0, 0.0, 40.0);
        assert!(!pair_at(90.0, 200.0).collides_with(&bird));
        assert!(!pair_at(-30.0, 200.0).collides_with(&bird));
        assert!(pair_at(89.0, 200.0).collides_with(&bird));
    }
}
