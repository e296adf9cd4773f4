/// Axis-aligned box in field coordinates, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Bounds { left, top, right, bottom }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Strict overlap of the horizontal spans, touching edges do not count.
    pub fn overlaps_horizontally(&self, other: &Bounds) -> bool {
        interval_sec(self.left, self.right, other.left, other.right)
    }
}

pub trait Object {
    fn bounds(&self) -> Bounds;
    fn translate(&mut self, dx: f64, dy: f64);

    fn left_of(&self, x: f64) -> bool {
        self.bounds().right < x
    }
}

fn interval_sec(l1: f64, r1: f64, l2: f64, r2: f64) -> bool {
    r1 > l2 && l1 < r2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps_horizontally(&b));
        assert!(!b.overlaps_horizontally(&a));
    }

    #[test]
    fn test_partial_overlap() {
        let a = Bounds::new(50.0, 50.0, 90.0, 90.0);
        let b = Bounds::new(85.0, 0.0, 165.0, 200.0);
        assert!(a.overlaps_horizontally(&b));
        assert_eq!(b.width(), 80.0);
        assert_eq!(b.height(), 200.0);
    }
}
