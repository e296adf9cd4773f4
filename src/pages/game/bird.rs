use crate::pages::game::object::{Bounds, Object};

/// The player. Only moves vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    x: f64,
    y: f64,
    size: f64,
    velocity: f64,
}

impl Bird {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Bird { x, y, size, velocity: 0.0 }
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Accelerates by `gravity` then moves by the new velocity. There is no terminal velocity.
    pub fn update(&mut self, gravity: f64) {
        self.velocity += gravity;
        self.translate(0.0, self.velocity);
    }

    /// Overwrites the velocity, flaps never accumulate.
    pub fn flap(&mut self, impulse: f64) {
        self.velocity = impulse;
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }

    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}

impl Object for Bird {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.size, self.y + self.size)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}
