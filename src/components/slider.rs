use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Gauge},
};

/// Number input on a fixed range with a resolution of one tenth.
///
/// The value is kept as whole tenths so repeated steps never drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    label: &'static str,
    min: i32,
    max: i32,
    tenths: i32,
}

impl Slider {
    pub fn new(label: &'static str, min: f64, max: f64) -> Self {
        let (min, max) = (to_tenths(min), to_tenths(max));
        Slider { label, min, max, tenths: min }
    }

    pub fn value(&self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    /// Out of range values are clamped.
    pub fn set(&mut self, value: f64) {
        self.tenths = to_tenths(value).clamp(self.min, self.max);
    }

    pub fn increase(&mut self) {
        self.tenths = (self.tenths + 1).min(self.max);
    }

    pub fn decrease(&mut self) {
        self.tenths = (self.tenths - 1).max(self.min);
    }

    pub fn ratio(&self) -> f64 {
        if self.max == self.min {
            return 0.0;
        }
        f64::from(self.tenths - self.min) / f64::from(self.max - self.min)
    }

    pub fn widget(&self, focused: bool) -> Gauge<'static> {
        let border = if focused { Style::default().fg(Color::Cyan) } else { Style::default() };
        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border)
                    .title(self.label),
            )
            .gauge_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .label(format!("{:.1}", self.value()))
            .ratio(self.ratio())
    }
}

fn to_tenths(value: f64) -> i32 {
    (value * 10.0).round() as i32
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_steps_stay_on_tenths() {
        let mut slider = Slider::new("Gravity", 0.0, 5.0);
        slider.set(1.5);
        for _ in 0..3 {
            slider.increase();
        }
        assert_eq!(slider.value(), 1.8);
        slider.decrease();
        assert_eq!(slider.value(), 1.7);
    }

    #[test]
    fn test_value_is_clamped() {
        let mut slider = Slider::new("Speed", -10.0, 0.0);
        slider.set(-12.0);
        assert_eq!(slider.value(), -10.0);
        slider.decrease();
        assert_eq!(slider.value(), -10.0);

        slider.set(0.04);
        assert_eq!(slider.value(), 0.0);
        slider.increase();
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn test_ratio() {
        let mut slider = Slider::new("Speed", -10.0, 0.0);
        slider.set(-5.0);
        assert_eq!(slider.ratio(), 0.5);
        slider.set(-10.0);
        assert_eq!(slider.ratio(), 0.0);
    }
}
