use ratatui::style::Color;

use crate::game::bounds::Bounds;
use crate::settings::Settings;

const WIDTH: i32 = 200;
const HEIGHT: i32 = 50;

/// The "Play" control, centered on the playfield.
#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Bounds,
    pub label: String,
    pub button_color: Color,
    pub text_color: Color,
}

impl Button {
    pub fn new(settings: &Settings, label: &str) -> Self {
        let mut rect = Bounds::new(0, 0, WIDTH, HEIGHT);
        rect.set_center(settings.screen_width / 2, settings.screen_height / 2);
        Self {
            rect,
            label: label.to_string(),
            button_color: Color::Rgb(0, 255, 0),
            text_color: Color::Rgb(255, 255, 255),
        }
    }

    pub fn is_clicked(&self, x: i32, y: i32) -> bool {
        self.rect.contains_point(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_hit_area() {
        let settings = Settings::new();
        let button = Button::new(&settings, "Play");
        assert!(button.is_clicked(600, 400));
        assert!(button.is_clicked(501, 376));
        assert!(!button.is_clicked(499, 400));
        assert!(!button.is_clicked(600, 430));
    }
}
