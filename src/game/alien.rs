use crate::game::bounds::Bounds;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Alien {
    pub rect: Bounds,
    x: f32,
}

impl Alien {
    pub fn new(settings: &Settings, x: i32, y: i32) -> Self {
        Self {
            rect: Bounds::new(x, y, settings.alien_width, settings.alien_height),
            x: x as f32,
        }
    }

    pub fn update(&mut self, settings: &Settings) {
        self.x += settings.alien_speed_factor * settings.fleet_direction;
        self.rect.x = self.x as i32;
    }

    /// True when the alien touches either side of the screen.
    pub fn check_edges(&self, settings: &Settings) -> bool {
        self.rect.right() >= settings.screen_width || self.rect.left() <= 0
    }

    pub fn drop_by(&mut self, dy: i32) {
        self.rect.y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_the_fleet_direction() {
        let mut settings = Settings::new();
        let mut alien = Alien::new(&settings, 100, 60);
        alien.update(&settings);
        assert_eq!(alien.rect.x, 101);

        settings.fleet_direction = -1.0;
        alien.update(&settings);
        alien.update(&settings);
        assert_eq!(alien.rect.x, 99);
    }

    #[test]
    fn detects_both_edges() {
        let settings = Settings::new();
        assert!(Alien::new(&settings, 0, 0).check_edges(&settings));
        let right = settings.screen_width - settings.alien_width;
        assert!(Alien::new(&settings, right, 0).check_edges(&settings));
        assert!(!Alien::new(&settings, 1, 0).check_edges(&settings));
    }
}
