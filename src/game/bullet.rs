use crate::game::bounds::Bounds;
use crate::game::ship::Ship;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Bullet {
    pub rect: Bounds,
    y: f32,
}

impl Bullet {
    /// Spawns at the ship's mid-top.
    pub fn new(settings: &Settings, ship: &Ship) -> Self {
        let mut rect = Bounds::new(0, 0, settings.bullet_width, settings.bullet_height);
        rect.set_midtop(ship.rect.center_x(), ship.rect.top());
        Self {
            rect,
            y: rect.y as f32,
        }
    }

    pub fn update(&mut self, settings: &Settings) {
        self.y -= settings.bullet_speed_factor;
        self.rect.y = self.y as i32;
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() <= 0
    }
}
