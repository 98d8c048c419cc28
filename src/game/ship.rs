use crate::game::bounds::Bounds;
use crate::settings::Settings;

pub struct Ship {
    pub rect: Bounds,
    x: f32,
    pub moving_right: bool,
    pub moving_left: bool,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Self {
            rect: Bounds::new(0, 0, settings.ship_width, settings.ship_height),
            x: 0.0,
            moving_right: false,
            moving_left: false,
        };
        ship.center_ship(settings);
        ship
    }

    /// Each active flag applies on its own, so holding both cancels out.
    /// The rect never leaves `[0, screen_width]`.
    pub fn update(&mut self, settings: &Settings) {
        if self.moving_right && self.rect.right() < settings.screen_width {
            self.x += settings.ship_speed_factor;
        }
        if self.moving_left && self.rect.left() > 0 {
            self.x -= settings.ship_speed_factor;
        }
        let max_x = (settings.screen_width - self.rect.width).max(0) as f32;
        self.x = self.x.clamp(0.0, max_x);
        self.rect.x = self.x as i32;
    }

    pub fn center_ship(&mut self, settings: &Settings) {
        self.rect
            .set_midbottom(settings.screen_width / 2, settings.screen_height);
        self.x = self.rect.x as f32;
    }

    pub fn stop(&mut self) {
        self.moving_left = false;
        self.moving_right = false;
    }
}
