use ratatui::style::Color;

const SCREEN_WIDTH: i32 = 1200;
const SCREEN_HEIGHT: i32 = 800;
const SHIP_SPEED: f32 = 1.5;
const SHIP_LIMIT: u32 = 3;
const BULLET_SPEED: f32 = 3.0;
const BULLETS_ALLOWED: usize = 3;
const ALIEN_SPEED: f32 = 1.0;
const ALIEN_POINTS: u32 = 50;
const FLEET_DROP_SPEED: i32 = 10;
const SPEEDUP_SCALE: f32 = 1.1;
/// 0.5 s at the default 60 Hz tick.
const HIT_PAUSE_FRAMES: u32 = 30;

/// Tunable parameters for one session.
///
/// The `*_speed` fields are the per-game base values. The `*_speed_factor`
/// fields and `fleet_direction` are the dynamic part: they are reset by
/// [`Settings::initialize_dynamic_settings`] at the start of every game and
/// only grow (via [`Settings::increase_speed`]) while that game lasts.
#[derive(Debug, Clone)]
pub struct Settings {
    // Screen
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: Color,

    // Ship
    pub ship_speed: f32,
    pub ship_limit: u32,
    pub ship_width: i32,
    pub ship_height: i32,

    // Bullets
    pub bullet_speed: f32,
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_color: Color,
    pub bullets_allowed: usize,

    // Aliens
    pub alien_speed: f32,
    pub alien_width: i32,
    pub alien_height: i32,
    pub alien_points: u32,
    pub fleet_drop_speed: i32,

    // Pacing
    pub speedup_scale: f32,
    pub hit_pause_frames: u32,

    // Dynamic
    pub ship_speed_factor: f32,
    pub bullet_speed_factor: f32,
    pub alien_speed_factor: f32,
    /// 1.0 moves the fleet right, -1.0 moves it left.
    pub fleet_direction: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            bg_color: Color::Rgb(230, 230, 230),
            ship_speed: SHIP_SPEED,
            ship_limit: SHIP_LIMIT,
            ship_width: 60,
            ship_height: 48,
            bullet_speed: BULLET_SPEED,
            bullet_width: 300,
            bullet_height: 15,
            bullet_color: Color::Rgb(60, 60, 60),
            bullets_allowed: BULLETS_ALLOWED,
            alien_speed: ALIEN_SPEED,
            alien_width: 60,
            alien_height: 58,
            alien_points: ALIEN_POINTS,
            fleet_drop_speed: FLEET_DROP_SPEED,
            speedup_scale: SPEEDUP_SCALE,
            hit_pause_frames: HIT_PAUSE_FRAMES,
            ship_speed_factor: 0.0,
            bullet_speed_factor: 0.0,
            alien_speed_factor: 0.0,
            fleet_direction: 1.0,
        };
        settings.initialize_dynamic_settings();
        settings
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the values that change during a game.
    pub fn initialize_dynamic_settings(&mut self) {
        self.ship_speed_factor = self.ship_speed;
        self.bullet_speed_factor = self.bullet_speed;
        self.alien_speed_factor = self.alien_speed;
        self.fleet_direction = 1.0;
    }

    pub fn increase_speed(&mut self) {
        self.ship_speed_factor *= self.speedup_scale;
        self.bullet_speed_factor *= self.speedup_scale;
        self.alien_speed_factor *= self.speedup_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increase_speed_scales_all_three_factors() {
        let mut settings = Settings::new();
        let (ship, bullet, alien) = (
            settings.ship_speed_factor,
            settings.bullet_speed_factor,
            settings.alien_speed_factor,
        );

        settings.increase_speed();

        assert!((settings.ship_speed_factor - ship * 1.1).abs() < 1e-5);
        assert!((settings.bullet_speed_factor - bullet * 1.1).abs() < 1e-5);
        assert!((settings.alien_speed_factor - alien * 1.1).abs() < 1e-5);
    }

    #[test]
    fn dynamic_settings_reset_to_base_values() {
        let mut settings = Settings::new();
        settings.increase_speed();
        settings.increase_speed();
        settings.fleet_direction = -1.0;

        settings.initialize_dynamic_settings();

        assert_eq!(settings.ship_speed_factor, 1.5);
        assert_eq!(settings.bullet_speed_factor, 3.0);
        assert_eq!(settings.alien_speed_factor, 1.0);
        assert_eq!(settings.fleet_direction, 1.0);
    }
}
