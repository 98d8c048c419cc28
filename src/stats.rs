use crate::settings::Settings;

/// Session statistics. `high_score` survives every reset.
#[derive(Debug, Clone)]
pub struct GameStats {
    pub score: u32,
    pub ships_left: u32,
    pub level: u32,
    pub game_active: bool,
    pub high_score: u32,
}

impl GameStats {
    /// Starts idle: the player has to press Play first.
    pub fn new(settings: &Settings, high_score: u32) -> Self {
        let mut stats = Self {
            score: 0,
            ships_left: 0,
            level: 1,
            game_active: false,
            high_score,
        };
        stats.reset_stats(settings);
        stats
    }

    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }
}
