use crate::stats::GameStats;

/// HUD text, rebuilt only when the numbers behind it change.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    pub score_text: String,
    pub high_score_text: String,
    pub level_text: String,
    pub ships_left: u32,
}

impl Scoreboard {
    pub fn new(stats: &GameStats) -> Self {
        let mut sb = Self::default();
        sb.prep_images(stats);
        sb
    }

    pub fn prep_images(&mut self, stats: &GameStats) {
        self.prep_score(stats);
        self.prep_high_score(stats);
        self.prep_level(stats);
        self.prep_ships(stats);
    }

    pub fn prep_score(&mut self, stats: &GameStats) {
        self.score_text = group_thousands(stats.score);
    }

    pub fn prep_high_score(&mut self, stats: &GameStats) {
        self.high_score_text = group_thousands(stats.high_score);
    }

    pub fn prep_level(&mut self, stats: &GameStats) {
        self.level_text = stats.level.to_string();
    }

    pub fn prep_ships(&mut self, stats: &GameStats) {
        self.ships_left = stats.ships_left;
    }

    /// Raises the high score to the current score if it was beaten.
    /// Returns whether it changed.
    pub fn check_high_score(&mut self, stats: &mut GameStats) -> bool {
        if stats.score > stats.high_score {
            stats.high_score = stats.score;
            self.prep_high_score(stats);
            true
        } else {
            false
        }
    }
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
