pub mod alien;
pub mod bounds;
pub mod bullet;
pub mod fleet;
pub mod ship;

use crate::button::Button;
use crate::scoreboard::Scoreboard;
use crate::scores::HighScoreStore;
use crate::settings::Settings;
use crate::stats::GameStats;

use alien::Alien;
use bullet::Bullet;
use fleet::Fleet;
use ship::Ship;

/// One Alien Invasion session: owns every entity, the stats and the store.
pub struct Game {
    settings: Settings,
    stats: GameStats,
    scoreboard: Scoreboard,
    ship: Ship,
    bullets: Vec<Bullet>,
    fleet: Fleet,
    play_button: Button,
    store: Box<dyn HighScoreStore>,
    /// Frames left to freeze after losing a ship.
    hit_pause: u32,
    pointer_visible: bool,
}

impl Game {
    pub fn new(settings: Settings, store: Box<dyn HighScoreStore>) -> Self {
        let stats = GameStats::new(&settings, store.load_high_score());
        let scoreboard = Scoreboard::new(&stats);
        let ship = Ship::new(&settings);
        let play_button = Button::new(&settings, "Play");
        let mut game = Self {
            settings,
            stats,
            scoreboard,
            ship,
            bullets: Vec::new(),
            fleet: Fleet::new(),
            play_button,
            store,
            hit_pause: 0,
            pointer_visible: true,
        };
        game.create_fleet();
        game
    }

    /// Advances one frame. Nothing moves while idle or during a hit pause.
    pub fn update(&mut self) {
        if !self.stats.game_active {
            return;
        }
        if self.hit_pause > 0 {
            self.hit_pause -= 1;
            return;
        }
        self.ship.update(&self.settings);
        self.update_bullets();
        self.update_aliens();
    }

    pub fn set_moving_left(&mut self, moving: bool) {
        self.ship.moving_left = moving;
    }

    pub fn set_moving_right(&mut self, moving: bool) {
        self.ship.moving_right = moving;
    }

    /// Returns whether a bullet was spawned.
    pub fn fire_bullet(&mut self) -> bool {
        if !self.stats.game_active
            || self.hit_pause > 0
            || self.bullets.len() >= self.settings.bullets_allowed
        {
            return false;
        }
        self.bullets.push(Bullet::new(&self.settings, &self.ship));
        log::debug!("fired, {} bullets in flight", self.bullets.len());
        true
    }

    /// Starts a game if the click lands on Play while idle.
    pub fn check_play_button(&mut self, x: i32, y: i32) -> bool {
        if self.play_button.is_clicked(x, y) && !self.stats.game_active {
            self.start_game();
            true
        } else {
            false
        }
    }

    /// Resets everything for a fresh game. Ignored while a game is running.
    pub fn start_game(&mut self) {
        if self.stats.game_active {
            return;
        }
        self.settings.initialize_dynamic_settings();

        self.stats.reset_stats(&self.settings);
        self.stats.game_active = true;
        self.scoreboard.prep_images(&self.stats);

        self.fleet.clear();
        self.bullets.clear();

        self.create_fleet();
        self.ship.center_ship(&self.settings);
        self.ship.stop();
        self.hit_pause = 0;

        self.pointer_visible = false;
        log::info!(
            "game started: {} ships, high score {}",
            self.stats.ships_left,
            self.stats.high_score
        );
    }

    fn create_fleet(&mut self) {
        self.fleet
            .create_fleet(&self.settings, self.ship.rect.height);
    }

    fn update_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.update(&self.settings);
        }
        self.bullets.retain(|bullet| !bullet.is_off_screen());

        self.check_bullet_alien_collisions();
    }

    /// Each bullet takes out at most one alien; removals are applied after
    /// every pair has been checked.
    fn check_bullet_alien_collisions(&mut self) {
        let aliens = self.fleet.aliens();
        let mut alien_destroyed = vec![false; aliens.len()];
        let mut bullet_spent = vec![false; self.bullets.len()];
        let mut destroyed = 0u32;

        for (bi, bullet) in self.bullets.iter().enumerate() {
            let hit = aliens
                .iter()
                .enumerate()
                .find(|(ai, alien)| !alien_destroyed[*ai] && alien.rect.collides(&bullet.rect));
            if let Some((ai, _)) = hit {
                alien_destroyed[ai] = true;
                bullet_spent[bi] = true;
                destroyed += 1;
            }
        }

        if destroyed > 0 {
            self.fleet.remove_destroyed(&alien_destroyed);
            let mut idx = 0;
            self.bullets.retain(|_| {
                let keep = !bullet_spent[idx];
                idx += 1;
                keep
            });

            self.stats.score += self.settings.alien_points * destroyed;
            self.scoreboard.prep_score(&self.stats);
            log::debug!("{} aliens destroyed, score {}", destroyed, self.stats.score);
            if self.scoreboard.check_high_score(&mut self.stats) {
                self.save_high_score();
            }
        }

        // Only a fleet shot down this frame counts as a cleared wave.
        if destroyed > 0 && self.fleet.is_empty() {
            self.bullets.clear();
            self.create_fleet();
            self.settings.increase_speed();

            self.stats.level += 1;
            self.scoreboard.prep_level(&self.stats);
            log::info!(
                "wave cleared, level {} (ship {:.2}, bullet {:.2}, alien {:.2})",
                self.stats.level,
                self.settings.ship_speed_factor,
                self.settings.bullet_speed_factor,
                self.settings.alien_speed_factor
            );
        }
    }

    fn save_high_score(&mut self) {
        if let Err(err) = self.store.save_high_score(self.stats.high_score) {
            log::error!("failed to save high score {}: {:#}", self.stats.high_score, err);
        }
    }

    fn update_aliens(&mut self) {
        self.fleet.check_fleet_edges(&mut self.settings);
        self.fleet.update(&self.settings);

        if self.fleet.collides_with(&self.ship.rect) {
            log::info!("ship hit by alien");
            self.ship_hit();
            return;
        }

        self.check_aliens_bottom();
    }

    fn check_aliens_bottom(&mut self) {
        if self.fleet.reached_bottom(&self.settings) {
            log::info!("fleet reached the bottom");
            self.ship_hit();
        }
    }

    fn ship_hit(&mut self) {
        if !self.stats.game_active {
            return;
        }
        if self.stats.ships_left > 0 {
            self.stats.ships_left -= 1;
            self.scoreboard.prep_ships(&self.stats);

            self.fleet.clear();
            self.bullets.clear();

            self.create_fleet();
            self.ship.center_ship(&self.settings);

            self.hit_pause = self.settings.hit_pause_frames;
            log::info!("ship lost, {} left", self.stats.ships_left);
        } else {
            self.stats.game_active = false;
            self.pointer_visible = true;
            log::info!(
                "game over at level {} with score {}",
                self.stats.level,
                self.stats.score
            );
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn aliens(&self) -> &[Alien] {
        self.fleet.aliens()
    }

    pub fn play_button(&self) -> &Button {
        &self.play_button
    }

    pub fn is_active(&self) -> bool {
        self.stats.game_active
    }

    pub fn is_paused(&self) -> bool {
        self.hit_pause > 0
    }

    /// Mirrors the idle indicator: visible while no game is running.
    pub fn pointer_visible(&self) -> bool {
        self.pointer_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::bounds::Bounds;
    use crate::scores::MemoryStore;

    fn test_settings() -> Settings {
        let mut settings = Settings::new();
        settings.alien_width = 30;
        settings.alien_height = 30;
        settings.ship_height = 50;
        settings.bullet_width = 3;
        settings.alien_points = 10;
        settings.hit_pause_frames = 0;
        settings
    }

    fn started_game(store: MemoryStore) -> Game {
        let mut game = Game::new(test_settings(), Box::new(store));
        game.start_game();
        game
    }

    fn place_bullet_on(game: &mut Game, target: Bounds) {
        let mut bullet = Bullet::new(&game.settings, &game.ship);
        bullet.rect.set_center(target.center_x(), target.center_y());
        game.bullets.push(bullet);
    }

    #[test]
    fn new_game_is_idle_with_pointer() {
        let game = Game::new(test_settings(), Box::new(MemoryStore::with_score(90)));
        assert!(!game.is_active());
        assert!(game.pointer_visible());
        assert_eq!(game.stats().high_score, 90);
        assert_eq!(game.aliens().len(), 209);
    }

    #[test]
    fn idle_game_does_not_move() {
        let mut game = Game::new(test_settings(), Box::new(MemoryStore::default()));
        let before: Vec<i32> = game.aliens().iter().map(|a| a.rect.x).collect();
        game.update();
        let after: Vec<i32> = game.aliens().iter().map(|a| a.rect.x).collect();
        assert_eq!(before, after);
        assert!(!game.fire_bullet());
    }

    #[test]
    fn play_button_starts_only_when_idle() {
        let mut game = Game::new(test_settings(), Box::new(MemoryStore::default()));
        assert!(!game.check_play_button(0, 0));
        assert!(!game.is_active());

        let center = game.play_button().rect;
        assert!(game.check_play_button(center.center_x(), center.center_y()));
        assert!(game.is_active());
        assert!(!game.pointer_visible());

        game.stats.score = 40;
        assert!(!game.check_play_button(center.center_x(), center.center_y()));
        assert_eq!(game.stats().score, 40);
    }

    #[test]
    fn fire_respects_bullet_limit() {
        let mut game = started_game(MemoryStore::default());
        let allowed = game.settings().bullets_allowed;
        for _ in 0..allowed {
            assert!(game.fire_bullet());
        }
        assert!(!game.fire_bullet());
        assert_eq!(game.bullets().len(), allowed);
    }

    #[test]
    fn bullets_leaving_the_top_are_removed() {
        let mut game = started_game(MemoryStore::default());
        game.fleet.clear();
        game.fleet
            .aliens_mut()
            .push(Alien::new(&game.settings, 5, 5));
        assert!(game.fire_bullet());
        let frames = game.settings.screen_height / game.settings.bullet_speed_factor as i32 + 10;
        for _ in 0..frames {
            game.update_bullets();
        }
        assert!(game.bullets().is_empty());
        assert_eq!(game.aliens().len(), 1);
    }

    #[test]
    fn simultaneous_hits_score_per_alien() {
        let mut game = started_game(MemoryStore::with_score(0));
        game.stats.score = 100;
        let targets: Vec<Bounds> = game.aliens()[..3].iter().map(|a| a.rect).collect();
        for target in targets {
            place_bullet_on(&mut game, target);
        }
        let before = game.aliens().len();

        game.check_bullet_alien_collisions();

        assert_eq!(game.stats().score, 130);
        assert_eq!(game.aliens().len(), before - 3);
        assert!(game.bullets().is_empty());
        assert_eq!(game.stats().high_score, 130);
        assert_eq!(game.scoreboard().score_text, "130");
    }

    #[test]
    fn high_score_persisted_only_when_beaten() {
        let store = MemoryStore::with_score(500);
        let mut game = started_game(store.clone());
        let target = game.aliens()[0].rect;
        place_bullet_on(&mut game, target);

        game.check_bullet_alien_collisions();

        assert_eq!(game.stats().score, 10);
        assert_eq!(game.stats().high_score, 500);
        assert!(store.saved().is_empty());

        game.stats.score = 495;
        let target = game.aliens()[0].rect;
        place_bullet_on(&mut game, target);
        game.check_bullet_alien_collisions();
        assert_eq!(game.stats().high_score, 505);
        assert_eq!(store.saved(), vec![505]);
    }

    #[test]
    fn two_bullets_on_one_alien_score_once() {
        let mut game = started_game(MemoryStore::default());
        let target = game.aliens()[0].rect;
        place_bullet_on(&mut game, target);
        place_bullet_on(&mut game, target);

        game.check_bullet_alien_collisions();

        assert_eq!(game.stats().score, 10);
        assert_eq!(game.bullets().len(), 1);
    }

    #[test]
    fn clearing_the_wave_levels_up() {
        let mut game = started_game(MemoryStore::default());
        game.fleet.clear();
        game.fleet
            .aliens_mut()
            .push(Alien::new(&game.settings, 300, 300));
        let target = game.aliens()[0].rect;
        place_bullet_on(&mut game, target);
        game.bullets.push(Bullet::new(&game.settings, &game.ship));
        let (ship, bullet, alien) = (
            game.settings.ship_speed_factor,
            game.settings.bullet_speed_factor,
            game.settings.alien_speed_factor,
        );

        game.check_bullet_alien_collisions();

        assert!(game.bullets().is_empty());
        assert_eq!(game.stats().level, 2);
        assert_eq!(game.scoreboard().level_text, "2");
        assert_eq!(game.aliens().len(), 209);
        let scale = game.settings.speedup_scale;
        assert!((game.settings.ship_speed_factor - ship * scale).abs() < 1e-5);
        assert!((game.settings.bullet_speed_factor - bullet * scale).abs() < 1e-5);
        assert!((game.settings.alien_speed_factor - alien * scale).abs() < 1e-5);
    }

    #[test]
    fn losing_the_last_ship_ends_the_game() {
        let mut game = started_game(MemoryStore::default());
        game.stats.ships_left = 1;
        game.bullets.push(Bullet::new(&game.settings, &game.ship));
        game.fleet.clear();
        game.ship.rect.x = 10;

        game.ship_hit();

        assert_eq!(game.stats().ships_left, 0);
        assert!(game.is_active());
        assert!(game.bullets().is_empty());
        assert_eq!(game.aliens().len(), 209);
        assert_eq!(game.ship().rect.center_x(), game.settings.screen_width / 2);

        game.ship_hit();
        assert!(!game.is_active());
        assert!(game.pointer_visible());
        assert_eq!(game.stats().ships_left, 0);

        game.ship_hit();
        assert_eq!(game.stats().ships_left, 0);
    }

    #[test]
    fn alien_touching_ship_costs_a_life() {
        let mut game = started_game(MemoryStore::default());
        let ship_rect = game.ship.rect;
        game.fleet.clear();
        game.fleet.aliens_mut().push(Alien::new(
            &game.settings,
            ship_rect.x + 5,
            ship_rect.y + 5,
        ));
        let lives = game.stats().ships_left;

        game.update();

        assert_eq!(game.stats().ships_left, lives - 1);
        assert_eq!(game.aliens().len(), 209);
    }

    #[test]
    fn fleet_breach_costs_a_life() {
        let mut game = started_game(MemoryStore::default());
        game.fleet.clear();
        game.fleet.aliens_mut().push(Alien::new(
            &game.settings,
            40,
            game.settings.screen_height - game.settings.alien_height,
        ));
        let lives = game.stats().ships_left;

        game.update();

        assert_eq!(game.stats().ships_left, lives - 1);
        assert!(game.is_active());
    }

    #[test]
    fn hit_pause_freezes_updates() {
        let mut settings = test_settings();
        settings.hit_pause_frames = 2;
        let mut game = Game::new(settings, Box::new(MemoryStore::default()));
        game.start_game();
        game.ship_hit();
        assert!(game.is_paused());

        let before: Vec<i32> = game.aliens().iter().map(|a| a.rect.x).collect();
        game.update();
        game.update();
        let frozen: Vec<i32> = game.aliens().iter().map(|a| a.rect.x).collect();
        assert_eq!(before, frozen);
        assert!(!game.is_paused());

        game.update();
        let moved: Vec<i32> = game.aliens().iter().map(|a| a.rect.x).collect();
        assert_ne!(before, moved);
    }

    #[test]
    fn no_firing_during_hit_pause() {
        let mut settings = test_settings();
        settings.hit_pause_frames = 2;
        let mut game = Game::new(settings, Box::new(MemoryStore::default()));
        game.start_game();
        game.ship_hit();

        assert!(!game.fire_bullet());
        assert!(game.bullets().is_empty());

        game.update();
        game.update();
        assert!(!game.is_paused());
        assert!(game.fire_bullet());
        assert_eq!(game.bullets().len(), 1);
    }

    #[test]
    fn restart_resets_session_but_not_high_score() {
        let mut game = started_game(MemoryStore::with_score(0));
        game.stats.score = 900;
        game.stats.level = 5;
        game.stats.high_score = 900;
        game.settings.increase_speed();
        game.settings.fleet_direction = -1.0;
        game.stats.ships_left = 0;
        game.ship_hit();
        assert!(!game.is_active());

        game.start_game();

        assert!(game.is_active());
        assert_eq!(game.stats().score, 0);
        assert_eq!(game.stats().level, 1);
        assert_eq!(game.stats().ships_left, game.settings.ship_limit);
        assert_eq!(game.stats().high_score, 900);
        assert_eq!(game.settings.ship_speed_factor, game.settings.ship_speed);
        assert_eq!(game.settings.fleet_direction, 1.0);
        assert_eq!(game.scoreboard().score_text, "0");
        assert_eq!(game.aliens().len(), 209);
    }

    #[test]
    fn ships_left_stays_in_range() {
        let mut game = started_game(MemoryStore::default());
        let limit = game.settings.ship_limit;
        for _ in 0..(limit + 3) {
            game.ship_hit();
            assert!(game.stats().ships_left <= limit);
        }
        assert!(!game.is_active());
    }
}
