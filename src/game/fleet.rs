use crate::game::alien::Alien;
use crate::game::bounds::Bounds;
use crate::settings::Settings;

/// The alien grid of the current wave. Direction lives in [`Settings`] so a
/// new game can reset it together with the other dynamic values.
#[derive(Debug, Default)]
pub struct Fleet {
    aliens: Vec<Alien>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns and rows that fit the screen, clamped at zero.
    pub fn dimensions(settings: &Settings, ship_height: i32) -> (usize, usize) {
        let alien_width = settings.alien_width.max(1);
        let alien_height = settings.alien_height.max(1);

        let available_space_x = settings.screen_width - 2 * alien_width;
        let number_aliens_x = available_space_x.div_euclid(2 * alien_width);

        let available_space_y = settings.screen_height - 3 * alien_height - ship_height;
        let number_rows = available_space_y.div_euclid(2 * alien_height);

        (number_aliens_x.max(0) as usize, number_rows.max(0) as usize)
    }

    /// Appends a full grid. Callers clear the fleet first when they want a
    /// fresh wave.
    pub fn create_fleet(&mut self, settings: &Settings, ship_height: i32) {
        let (number_aliens_x, number_rows) = Self::dimensions(settings, ship_height);
        let (w, h) = (settings.alien_width, settings.alien_height);
        self.aliens.reserve(number_aliens_x * number_rows);
        for row_number in 0..number_rows as i32 {
            for alien_number in 0..number_aliens_x as i32 {
                let x = w + 2 * w * alien_number;
                let y = h + 2 * h * row_number;
                self.aliens.push(Alien::new(settings, x, y));
            }
        }
    }

    /// Reverses the fleet at most once per call, as soon as any alien
    /// reaches an edge.
    pub fn check_fleet_edges(&mut self, settings: &mut Settings) -> bool {
        if self.aliens.iter().any(|alien| alien.check_edges(settings)) {
            self.change_fleet_direction(settings);
            true
        } else {
            false
        }
    }

    pub fn change_fleet_direction(&mut self, settings: &mut Settings) {
        for alien in &mut self.aliens {
            alien.drop_by(settings.fleet_drop_speed);
        }
        settings.fleet_direction = -settings.fleet_direction;
    }

    pub fn update(&mut self, settings: &Settings) {
        for alien in &mut self.aliens {
            alien.update(settings);
        }
    }

    pub fn reached_bottom(&self, settings: &Settings) -> bool {
        self.aliens
            .iter()
            .any(|alien| alien.rect.bottom() >= settings.screen_height)
    }

    pub fn collides_with(&self, rect: &Bounds) -> bool {
        self.aliens.iter().any(|alien| alien.rect.collides(rect))
    }

    /// Drops every alien whose index is flagged in `destroyed`.
    pub fn remove_destroyed(&mut self, destroyed: &[bool]) {
        let mut idx = 0;
        self.aliens.retain(|_| {
            let keep = !destroyed.get(idx).copied().unwrap_or(false);
            idx += 1;
            keep
        });
    }

    pub fn clear(&mut self) {
        self.aliens.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    #[cfg(test)]
    pub(crate) fn aliens_mut(&mut self) -> &mut Vec<Alien> {
        &mut self.aliens
    }
}
