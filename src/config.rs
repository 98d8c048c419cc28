use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::Deserialize;

use crate::scores::FileStore;
use crate::settings::Settings;

// Runtime constants (not gameplay tuning).

const CONFIG_ENV: &str = "ALIEN_INVASION_CONFIG";
const SCORES_ENV: &str = "ALIEN_INVASION_SCORES";
const DEFAULT_CONFIG_FILE: &str = "alien_invasion.toml";
const DEFAULT_LOG_FILE: &str = "alien_invasion.log";
pub const DEFAULT_TICK_RATE_MS: u64 = 16; // ~60 FPS

/// Optional overrides read from TOML. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub screen: ScreenConfig,
    pub ship: ShipConfig,
    pub bullet: BulletConfig,
    pub alien: AlienConfig,
    pub game: GameConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShipConfig {
    pub speed: Option<f32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BulletConfig {
    pub speed: Option<f32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub allowed: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlienConfig {
    pub speed: Option<f32>,
    pub points: Option<u32>,
    pub drop_speed: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub speedup_scale: Option<f32>,
    pub tick_rate_ms: Option<u64>,
    pub hit_pause_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub high_score_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
}

impl Config {
    /// Reads `$ALIEN_INVASION_CONFIG`, or `alien_invasion.toml` if it exists.
    /// Returns the path that was used, if any.
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        let path = match env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    return Ok((Self::default(), None));
                }
                path
            }
        };
        let config = Self::from_file(&path)?;
        Ok((config, Some(path)))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if let Some(level) = &config.log.level {
            level
                .parse::<LevelFilter>()
                .map_err(|_| anyhow!("unknown log level {level:?}"))?;
        }
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.game.tick_rate_ms.unwrap_or(DEFAULT_TICK_RATE_MS).max(1))
    }

    pub fn settings(&self) -> Settings {
        let mut settings = Settings::new();
        self.apply(&mut settings);
        settings
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(width) = self.screen.width {
            settings.screen_width = width;
        }
        if let Some(height) = self.screen.height {
            settings.screen_height = height;
        }
        if let Some(speed) = self.ship.speed {
            settings.ship_speed = speed;
        }
        if let Some(limit) = self.ship.limit {
            settings.ship_limit = limit;
        }
        if let Some(speed) = self.bullet.speed {
            settings.bullet_speed = speed;
        }
        if let Some(width) = self.bullet.width {
            settings.bullet_width = width;
        }
        if let Some(height) = self.bullet.height {
            settings.bullet_height = height;
        }
        if let Some(allowed) = self.bullet.allowed {
            settings.bullets_allowed = allowed;
        }
        if let Some(speed) = self.alien.speed {
            settings.alien_speed = speed;
        }
        if let Some(points) = self.alien.points {
            settings.alien_points = points;
        }
        if let Some(drop) = self.alien.drop_speed {
            settings.fleet_drop_speed = drop;
        }
        if let Some(scale) = self.game.speedup_scale {
            settings.speedup_scale = scale;
        }
        if let Some(ms) = self.game.hit_pause_ms {
            let tick_ms = self.tick_rate().as_millis() as u64;
            settings.hit_pause_frames = ms.div_ceil(tick_ms) as u32;
        }
        settings.initialize_dynamic_settings();
    }

    /// Config file first, then `$ALIEN_INVASION_SCORES`, then next to the binary.
    pub fn high_score_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.high_score_path {
            return path.clone();
        }
        env::var_os(SCORES_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(FileStore::default_path)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log
            .file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log
            .level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }
}
