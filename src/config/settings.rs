//! Configuration settings for the chignon scheduling core.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::timegrid::{hhmm, SalonCalendar, TimeWindow};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub salon: SalonConfig,
    pub scheduling: SchedulingConfig,
    pub contract: ContractConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            salon: SalonConfig::default(),
            scheduling: SchedulingConfig::default(),
            contract: ContractConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        // Try standard config locations
        let config_paths = [
            // Current directory
            PathBuf::from("config.toml"),
            PathBuf::from("chignon.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("chignon/config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".chignon/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.salon.name.trim().is_empty() {
            return Err(ConfigError::MissingField("salon.name".to_string()).into());
        }

        // Validate scheduling config
        if self.scheduling.open >= self.scheduling.close {
            return Err(ConfigError::Invalid(
                "scheduling.open must be before scheduling.close".to_string(),
            )
            .into());
        }
        if self.scheduling.lead_time_minutes >= 24 * 60 {
            return Err(ConfigError::Invalid(
                "lead_time_minutes must be shorter than a day".to_string(),
            )
            .into());
        }
        if self.scheduling.fallback_service_minutes == 0 {
            return Err(
                ConfigError::Invalid("fallback_service_minutes must be > 0".to_string()).into(),
            );
        }
        if self.scheduling.grid_start_hour >= self.scheduling.grid_end_hour {
            return Err(ConfigError::Invalid(
                "grid_start_hour must be before grid_end_hour".to_string(),
            )
            .into());
        }
        if self.scheduling.grid_end_hour > 24 {
            return Err(ConfigError::Invalid("grid_end_hour must be <= 24".to_string()).into());
        }

        // Validate contract config
        if !self.contract.hours_per_day.is_finite() || self.contract.hours_per_day <= 0.0 {
            return Err(ConfigError::Invalid("hours_per_day must be > 0".to_string()).into());
        }
        if !self.contract.vacation_days_per_year.is_finite()
            || self.contract.vacation_days_per_year < 0.0
        {
            return Err(
                ConfigError::Invalid("vacation_days_per_year must be >= 0".to_string()).into(),
            );
        }

        Ok(())
    }

    /// Calendar anchored to the salon's configured timezone.
    pub fn calendar(&self) -> SalonCalendar {
        SalonCalendar::new(self.salon.timezone)
    }
}

/// Salon identity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SalonConfig {
    /// Display name of the salon
    pub name: String,
    /// IANA timezone the salon's wall clock runs on
    pub timezone: Tz,
}

impl Default for SalonConfig {
    fn default() -> Self {
        Self {
            name: "Chignon".to_string(),
            timezone: chrono_tz::Europe::Zurich,
        }
    }
}

/// Slot computation and planning-grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Default opening time for staff without personal working hours
    #[serde(with = "hhmm")]
    pub open: NaiveTime,
    /// Default closing time for staff without personal working hours
    #[serde(with = "hhmm")]
    pub close: NaiveTime,
    /// Minutes of advance notice required for same-day bookings
    pub lead_time_minutes: u32,
    /// Assumed duration for appointments whose service is unknown
    pub fallback_service_minutes: u32,
    /// First hour shown on the day planning grid
    pub grid_start_hour: u32,
    /// Hour the day planning grid stops before (exclusive)
    pub grid_end_hour: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(8, 30, 0).expect("valid opening time"),
            close: NaiveTime::from_hms_opt(19, 0, 0).expect("valid closing time"),
            lead_time_minutes: 15,
            fallback_service_minutes: 30,
            grid_start_hour: 8,
            grid_end_hour: 20,
        }
    }
}

impl SchedulingConfig {
    /// The salon's default working window, used when a staff member has no
    /// personal working hours configured.
    pub fn opening_window(&self) -> TimeWindow {
        TimeWindow::new(self.open, self.close)
    }
}

/// Employment contract configuration used for absence accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Working hours that make up one full absence day
    pub hours_per_day: f64,
    /// Vacation allowance granted per year, in days
    pub vacation_days_per_year: f64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            hours_per_day: 8.5,
            vacation_days_per_year: 25.0,
        }
    }
}
