// settings.rs - Driver parameters: advance rate and cell display size
//
// The simulation never reads these; they only drive timers and rendering.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::autostop::AutoStop;
use crate::error::SettingsError;

/// Auto-advance rate in generations per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(per_second: u8) -> Result<Self, SettingsError> {
        if (Self::MIN..=Self::MAX).contains(&per_second) {
            Ok(Self(per_second))
        } else {
            Err(SettingsError::Speed(i64::from(per_second)))
        }
    }

    pub fn per_second(self) -> u8 {
        self.0
    }

    /// Time between two automatic generations.
    pub fn interval(self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.0))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl FromStr for Speed {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|_| SettingsError::NotANumber(s.to_owned()))?;
        u8::try_from(value)
            .map_err(|_| SettingsError::Speed(value))
            .and_then(Self::new)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gen/sec", self.0)
    }
}

/// Edge length of one rendered cell, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellSize(u16);

impl CellSize {
    pub const STEP: u16 = 25;
    pub const MIN: u16 = 25;
    pub const MAX: u16 = 100;

    pub fn new(pixels: u16) -> Result<Self, SettingsError> {
        if (Self::MIN..=Self::MAX).contains(&pixels) && pixels % Self::STEP == 0 {
            Ok(Self(pixels))
        } else {
            Err(SettingsError::CellSize(i64::from(pixels)))
        }
    }

    pub fn pixels(self) -> u16 {
        self.0
    }

    /// Grid cells that fit along `extent` pixels, keeping one cell of margin.
    pub fn cells_along(self, extent: f32) -> i64 {
        let whole = (extent.max(0.0) / f32::from(self.0)).floor() as i64;
        whole.saturating_sub(1).max(0)
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl FromStr for CellSize {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|_| SettingsError::NotANumber(s.to_owned()))?;
        u16::try_from(value)
            .map_err(|_| SettingsError::CellSize(value))
            .and_then(Self::new)
    }
}

impl fmt::Display for CellSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} px", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub speed: Speed,
    pub cell_size: CellSize,
    /// How many earlier generations the auto-stop check remembers.
    pub history: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: Speed::default(),
            cell_size: CellSize::default(),
            history: AutoStop::DEFAULT_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_range_is_one_to_five() {
        assert!(Speed::new(0).is_err());
        assert_eq!(Speed::new(5).unwrap().interval(), Duration::from_millis(200));
        assert_eq!(Speed::new(1).unwrap().interval(), Duration::from_secs(1));
        assert_eq!(Speed::new(6), Err(SettingsError::Speed(6)));
    }

    #[test]
    fn speed_parses_from_text() {
        assert_eq!("3".parse::<Speed>().unwrap().per_second(), 3);
        assert_eq!("-2".parse::<Speed>(), Err(SettingsError::Speed(-2)));
        assert!(matches!("fast".parse::<Speed>(), Err(SettingsError::NotANumber(_))));
    }

    #[test]
    fn cell_size_accepts_quarter_steps_only() {
        for px in [25, 50, 75, 100] {
            assert_eq!(CellSize::new(px).unwrap().pixels(), px);
        }
        for px in [0, 24, 30, 125] {
            assert_eq!(CellSize::new(px), Err(SettingsError::CellSize(i64::from(px))));
        }
    }

    #[test]
    fn cells_along_keeps_a_margin_and_never_goes_negative() {
        let cell = CellSize::new(25).unwrap();
        assert_eq!(cell.cells_along(450.0), 17);
        assert_eq!(cell.cells_along(24.0), 0);
        assert_eq!(cell.cells_along(-10.0), 0);
    }

    #[test]
    fn defaults_match_the_control_panel() {
        let settings = Settings::default();
        assert_eq!(settings.speed.per_second(), 1);
        assert_eq!(settings.cell_size.pixels(), 25);
        assert_eq!(settings.history, 1);
    }
}
