//! Player preferences
//!
//! Kept in memory for the lifetime of the process.

use serde::{Deserialize, Serialize};

/// Selectable car paint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CarSkin {
    #[default]
    Red,
    Blue,
    Yellow,
}

impl CarSkin {
    pub const ALL: [CarSkin; 3] = [CarSkin::Red, CarSkin::Blue, CarSkin::Yellow];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarSkin::Red => "red",
            CarSkin::Blue => "blue",
            CarSkin::Yellow => "yellow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(CarSkin::Red),
            "blue" => Some(CarSkin::Blue),
            "yellow" => Some(CarSkin::Yellow),
            _ => None,
        }
    }

    /// Display name on the vehicle picker
    pub fn display_name(&self) -> &'static str {
        match self {
            CarSkin::Red => "Red Racer",
            CarSkin::Blue => "Blue Bolt",
            CarSkin::Yellow => "Yellow Flash",
        }
    }

    /// Body color
    pub fn color(&self) -> [f32; 4] {
        match self {
            CarSkin::Red => [1.0, 0.42, 0.42, 1.0],
            CarSkin::Blue => [0.31, 0.80, 0.77, 1.0],
            CarSkin::Yellow => [1.0, 0.82, 0.40, 1.0],
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Sound & Haptics ===
    pub music: bool,
    pub sound_effects: bool,
    pub vibration: bool,

    // === Vehicle ===
    pub car: CarSkin,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Everything on by default
            music: true,
            sound_effects: true,
            vibration: true,

            car: CarSkin::Red,
        }
    }
}

impl Settings {
    /// Silence music and sound effects, keep haptics
    pub fn muted() -> Self {
        Self {
            music: false,
            sound_effects: false,
            ..Self::default()
        }
    }

    pub fn select_car(&mut self, car: CarSkin) {
        if self.car != car {
            log::info!("Selected {}", car.display_name());
        }
        self.car = car;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skin_names_round_trip() {
        for skin in CarSkin::ALL {
            assert_eq!(CarSkin::from_str(skin.as_str()), Some(skin));
        }
        assert_eq!(CarSkin::from_str("BLUE"), Some(CarSkin::Blue));
        assert_eq!(CarSkin::from_str("green"), None);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.music && settings.sound_effects && settings.vibration);
        assert_eq!(settings.car, CarSkin::Red);
        assert_eq!(settings.car.display_name(), "Red Racer");
    }

    #[test]
    fn test_muted_keeps_vibration() {
        let settings = Settings::muted();
        assert!(!settings.music && !settings.sound_effects);
        assert!(settings.vibration);
    }
}
