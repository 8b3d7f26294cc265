// src/models/profile.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::services::progress::Progress;

/// Presentation variant. Only changes copy and visuals, never grading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Kids,
    #[default]
    Standard,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Kids => "kids",
            DisplayMode::Standard => "standard",
        }
    }
}

impl TryFrom<String> for DisplayMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "kids" => Ok(DisplayMode::Kids),
            "standard" => Ok(DisplayMode::Standard),
            other => Err(format!("unknown display mode '{}'", other)),
        }
    }
}

/// Represents the 'profiles' table. One row per user.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[sqlx(try_from = "String")]
    pub display_mode: DisplayMode,
    /// Experience points.
    pub xp: i64,
    /// Consecutive practice days.
    pub streak: i32,
    pub last_practice_on: Option<chrono::NaiveDate>,
}

impl Profile {
    pub fn progress(&self) -> Progress {
        Progress {
            xp: self.xp,
            streak: self.streak,
            last_practice_on: self.last_practice_on,
        }
    }
}
