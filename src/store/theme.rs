use anyhow::Result;
use rusqlite::Connection;

use crate::color::{self, is_valid_hex};
use crate::db;
use crate::types::Theme;

pub const COLOR_KEY: &str = "timeleft-color";
pub const DEFAULT_COLOR: &str = "#f43f5e";
pub const HOVER_DARKEN_PERCENT: f64 = 15.0;

/// Holds the accent color. The stored hex is always a valid `#RRGGBB`.
#[derive(Clone, Debug)]
pub struct ThemeStore {
    hex: String,
}

impl ThemeStore {
    /// Builds the store from an injected initial value, falling back to the
    /// default rose when it is missing or malformed.
    pub fn new(initial: Option<String>) -> Self {
        let hex = match initial {
            Some(hex) if is_valid_hex(&hex) => hex,
            Some(hex) => {
                log::warn!("ignoring invalid stored color {hex:?}");
                DEFAULT_COLOR.to_string()
            }
            None => DEFAULT_COLOR.to_string(),
        };
        Self { hex }
    }

    pub fn load(conn: &Connection) -> Result<Self> {
        let initial = match db::read_json::<String>(COLOR_KEY, conn) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("{err:#}");
                None
            }
        };
        Ok(Self::new(initial))
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn theme(&self) -> Theme {
        let hover = color::darken(&self.hex, HOVER_DARKEN_PERCENT)
            .unwrap_or_else(|| self.hex.clone());
        Theme {
            hex: self.hex.clone(),
            hover,
        }
    }

    /// Persists and adopts `hex`. Returns `Ok(false)` without touching
    /// anything when `hex` is not a `#RRGGBB` triplet.
    pub fn set_color(&mut self, hex: &str, conn: &Connection) -> Result<bool> {
        if !is_valid_hex(hex) {
            log::debug!("rejected color {hex:?}");
            return Ok(false);
        }
        db::write_json(COLOR_KEY, hex, conn)?;
        self.hex = hex.to_string();
        Ok(true)
    }
}
