//! Host configuration.
//!
//! Everything has a default; hosts usually only override `command_style` or
//! `width`. With the `serde` feature the config can be loaded from any serde
//! format, missing fields falling back to their defaults.

use ccmenu_core::Duration;
use thiserror::Error;

use crate::item::ScrollRegionItem;
use crate::style::MenuCommandStyle;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("blink steps must satisfy off <= on < commit (got {off_ms}/{on_ms}/{commit_ms} ms)")]
    BlinkOrder {
        off_ms: u64,
        on_ms: u64,
        commit_ms: u64,
    },
    #[error("{field} must be a finite, non-negative length (got {value})")]
    BadLength { field: &'static str, value: f32 },
}

/// Offsets, from the release, of the three steps of a menu-style commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BlinkTiming {
    /// Highlight turns off.
    pub off_ms: u64,
    /// Highlight turns back on.
    pub on_ms: u64,
    /// Commit runs and the highlight clears.
    pub commit_ms: u64,
}

impl Default for BlinkTiming {
    fn default() -> Self {
        Self {
            off_ms: 0,
            on_ms: 100,
            commit_ms: 200,
        }
    }
}

impl BlinkTiming {
    pub fn off(&self) -> Duration {
        Duration::from_millis(self.off_ms)
    }
    pub fn on(&self) -> Duration {
        Duration::from_millis(self.on_ms)
    }
    pub fn commit(&self) -> Duration {
        Duration::from_millis(self.commit_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.off_ms <= self.on_ms && self.on_ms < self.commit_ms {
            Ok(())
        } else {
            Err(ConfigError::BlinkOrder {
                off_ms: self.off_ms,
                on_ms: self.on_ms,
                commit_ms: self.commit_ms,
            })
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MenuConfig {
    /// Width of every row.
    pub width: f32,
    pub blink: BlinkTiming,
    /// Style of commands that don't pick one themselves.
    pub command_style: MenuCommandStyle,
    pub default_scroll_max_height: f32,
    /// Diameter of toggle circles, and the height of the band that accepts
    /// presses on a toggle row.
    pub circle_size: f32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            width: 310.0,
            blink: BlinkTiming::default(),
            command_style: MenuCommandStyle::default(),
            default_scroll_max_height: ScrollRegionItem::DEFAULT_MAX_HEIGHT,
            circle_size: 26.0,
        }
    }
}

impl MenuConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.blink.validate()?;
        for (field, value) in [
            ("width", self.width),
            ("default_scroll_max_height", self.default_scroll_max_height),
            ("circle_size", self.circle_size),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::BadLength { field, value });
            }
        }
        Ok(())
    }

    /// `self` if valid, otherwise the defaults (logged).
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("invalid menu config ({e}); using defaults");
                Self::default()
            }
        }
    }
}
