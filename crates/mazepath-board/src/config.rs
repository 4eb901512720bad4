//! Board configuration.

use std::time::Duration;

use mazepath_maze::MazeOptions;

/// Board dimensions, maze settings and animation rates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    /// Number of routes a generated maze leaves between the endpoints.
    pub solutions: usize,
    pub maze: MazeOptions,
    /// Search ticks per second at [`Speed::Slow`].
    pub fps_slow: u32,
    /// Search ticks per second at [`Speed::Fast`].
    pub fps_fast: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 24,
            solutions: 4,
            maze: MazeOptions::default(),
            fps_slow: 10,
            fps_fast: 45,
        }
    }
}

/// Animation speed of a running search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speed {
    #[default]
    Slow,
    Fast,
}

impl Speed {
    pub fn fps(self, config: &BoardConfig) -> u32 {
        match self {
            Self::Slow => config.fps_slow,
            Self::Fast => config.fps_fast,
        }
    }

    /// Time between two search ticks. A zero rate counts as one tick per
    /// second.
    pub fn frame_interval(self, config: &BoardConfig) -> Duration {
        Duration::from_secs(1) / self.fps(config).max(1)
    }
}
