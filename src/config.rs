//! Engine configuration: generation, tile schedule and pad filler.
//!
//! Environment overrides (all optional):
//! - `TILEVEC_GENERATION` = `gen1` | `gen2` | `gen2p`
//! - `TILEVEC_SCHEDULE` = `ascending` | `descending` | `parallel`
//! - `TILEVEC_PAD_FILL` = `zero` | `scribble`
//! - `TILEVEC_PARALLEL_MIN_TILES` = positive integer

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::dispatch::Generation;
use crate::error::{EngineError, EngineResult};

pub const ENV_GENERATION: &str = "TILEVEC_GENERATION";
pub const ENV_SCHEDULE: &str = "TILEVEC_SCHEDULE";
pub const ENV_PAD_FILL: &str = "TILEVEC_PAD_FILL";
pub const ENV_PARALLEL_MIN_TILES: &str = "TILEVEC_PARALLEL_MIN_TILES";

/// Default tile count below which a parallel schedule runs sequentially.
pub const DEFAULT_PARALLEL_MIN_TILES: usize = 16;

/// Order in which split-path tiles are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileSchedule {
    #[default]
    Ascending,
    Descending,
    /// rayon work-stealing pool; only engaged at `parallel_min_tiles` or more.
    Parallel,
}

impl FromStr for TileSchedule {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" => Ok(Self::Ascending),
            "descending" => Ok(Self::Descending),
            "parallel" => Ok(Self::Parallel),
            other => Err(EngineError::InvalidConfig(format!("unknown tile schedule '{other}'"))),
        }
    }
}

/// Content of the lanes added on the pad path. Never observable in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadFill {
    #[default]
    Zero,
    /// Type-specific nonzero poison (NaN for floats).
    Scribble,
}

impl FromStr for PadFill {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "scribble" => Ok(Self::Scribble),
            other => Err(EngineError::InvalidConfig(format!("unknown pad fill '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub generation: Generation,
    pub schedule: TileSchedule,
    pub pad_fill: PadFill,
    pub parallel_min_tiles: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generation: Generation::default(),
            schedule: TileSchedule::default(),
            pad_fill: PadFill::default(),
            parallel_min_tiles: DEFAULT_PARALLEL_MIN_TILES,
        }
    }
}

impl EngineConfig {
    pub fn new(generation: Generation) -> Self {
        Self { generation, ..Self::default() }
    }

    pub fn with_generation(mut self, generation: Generation) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_schedule(mut self, schedule: TileSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_pad_fill(mut self, pad_fill: PadFill) -> Self {
        self.pad_fill = pad_fill;
        self
    }

    pub fn with_parallel_min_tiles(mut self, tiles: usize) -> Self {
        self.parallel_min_tiles = tiles;
        self
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.parallel_min_tiles == 0 {
            return Err(EngineError::InvalidConfig("parallel_min_tiles must be > 0".into()));
        }
        Ok(())
    }

    /// Defaults overridden by `TILEVEC_*` variables. Malformed values are
    /// logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Process-wide config read from the environment on first use.
    pub fn global() -> &'static EngineConfig {
        static GLOBAL: OnceLock<EngineConfig> = OnceLock::new();
        GLOBAL.get_or_init(Self::from_env)
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(v) = parse_var(&lookup, ENV_GENERATION) {
            config.generation = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_SCHEDULE) {
            config.schedule = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_PAD_FILL) {
            config.pad_fill = v;
        }
        if let Some(raw) = lookup(ENV_PARALLEL_MIN_TILES) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.parallel_min_tiles = n,
                _ => log::warn!(
                    "{ENV_PARALLEL_MIN_TILES}='{raw}' is not a positive integer, using {}",
                    config.parallel_min_tiles
                ),
            }
        }
        config
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr<Err = EngineError>,
{
    let raw = lookup(key)?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring {key}: {e}");
            None
        }
    }
}
