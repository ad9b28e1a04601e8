//! Hardware generations and native-width dispatch tables.
//!
//! A generation is selected once and turned into a [`CapabilityTable`]; the
//! resolver only ever consults that table, never the generation itself.

pub mod capability;
pub mod resolver;

pub use capability::{CapabilityTable, NativeEntry, WidthRule};
pub use resolver::{NativeWidthResolver, Resolution};

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Processor generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    /// 256-bit ALU datapath. No 64-bit integer or 16-bit float lanes.
    Gen1,
    /// 512-bit datapath. bf16 but no f16.
    #[default]
    Gen2,
    /// 512-bit ALU with the doubled 8-bit multiplier.
    Gen2p,
}

impl Generation {
    pub const ALL: [Generation; 3] = [Generation::Gen1, Generation::Gen2, Generation::Gen2p];

    /// Width in bits of one ALU vector register.
    #[inline]
    pub const fn alu_bits(self) -> usize {
        match self {
            Generation::Gen1 => 256,
            Generation::Gen2 | Generation::Gen2p => 512,
        }
    }

    /// Width in bits of the shuffle network used by filter and interleave.
    #[inline]
    pub const fn shuffle_bits(self) -> usize {
        512
    }

    const fn index(self) -> usize {
        match self {
            Generation::Gen1 => 0,
            Generation::Gen2 => 1,
            Generation::Gen2p => 2,
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Generation::Gen1 => "gen1",
            Generation::Gen2 => "gen2",
            Generation::Gen2p => "gen2p",
        };
        f.write_str(name)
    }
}

impl FromStr for Generation {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Generation::ALL
            .into_iter()
            .find(|g| s.eq_ignore_ascii_case(&g.to_string()))
            .ok_or_else(|| EngineError::InvalidConfig(format!("unknown generation '{s}'")))
    }
}

static TABLES: [OnceLock<Arc<CapabilityTable>>; 3] = [OnceLock::new(), OnceLock::new(), OnceLock::new()];

/// Default capability table for `generation` (built once, cached for process lifetime).
pub fn capability_table(generation: Generation) -> Arc<CapabilityTable> {
    TABLES[generation.index()]
        .get_or_init(|| Arc::new(CapabilityTable::for_generation(generation)))
        .clone()
}
