//! Data-driven native width table: (operation family, element type) -> lanes.

use std::collections::HashMap;

use super::Generation;
use crate::types::{ElementType, NumericClass, OperationFamily};

/// How a table entry's width applies to its element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidthRule {
    /// The primitive consumes this element type directly.
    Direct,
    /// No primitive of its own: operands are unpacked to the given type first.
    UnpackFrom(ElementType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeEntry {
    pub width: usize,
    pub rule: WidthRule,
}

impl NativeEntry {
    pub const fn direct(width: usize) -> Self {
        Self { width, rule: WidthRule::Direct }
    }
}

/// Capability descriptor for one generation.
///
/// The default tables come from [`CapabilityTable::for_generation`]; custom
/// hardware descriptions start from [`CapabilityTable::empty`] or patch a
/// default with [`CapabilityTable::with_entry`]. Entries are not validated
/// on insertion; the resolver rejects unusable widths when it reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityTable {
    generation: Generation,
    entries: HashMap<(OperationFamily, ElementType), NativeEntry>,
}

/// Real lane types with a primitive of their own.
const REAL_TYPES: [ElementType; 11] = [
    ElementType::I8,
    ElementType::U8,
    ElementType::I16,
    ElementType::U16,
    ElementType::I32,
    ElementType::U32,
    ElementType::I64,
    ElementType::U64,
    ElementType::F32,
    ElementType::BF16,
    ElementType::F16,
];

impl CapabilityTable {
    pub fn empty(generation: Generation) -> Self {
        Self { generation, entries: HashMap::new() }
    }

    /// Default table for one generation.
    pub fn for_generation(generation: Generation) -> Self {
        let mut table = Self::empty(generation);
        for family in OperationFamily::ALL {
            for element in REAL_TYPES {
                if !supports(generation, element) {
                    continue;
                }
                if let Some(width) = default_width(generation, family, element) {
                    table.entries.insert((family, element), NativeEntry::direct(width));
                }
            }
            for (sub, wider) in [
                (ElementType::I4, ElementType::I8),
                (ElementType::U4, ElementType::U8),
            ] {
                if let Some(entry) = table.entries.get(&(family, wider)).copied() {
                    table.entries.insert(
                        (family, sub),
                        NativeEntry { width: entry.width, rule: WidthRule::UnpackFrom(wider) },
                    );
                }
            }
        }
        log::debug!(
            "capability table for {generation}: {} entries",
            table.entries.len()
        );
        table
    }

    /// Adds or replaces a direct entry.
    pub fn with_entry(self, family: OperationFamily, element: ElementType, width: usize) -> Self {
        self.with_native(family, element, NativeEntry::direct(width))
    }

    pub fn with_native(mut self, family: OperationFamily, element: ElementType, entry: NativeEntry) -> Self {
        self.entries.insert((family, element), entry);
        self
    }

    pub fn without_entry(mut self, family: OperationFamily, element: ElementType) -> Self {
        self.entries.remove(&(family, element));
        self
    }

    #[inline]
    pub fn lookup(&self, family: OperationFamily, element: ElementType) -> Option<NativeEntry> {
        self.entries.get(&(family, element)).copied()
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn supports(generation: Generation, element: ElementType) -> bool {
    match generation {
        Generation::Gen1 => element.bits <= 32 && !is_half_float(element),
        Generation::Gen2 => element != ElementType::F16,
        Generation::Gen2p => true,
    }
}

fn is_half_float(element: ElementType) -> bool {
    element.bits == 16 && matches!(element.class, NumericClass::Float | NumericClass::BrainFloat)
}

fn default_width(generation: Generation, family: OperationFamily, element: ElementType) -> Option<usize> {
    let bits = element.bits as usize;
    match family {
        OperationFamily::Add | OperationFamily::Compare | OperationFamily::Neg | OperationFamily::Reduce => {
            Some(generation.alu_bits() / bits)
        }
        OperationFamily::Filter | OperationFamily::Interleave => Some(generation.shuffle_bits() / bits),
        OperationFamily::Mul => mul_width(generation, element),
    }
}

/// Multiplier lanes. The multiplier is sized by its accumulator output, so
/// it does not follow the ALU formula.
fn mul_width(generation: Generation, element: ElementType) -> Option<usize> {
    use Generation::*;
    use NumericClass::*;

    let lanes = match (generation, element.class, element.bits) {
        (Gen1, Int, 8) | (Gen1, Int, 16) => 16,
        (Gen1, Int, 32) | (Gen1, Float, 32) => 8,

        (Gen2, Int, 8) | (Gen2, Int, 16) => 32,
        (Gen2, Int, 32) | (Gen2, Float, 32) | (Gen2, BrainFloat, 16) => 16,

        (Gen2p, Int, 8) => 64,
        (Gen2p, Int, 16) | (Gen2p, BrainFloat, 16) | (Gen2p, Float, 16) => 32,
        (Gen2p, Int, 32) | (Gen2p, Float, 32) => 16,
        (Gen2p, Int, 64) => 8,
        _ => return None,
    };
    Some(lanes)
}
