//! NativeWidth resolver.

use std::sync::Arc;

use super::{capability_table, CapabilityTable, Generation, WidthRule};
use crate::error::{EngineError, EngineResult};
use crate::types::{ElementType, OperationFamily};

/// Outcome of resolving one (family, element type) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Lanes per primitive call.
    pub width: usize,
    /// Element type the primitive actually runs on.
    pub element: ElementType,
    /// Operands must be unpacked to `element` before the call.
    pub unpack: bool,
}

#[derive(Debug, Clone)]
pub struct NativeWidthResolver {
    table: Arc<CapabilityTable>,
}

impl NativeWidthResolver {
    pub fn new(table: CapabilityTable) -> Self {
        Self { table: Arc::new(table) }
    }

    pub fn for_generation(generation: Generation) -> Self {
        Self { table: capability_table(generation) }
    }

    pub fn table(&self) -> &CapabilityTable {
        &self.table
    }

    pub fn generation(&self) -> Generation {
        self.table.generation()
    }

    /// Lane count for one primitive invocation.
    pub fn native_width(&self, family: OperationFamily, element: ElementType) -> EngineResult<usize> {
        self.resolve(family, element).map(|r| r.width)
    }

    pub fn resolve(&self, family: OperationFamily, element: ElementType) -> EngineResult<Resolution> {
        if let Some(entry) = self.table.lookup(family, element) {
            check_width(entry.width)?;
            return Ok(match entry.rule {
                WidthRule::Direct => Resolution { width: entry.width, element, unpack: false },
                WidthRule::UnpackFrom(wider) => Resolution { width: entry.width, element: wider, unpack: true },
            });
        }

        if element.is_complex() {
            // Each complex lane occupies two component lanes.
            let component = self.resolve(family, element.component())?;
            let width = component.width / 2;
            check_width(width)?;
            return Ok(Resolution { width, element, unpack: false });
        }

        Err(self.unsupported(family, element))
    }

    /// Common resolution for two integer operands of different widths: the
    /// narrower one is promoted until both agree.
    pub fn resolve_mixed(
        &self,
        family: OperationFamily,
        a: ElementType,
        b: ElementType,
    ) -> EngineResult<Resolution> {
        let common = promote_to_common(a, b).ok_or_else(|| self.unsupported(family, a))?;
        self.resolve(family, common)
    }

    fn unsupported(&self, family: OperationFamily, element: ElementType) -> EngineError {
        EngineError::Unsupported { family, element, generation: self.table.generation() }
    }
}

fn check_width(width: usize) -> EngineResult<()> {
    if width == 0 || !width.is_power_of_two() {
        return Err(EngineError::InvalidNativeWidth { width });
    }
    Ok(())
}

/// Widens the narrower of two integer descriptors until the bit widths match.
pub fn promote_to_common(a: ElementType, b: ElementType) -> Option<ElementType> {
    if a == b {
        return Some(a);
    }
    if !a.is_integer() || !b.is_integer() || a.is_complex() || b.is_complex() {
        return None;
    }
    let (mut narrow, wide) = if a.bits < b.bits { (a, b) } else { (b, a) };
    if narrow.signed != wide.signed {
        return None;
    }
    while narrow.bits < wide.bits {
        narrow = narrow.next_wider()?;
    }
    Some(narrow)
}
