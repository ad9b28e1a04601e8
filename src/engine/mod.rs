//! Generic decomposition engine.
//!
//! Every public operation follows the same pipeline: resolve the native
//! width, build a [`TilePlan`], realize operands through the adapter, invoke
//! one primitive per tile and assemble the tile outputs in lane order.

pub mod accum;
pub mod adapter;
pub mod assemble;
pub mod reduce;
pub mod tile;

pub use adapter::{Operand, OwnedOperand, RealizedOperand};
pub use assemble::ResultAssembler;
pub use tile::{TilePath, TilePlan};

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::config::{EngineConfig, TileSchedule};
use crate::dispatch::{CapabilityTable, Generation, NativeWidthResolver, Resolution};
use crate::error::{EngineError, EngineResult};
use crate::primitives::{BinaryOp, BitOp, CompareOp, Primitives, PrimitiveSignature, SoftPrimitives, UnaryOp};
use crate::traits::{Bitwise, Element};
use crate::types::{ElementType, OperationFamily};

/// Decomposition engine bound to one capability table and one primitive set.
#[derive(Debug, Clone)]
pub struct Engine<P = SoftPrimitives> {
    config: EngineConfig,
    resolver: NativeWidthResolver,
    primitives: P,
}

impl Engine<SoftPrimitives> {
    pub fn new(generation: Generation) -> Self {
        Self {
            config: EngineConfig::new(generation),
            resolver: NativeWidthResolver::for_generation(generation),
            primitives: SoftPrimitives,
        }
    }

    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            resolver: NativeWidthResolver::for_generation(config.generation),
            primitives: SoftPrimitives,
        })
    }

    /// Engine configured from the process-wide `TILEVEC_*` environment.
    pub fn from_env() -> EngineResult<Self> {
        Self::from_config(*EngineConfig::global())
    }
}

impl Default for Engine<SoftPrimitives> {
    fn default() -> Self {
        Self::new(Generation::default())
    }
}

impl<P: Primitives> Engine<P> {
    /// Rebinds the engine to another Native Primitive Set.
    pub fn with_primitives<Q: Primitives>(self, primitives: Q) -> Engine<Q> {
        Engine { config: self.config, resolver: self.resolver, primitives }
    }

    /// Replaces the capability table (and the configured generation with it).
    pub fn with_table(mut self, table: CapabilityTable) -> Self {
        self.config.generation = table.generation();
        self.resolver = NativeWidthResolver::new(table);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        if config.generation != self.resolver.generation() {
            self.resolver = NativeWidthResolver::for_generation(config.generation);
        }
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resolver(&self) -> &NativeWidthResolver {
        &self.resolver
    }

    pub fn primitives(&self) -> &P {
        &self.primitives
    }

    pub fn generation(&self) -> Generation {
        self.resolver.generation()
    }

    #[inline]
    pub fn resolve(&self, family: OperationFamily, element: ElementType) -> EngineResult<Resolution> {
        self.resolver.resolve(family, element)
    }

    /// Decomposition the engine would use for `len` lanes of `element`.
    pub fn plan(&self, family: OperationFamily, element: ElementType, len: usize) -> EngineResult<TilePlan> {
        let width = self.resolve(family, element)?.width;
        self.plan_width(family, len, width)
    }

    pub(crate) fn plan_width(&self, family: OperationFamily, len: usize, width: usize) -> EngineResult<TilePlan> {
        let plan = TilePlan::new(len, width)?;
        log::debug!(
            "{family:?}: L={} W={} path={:?} K={}",
            plan.logical_len, plan.native_width, plan.path, plan.tiles
        );
        Ok(plan)
    }

    /// Runs `kernel` once per tile under the configured schedule and
    /// assembles the results. Each call must yield `out_width` lanes.
    ///
    /// Nothing runs unless the primitive set provides `signature`.
    pub(crate) fn execute<U, F>(
        &self,
        signature: PrimitiveSignature,
        plan: &TilePlan,
        out_width: usize,
        kernel: F,
    ) -> EngineResult<Vec<U>>
    where
        U: Send,
        F: Fn(usize) -> Vec<U> + Sync,
    {
        self.require(&signature)?;
        let mut assembler = ResultAssembler::new(plan.tiles, out_width, plan.logical_out(out_width));
        let call = |i: usize| {
            log::trace!("tile {i}/{} {signature:?}", plan.tiles);
            kernel(i)
        };

        match self.effective_schedule(plan.tiles) {
            TileSchedule::Ascending => {
                for i in 0..plan.tiles {
                    assembler.insert(i, call(i))?;
                }
            }
            TileSchedule::Descending => {
                for i in (0..plan.tiles).rev() {
                    assembler.insert(i, call(i))?;
                }
            }
            TileSchedule::Parallel => {
                let outputs: Vec<(usize, Vec<U>)> =
                    (0..plan.tiles).into_par_iter().map(|i| (i, call(i))).collect();
                for (i, lanes) in outputs {
                    assembler.insert(i, lanes)?;
                }
            }
        }
        assembler.finish()
    }

    pub(crate) fn require(&self, signature: &PrimitiveSignature) -> EngineResult<()> {
        if self.primitives.provides(signature) {
            Ok(())
        } else {
            Err(EngineError::MissingPrimitive {
                family: signature.family,
                arity: signature.arity,
                accumulator: signature.accumulator,
                width: signature.width,
            })
        }
    }

    fn effective_schedule(&self, tiles: usize) -> TileSchedule {
        static WARNED: AtomicBool = AtomicBool::new(false);

        match self.config.schedule {
            TileSchedule::Parallel if tiles < self.config.parallel_min_tiles => {
                if tiles > 1 && !WARNED.swap(true, Ordering::Relaxed) {
                    log::warn!(
                        "parallel schedule requested for {tiles} tiles (< {}), running ascending",
                        self.config.parallel_min_tiles
                    );
                }
                TileSchedule::Ascending
            }
            schedule => schedule,
        }
    }

    /// Elementwise `op` over already-resolved lanes.
    pub(crate) fn binary_lanes<E: Element>(
        &self,
        family: OperationFamily,
        width: usize,
        op: BinaryOp,
        a: Operand<'_, E>,
        b: Operand<'_, E>,
    ) -> EngineResult<Vec<E>> {
        let plan = self.plan_width(family, logical_len(&[a, b])?, width)?;
        let fill = self.config.pad_fill;
        let ra = RealizedOperand::realize(&plan, a, fill)?;
        let rb = RealizedOperand::realize(&plan, b, fill)?;
        let sig = PrimitiveSignature::new(family, 2, width);
        self.execute(sig, &plan, width, |i| self.primitives.binary(op, ra.tile(i), rb.tile(i)))
    }

    pub(crate) fn unary_lanes<E: Element>(
        &self,
        family: OperationFamily,
        width: usize,
        op: UnaryOp,
        a: &[E],
    ) -> EngineResult<Vec<E>> {
        let plan = self.plan_width(family, a.len(), width)?;
        let ra = RealizedOperand::realize(&plan, Operand::Vector(a), self.config.pad_fill)?;
        let sig = PrimitiveSignature::new(family, 1, width);
        self.execute(sig, &plan, width, |i| self.primitives.unary(op, ra.tile(i)))
    }

    /// Lane mask `op(a[i], b[i])`.
    pub(crate) fn compare_lanes<E: Element>(
        &self,
        width: usize,
        op: CompareOp,
        a: Operand<'_, E>,
        b: Operand<'_, E>,
    ) -> EngineResult<Vec<bool>> {
        let plan = self.plan_width(OperationFamily::Compare, logical_len(&[a, b])?, width)?;
        let fill = self.config.pad_fill;
        let ra = RealizedOperand::realize(&plan, a, fill)?;
        let rb = RealizedOperand::realize(&plan, b, fill)?;
        let sig = PrimitiveSignature::new(OperationFamily::Compare, 2, width);
        self.execute(sig, &plan, width, |i| self.primitives.compare(op, ra.tile(i), rb.tile(i)))
    }

    /// `b[i]` where `mask[i]` is set, `a[i]` elsewhere. The mask fixes L.
    pub(crate) fn select_lanes<E: Element>(
        &self,
        width: usize,
        mask: &[bool],
        a: Operand<'_, E>,
        b: Operand<'_, E>,
    ) -> EngineResult<Vec<E>> {
        let plan = self.plan_width(OperationFamily::Compare, mask.len(), width)?;
        let fill = self.config.pad_fill;
        let ra = RealizedOperand::realize(&plan, a, fill)?;
        let rb = RealizedOperand::realize(&plan, b, fill)?;
        let rm = RealizedOperand::mask(&plan, mask)?;
        let sig = PrimitiveSignature::new(OperationFamily::Compare, 3, width);
        self.execute(sig, &plan, width, |i| self.primitives.select(ra.tile(i), rb.tile(i), rm.tile(i)))
    }

    pub(crate) fn bitwise_lanes<E: Bitwise>(
        &self,
        width: usize,
        op: BitOp,
        a: Operand<'_, E>,
        b: Operand<'_, E>,
    ) -> EngineResult<Vec<E>> {
        let plan = self.plan_width(OperationFamily::Add, logical_len(&[a, b])?, width)?;
        let fill = self.config.pad_fill;
        let ra = RealizedOperand::realize(&plan, a, fill)?;
        let rb = RealizedOperand::realize(&plan, b, fill)?;
        let sig = PrimitiveSignature::new(OperationFamily::Add, 2, width);
        self.execute(sig, &plan, width, |i| self.primitives.bitwise(op, ra.tile(i), rb.tile(i)))
    }

    /// Lane order reversed across the whole vector: output tile `i` is the
    /// reversed input tile `K - 1 - i`. On the pad path the filler goes in
    /// front so the reversed lanes land at the bottom of the register.
    pub(crate) fn reverse_lanes<E: Element>(&self, width: usize, v: &[E]) -> EngineResult<Vec<E>> {
        let plan = self.plan_width(OperationFamily::Interleave, v.len(), width)?;
        let lanes: Cow<'_, [E]> = match plan.path {
            TilePath::Pad => {
                let mut register = adapter::grow::<E>(&[], width - v.len(), self.config.pad_fill);
                register.extend_from_slice(v);
                Cow::Owned(register)
            }
            TilePath::Direct | TilePath::Split => Cow::Borrowed(v),
        };
        let sig = PrimitiveSignature::new(OperationFamily::Interleave, 1, width);
        self.execute(sig, &plan, width, |i| {
            let source = plan.tile_range(plan.tiles - 1 - i);
            self.primitives.reverse(&lanes[source])
        })
    }
}

/// Logical length shared by the vector operands; scalars have none.
pub(crate) fn logical_len<T>(operands: &[Operand<'_, T>]) -> EngineResult<usize> {
    let mut len = None;
    for operand in operands {
        if let Operand::Vector(v) = operand {
            match len {
                None => len = Some(v.len()),
                Some(expected) if expected != v.len() => {
                    return Err(EngineError::LengthMismatch { expected, actual: v.len() })
                }
                Some(_) => {}
            }
        }
    }
    len.ok_or(EngineError::NoOperands)
}
