//! Operand adapter: grow, broadcast, unpack and promote before tiling.

use std::borrow::Cow;

use crate::config::PadFill;
use crate::error::EngineResult;
use crate::traits::{Element, Widen};
use crate::types::OperandRole;
use crate::validation::validate_same_len;
use crate::vector::LogicalVector;

use super::tile::{TilePath, TilePlan};

/// One argument of an elementwise operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a, T> {
    Vector(&'a [T]),
    /// Same value in every lane.
    Scalar(T),
}

impl<'a, T> Operand<'a, T> {
    pub fn role(&self) -> OperandRole {
        match self {
            Operand::Vector(_) => OperandRole::Vector,
            Operand::Scalar(_) => OperandRole::BroadcastScalar,
        }
    }
}

impl<'a, T: Copy> From<&'a LogicalVector<T>> for Operand<'a, T> {
    fn from(v: &'a LogicalVector<T>) -> Self {
        Operand::Vector(v.as_slice())
    }
}

impl<'a, T> From<&'a [T]> for Operand<'a, T> {
    fn from(v: &'a [T]) -> Self {
        Operand::Vector(v)
    }
}

/// Operand laid out for a plan: tiles can be sliced out without copying.
#[derive(Debug)]
pub struct RealizedOperand<'a, T: Clone> {
    lanes: Cow<'a, [T]>,
    role: OperandRole,
    width: usize,
}

impl<'a, T: Clone> RealizedOperand<'a, T> {
    /// Native-width slice for tile `index`.
    #[inline]
    pub fn tile(&self, index: usize) -> &[T] {
        match self.role {
            OperandRole::BroadcastScalar => &self.lanes,
            OperandRole::Vector | OperandRole::RunningAccumulator => {
                let start = index * self.width;
                &self.lanes[start..start + self.width]
            }
        }
    }

    pub fn role(&self) -> OperandRole {
        self.role
    }
}

impl<'a> RealizedOperand<'a, bool> {
    /// Lane mask laid out like a vector operand. Pad lanes are unset.
    pub fn mask(plan: &TilePlan, lanes: &'a [bool]) -> EngineResult<Self> {
        validate_same_len(plan.logical_len, lanes.len())?;
        let lanes = match plan.path {
            TilePath::Pad => Cow::Owned(grow_with(lanes, plan.native_width, false)),
            TilePath::Direct | TilePath::Split => Cow::Borrowed(lanes),
        };
        Ok(Self { lanes, role: OperandRole::Vector, width: plan.native_width })
    }
}

impl<'a, T: Element> RealizedOperand<'a, T> {
    /// Vector and accumulator operands must carry exactly `plan.logical_len`
    /// lanes; on the pad path they are grown to the native width. Scalars are
    /// realized once as one native-width vector.
    pub fn realize(plan: &TilePlan, operand: Operand<'a, T>, fill: PadFill) -> EngineResult<Self> {
        match operand {
            Operand::Vector(lanes) => Self::realize_lanes(plan, lanes, OperandRole::Vector, fill),
            Operand::Scalar(value) => Ok(Self {
                lanes: Cow::Owned(vec![value; plan.native_width]),
                role: OperandRole::BroadcastScalar,
                width: plan.native_width,
            }),
        }
    }

    pub fn accumulator(plan: &TilePlan, lanes: &'a [T], fill: PadFill) -> EngineResult<Self> {
        Self::realize_lanes(plan, lanes, OperandRole::RunningAccumulator, fill)
    }

    fn realize_lanes(plan: &TilePlan, lanes: &'a [T], role: OperandRole, fill: PadFill) -> EngineResult<Self> {
        validate_same_len(plan.logical_len, lanes.len())?;
        let lanes = match plan.path {
            TilePath::Pad => Cow::Owned(grow(lanes, plan.native_width, fill)),
            TilePath::Direct | TilePath::Split => Cow::Borrowed(lanes),
        };
        Ok(Self { lanes, role, width: plan.native_width })
    }
}

/// Grows `lanes` to `width`: original lanes in place, filler after them.
pub fn grow<T: Element>(lanes: &[T], width: usize, fill: PadFill) -> Vec<T> {
    grow_with(lanes, width, filler(fill))
}

pub fn filler<T: Element>(fill: PadFill) -> T {
    match fill {
        PadFill::Zero => T::ZERO,
        PadFill::Scribble => T::scribble(),
    }
}

fn grow_with<T: Copy>(lanes: &[T], width: usize, filler: T) -> Vec<T> {
    let mut out = Vec::with_capacity(width.max(lanes.len()));
    out.extend_from_slice(lanes);
    out.resize(width.max(lanes.len()), filler);
    out
}

/// Sub-byte lanes unpacked to their byte-wide form.
pub fn unpack_lanes<T: Element>(lanes: &[T]) -> Vec<T::Unpacked> {
    lanes.iter().map(|&x| x.unpack()).collect()
}

pub fn pack_lanes<T: Element>(lanes: Vec<T::Unpacked>) -> Vec<T> {
    lanes.into_iter().map(T::pack).collect()
}

/// Promotion to the next wider integer type. Value-preserving, so
/// promoting an already-promoted operand's values again yields the same values.
pub fn promote_lanes<T: Widen>(lanes: &[T]) -> Vec<T::Wider> {
    lanes.iter().map(|&x| x.widen()).collect()
}

/// Owned counterpart of [`Operand`] for adapted (unpacked or promoted) data.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedOperand<T> {
    Vector(Vec<T>),
    Scalar(T),
}

impl<T: Copy> OwnedOperand<T> {
    pub fn as_operand(&self) -> Operand<'_, T> {
        match self {
            OwnedOperand::Vector(v) => Operand::Vector(v),
            OwnedOperand::Scalar(s) => Operand::Scalar(*s),
        }
    }
}

pub fn unpack_operand<T: Element>(operand: Operand<'_, T>) -> OwnedOperand<T::Unpacked> {
    match operand {
        Operand::Vector(v) => OwnedOperand::Vector(unpack_lanes(v)),
        Operand::Scalar(s) => OwnedOperand::Scalar(s.unpack()),
    }
}

pub fn promote_operand<T: Widen>(operand: Operand<'_, T>) -> OwnedOperand<T::Wider> {
    match operand {
        Operand::Vector(v) => OwnedOperand::Vector(promote_lanes(v)),
        Operand::Scalar(s) => OwnedOperand::Scalar(s.widen()),
    }
}
