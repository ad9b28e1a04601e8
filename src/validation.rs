//! Static configuration checks shared by the tiler and the ops.
//!
//! Every check runs before any primitive is invoked, so a failing operation
//! never produces partial output.

use crate::error::{EngineError, EngineResult};

/// Logical lengths must be a power of two (>= 1).
#[inline]
pub fn validate_logical_len(len: usize) -> EngineResult<()> {
    if !len.is_power_of_two() {
        return Err(EngineError::NotPowerOfTwo { len });
    }
    Ok(())
}

#[inline]
pub fn validate_native_width(width: usize) -> EngineResult<()> {
    if !width.is_power_of_two() {
        return Err(EngineError::InvalidNativeWidth { width });
    }
    Ok(())
}

#[inline]
pub fn validate_same_len(expected: usize, actual: usize) -> EngineResult<()> {
    if expected != actual {
        return Err(EngineError::LengthMismatch { expected, actual });
    }
    Ok(())
}

/// Filter step: a power of two no larger than half the input.
#[inline]
pub fn validate_filter_step(step: usize, len: usize) -> EngineResult<()> {
    if len < 2 || !step.is_power_of_two() || step > len / 2 {
        return Err(EngineError::InvalidStep { step, len });
    }
    Ok(())
}

/// Interleave step: a power of two no larger than one input.
#[inline]
pub fn validate_interleave_step(step: usize, len: usize) -> EngineResult<()> {
    if !step.is_power_of_two() || step > len {
        return Err(EngineError::InvalidStep { step, len });
    }
    Ok(())
}
