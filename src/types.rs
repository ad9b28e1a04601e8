//! Element type descriptors, operation families and operand roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric class of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericClass {
    Int,
    ComplexInt,
    /// IEEE binary floats (f16, f32).
    Float,
    /// bfloat16: same width as f16, different format.
    BrainFloat,
    ComplexFloat,
    /// Complex lane with bfloat16 components.
    ComplexBrainFloat,
}

/// Element type descriptor: numeric class, bit width and signedness.
///
/// For complex classes `bits` is the width of the whole complex lane, i.e.
/// twice the width of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementType {
    pub class: NumericClass,
    pub bits: u32,
    pub signed: bool,
}

impl ElementType {
    pub const I4: Self = Self::signed(4);
    pub const U4: Self = Self::unsigned(4);
    pub const I8: Self = Self::signed(8);
    pub const U8: Self = Self::unsigned(8);
    pub const I16: Self = Self::signed(16);
    pub const U16: Self = Self::unsigned(16);
    pub const I32: Self = Self::signed(32);
    pub const U32: Self = Self::unsigned(32);
    pub const I64: Self = Self::signed(64);
    pub const U64: Self = Self::unsigned(64);
    pub const F16: Self = Self::float(16);
    pub const F32: Self = Self::float(32);
    pub const BF16: Self = Self {
        class: NumericClass::BrainFloat,
        bits: 16,
        signed: true,
    };

    pub const fn signed(bits: u32) -> Self {
        Self { class: NumericClass::Int, bits, signed: true }
    }

    pub const fn unsigned(bits: u32) -> Self {
        Self { class: NumericClass::Int, bits, signed: false }
    }

    pub const fn float(bits: u32) -> Self {
        Self { class: NumericClass::Float, bits, signed: true }
    }

    /// Complex descriptor built from its real component.
    pub const fn complex(component: Self) -> Self {
        let class = match component.class {
            NumericClass::Int | NumericClass::ComplexInt => NumericClass::ComplexInt,
            NumericClass::BrainFloat | NumericClass::ComplexBrainFloat => NumericClass::ComplexBrainFloat,
            NumericClass::Float | NumericClass::ComplexFloat => NumericClass::ComplexFloat,
        };
        Self { class, bits: component.bits * 2, signed: component.signed }
    }

    pub const fn is_complex(&self) -> bool {
        matches!(
            self.class,
            NumericClass::ComplexInt | NumericClass::ComplexFloat | NumericClass::ComplexBrainFloat
        )
    }

    pub const fn is_integer(&self) -> bool {
        matches!(self.class, NumericClass::Int | NumericClass::ComplexInt)
    }

    pub const fn is_float(&self) -> bool {
        !self.is_integer()
    }

    /// Sub-byte integers have no native width of their own.
    pub const fn is_sub_byte(&self) -> bool {
        matches!(self.class, NumericClass::Int) && self.bits < 8
    }

    /// Real component of a complex descriptor; identity for real types.
    pub const fn component(&self) -> Self {
        match self.class {
            NumericClass::ComplexInt => Self {
                class: NumericClass::Int,
                bits: self.bits / 2,
                signed: self.signed,
            },
            NumericClass::ComplexFloat => Self::float(self.bits / 2),
            NumericClass::ComplexBrainFloat => Self {
                class: NumericClass::BrainFloat,
                bits: self.bits / 2,
                signed: true,
            },
            _ => *self,
        }
    }

    /// Next wider integer representation with the same signedness.
    pub const fn next_wider(&self) -> Option<Self> {
        match self.class {
            NumericClass::Int if self.bits < 64 => Some(Self {
                class: NumericClass::Int,
                bits: self.bits * 2,
                signed: self.signed,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            NumericClass::Int => {
                write!(f, "{}{}", if self.signed { "i" } else { "u" }, self.bits)
            }
            NumericClass::ComplexInt => write!(
                f,
                "c{}{}",
                if self.signed { "i" } else { "u" },
                self.bits / 2
            ),
            NumericClass::Float => write!(f, "f{}", self.bits),
            NumericClass::BrainFloat => write!(f, "bf{}", self.bits),
            NumericClass::ComplexFloat => write!(f, "cf{}", self.bits / 2),
            NumericClass::ComplexBrainFloat => write!(f, "cbf{}", self.bits / 2),
        }
    }
}

/// Operation families. Distinct families may have different native widths
/// for the same element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationFamily {
    /// add, sub, accumulator add/sub, bitwise and/or/xor/not
    Add,
    /// mul, multiply-accumulate, variadic accumulate, sliding multiply
    Mul,
    /// elementwise max/min, lane predicates and mask select
    Compare,
    /// neg, abs, conj
    Neg,
    /// intra-vector reductions
    Reduce,
    /// even/odd filter
    Filter,
    /// zip/unzip, lane reverse
    Interleave,
}

impl OperationFamily {
    pub const ALL: [OperationFamily; 7] = [
        OperationFamily::Add,
        OperationFamily::Mul,
        OperationFamily::Compare,
        OperationFamily::Neg,
        OperationFamily::Reduce,
        OperationFamily::Filter,
        OperationFamily::Interleave,
    ];
}

/// Role of one argument to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandRole {
    Vector,
    BroadcastScalar,
    RunningAccumulator,
}

/// Signed 4-bit integer lane, stored in one byte. Range -8..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Int4(i8);

impl Int4 {
    pub const MIN: i8 = -8;
    pub const MAX: i8 = 7;
    pub const ZERO_LANE: Self = Self(0);
    pub const ONE_LANE: Self = Self(1);
    pub const ALL_ONES_LANE: Self = Self(-1);

    pub fn new(v: i8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&v).then_some(Self(v))
    }

    /// Keeps the low nibble and sign-extends it.
    pub fn wrapping(v: i8) -> Self {
        Self(((v as u8) << 4) as i8 >> 4)
    }

    pub fn get(self) -> i8 {
        self.0
    }
}

/// Unsigned 4-bit integer lane, stored in one byte. Range 0..=15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UInt4(u8);

impl UInt4 {
    pub const MAX: u8 = 15;
    pub const ZERO_LANE: Self = Self(0);
    pub const ONE_LANE: Self = Self(1);
    pub const ALL_ONES_LANE: Self = Self(0x0f);

    pub fn new(v: u8) -> Option<Self> {
        (v <= Self::MAX).then_some(Self(v))
    }

    pub fn wrapping(v: u8) -> Self {
        Self(v & 0x0f)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_display() {
        assert_eq!(ElementType::I8.to_string(), "i8");
        assert_eq!(ElementType::U16.to_string(), "u16");
        assert_eq!(ElementType::BF16.to_string(), "bf16");
        assert_eq!(ElementType::complex(ElementType::I16).to_string(), "ci16");
        assert_eq!(ElementType::complex(ElementType::F32).to_string(), "cf32");
    }

    #[test]
    fn test_complex_component_round_trip() {
        let c = ElementType::complex(ElementType::I32);
        assert!(c.is_complex());
        assert_eq!(c.bits, 64);
        assert_eq!(c.component(), ElementType::I32);
        assert_eq!(ElementType::complex(ElementType::F32).component(), ElementType::F32);
    }

    #[test]
    fn test_complex_half_components_stay_distinct() {
        let cbf = ElementType::complex(ElementType::BF16);
        let cf = ElementType::complex(ElementType::F16);
        assert_ne!(cbf, cf);
        assert!(cbf.is_complex() && cbf.is_float());
        assert_eq!(cbf.component(), ElementType::BF16);
        assert_eq!(cf.component(), ElementType::F16);
        assert_eq!(cbf.to_string(), "cbf16");
        assert_eq!(cf.to_string(), "cf16");
    }

    #[test]
    fn test_next_wider_preserves_signedness() {
        assert_eq!(ElementType::I4.next_wider(), Some(ElementType::I8));
        assert_eq!(ElementType::U8.next_wider(), Some(ElementType::U16));
        assert_eq!(ElementType::I64.next_wider(), None);
        assert_eq!(ElementType::F32.next_wider(), None);
        assert!(ElementType::U4.is_sub_byte());
        assert!(!ElementType::I8.is_sub_byte());
    }

    #[test]
    fn test_int4_wrapping() {
        assert_eq!(Int4::wrapping(7).get(), 7);
        assert_eq!(Int4::wrapping(8).get(), -8);
        assert_eq!(Int4::wrapping(-9).get(), 7);
        assert_eq!(Int4::new(8), None);
        assert_eq!(UInt4::wrapping(17).get(), 1);
        assert_eq!(UInt4::new(16), None);
    }
}
