use std::fmt::Debug;

use half::{bf16, f16};

use crate::types::{ElementType, Int4, UInt4};

/// Lane element trait for every vector the engine tiles.
///
/// Integer arithmetic wraps: saturation and rounding are ambient hardware
/// modes the engine never models.
pub trait Element:
    Debug + Clone + Copy + PartialEq + PartialOrd + Send + Sync + Default + 'static
{
    /// Accumulator lane type produced by multiply-accumulate.
    type Acc: Element;
    /// Byte-or-wider form the engine computes in. Identity except for
    /// sub-byte lanes.
    type Unpacked: Element<Acc = Self::Acc>;

    const DESCRIPTOR: ElementType;
    const ZERO: Self;
    const ONE: Self;

    /// Nonzero poison used to prove filler lanes are never observed.
    fn scribble() -> Self;

    fn elem_add(self, other: Self) -> Self;
    fn elem_sub(self, other: Self) -> Self;
    fn elem_mul(self, other: Self) -> Self;
    fn neg(self) -> Self;
    fn abs(self) -> Self;
    fn max(self, other: Self) -> Self;
    fn min(self, other: Self) -> Self;

    fn to_acc(self) -> Self::Acc;
    /// Plain truncating conversion out of the accumulator domain.
    fn from_acc(acc: Self::Acc) -> Self;

    fn unpack(self) -> Self::Unpacked;
    fn pack(v: Self::Unpacked) -> Self;
}

/// Promotion to the next wider integer representation, value-preserving.
pub trait Widen: Element {
    type Wider: Element;

    fn widen(self) -> Self::Wider;
}

/// Integer lanes with bitwise operations. Float lanes have none.
pub trait Bitwise: Element {
    /// Every bit of the lane set; `x ^ ALL_ONES` is the complement.
    const ALL_ONES: Self;

    fn bit_and(self, other: Self) -> Self;
    fn bit_or(self, other: Self) -> Self;
    fn bit_xor(self, other: Self) -> Self;
}

macro_rules! impl_bitwise {
    ($($t:ty),* $(,)?) => {
        $(
            impl Bitwise for $t {
                const ALL_ONES: Self = !0;
                #[inline(always)] fn bit_and(self, other: Self) -> Self { self & other }
                #[inline(always)] fn bit_or(self, other: Self) -> Self { self | other }
                #[inline(always)] fn bit_xor(self, other: Self) -> Self { self ^ other }
            }
        )*
    };
}

impl_bitwise!(i8, u8, i16, u16, i32, u32, i64, u64);

// Sign-extended storage is closed under and/or/xor.
impl Bitwise for Int4 {
    const ALL_ONES: Self = Int4::ALL_ONES_LANE;
    #[inline(always)] fn bit_and(self, other: Self) -> Self { Int4::wrapping(self.get() & other.get()) }
    #[inline(always)] fn bit_or(self, other: Self) -> Self { Int4::wrapping(self.get() | other.get()) }
    #[inline(always)] fn bit_xor(self, other: Self) -> Self { Int4::wrapping(self.get() ^ other.get()) }
}

impl Bitwise for UInt4 {
    const ALL_ONES: Self = UInt4::ALL_ONES_LANE;
    #[inline(always)] fn bit_and(self, other: Self) -> Self { UInt4::wrapping(self.get() & other.get()) }
    #[inline(always)] fn bit_or(self, other: Self) -> Self { UInt4::wrapping(self.get() | other.get()) }
    #[inline(always)] fn bit_xor(self, other: Self) -> Self { UInt4::wrapping(self.get() ^ other.get()) }
}

macro_rules! impl_int_element {
    ($t:ty, $acc:ty, $desc:expr, $scribble:expr, abs: $abs:expr, neg: $neg:expr) => {
        impl Element for $t {
            type Acc = $acc;
            type Unpacked = $t;

            const DESCRIPTOR: ElementType = $desc;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline(always)] fn scribble() -> Self { $scribble }

            #[inline(always)] fn elem_add(self, other: Self) -> Self { self.wrapping_add(other) }
            #[inline(always)] fn elem_sub(self, other: Self) -> Self { self.wrapping_sub(other) }
            #[inline(always)] fn elem_mul(self, other: Self) -> Self { self.wrapping_mul(other) }
            #[inline(always)] fn neg(self) -> Self { ($neg)(self) }
            #[inline(always)] fn abs(self) -> Self { ($abs)(self) }
            #[inline(always)] fn max(self, other: Self) -> Self { Ord::max(self, other) }
            #[inline(always)] fn min(self, other: Self) -> Self { Ord::min(self, other) }

            #[inline(always)] fn to_acc(self) -> $acc { self as $acc }
            #[inline(always)] fn from_acc(acc: $acc) -> Self { acc as $t }

            #[inline(always)] fn unpack(self) -> Self { self }
            #[inline(always)] fn pack(v: Self) -> Self { v }
        }
    };
}

impl_int_element!(i8, i32, ElementType::I8, 0x5a, abs: |v: i8| v.wrapping_abs(), neg: |v: i8| v.wrapping_neg());
impl_int_element!(u8, i32, ElementType::U8, 0xa5, abs: |v: u8| v, neg: |v: u8| v.wrapping_neg());
impl_int_element!(i16, i32, ElementType::I16, 0x5a5a, abs: |v: i16| v.wrapping_abs(), neg: |v: i16| v.wrapping_neg());
impl_int_element!(u16, i64, ElementType::U16, 0xa5a5, abs: |v: u16| v, neg: |v: u16| v.wrapping_neg());
impl_int_element!(i32, i64, ElementType::I32, 0x5a5a_5a5a, abs: |v: i32| v.wrapping_abs(), neg: |v: i32| v.wrapping_neg());
impl_int_element!(u32, i64, ElementType::U32, 0xa5a5_a5a5, abs: |v: u32| v, neg: |v: u32| v.wrapping_neg());
impl_int_element!(i64, i64, ElementType::I64, 0x5a5a_5a5a_5a5a_5a5a, abs: |v: i64| v.wrapping_abs(), neg: |v: i64| v.wrapping_neg());
impl_int_element!(u64, u64, ElementType::U64, 0xa5a5_a5a5_a5a5_a5a5, abs: |v: u64| v, neg: |v: u64| v.wrapping_neg());

impl Element for f32 {
    type Acc = f32;
    type Unpacked = f32;

    const DESCRIPTOR: ElementType = ElementType::F32;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline(always)] fn scribble() -> Self { f32::NAN }

    #[inline(always)] fn elem_add(self, other: Self) -> Self { self + other }
    #[inline(always)] fn elem_sub(self, other: Self) -> Self { self - other }
    #[inline(always)] fn elem_mul(self, other: Self) -> Self { self * other }
    #[inline(always)] fn neg(self) -> Self { -self }
    #[inline(always)] fn abs(self) -> Self { f32::abs(self) }
    #[inline(always)] fn max(self, other: Self) -> Self { f32::max(self, other) }
    #[inline(always)] fn min(self, other: Self) -> Self { f32::min(self, other) }

    #[inline(always)] fn to_acc(self) -> f32 { self }
    #[inline(always)] fn from_acc(acc: f32) -> Self { acc }

    #[inline(always)] fn unpack(self) -> Self { self }
    #[inline(always)] fn pack(v: Self) -> Self { v }
}

macro_rules! impl_half_element {
    ($t:ident, $desc:expr) => {
        impl Element for $t {
            type Acc = f32;
            type Unpacked = $t;

            const DESCRIPTOR: ElementType = $desc;
            const ZERO: Self = $t::ZERO;
            const ONE: Self = $t::ONE;

            #[inline(always)] fn scribble() -> Self { $t::NAN }

            #[inline(always)] fn elem_add(self, other: Self) -> Self { $t::from_f32(self.to_f32() + other.to_f32()) }
            #[inline(always)] fn elem_sub(self, other: Self) -> Self { $t::from_f32(self.to_f32() - other.to_f32()) }
            #[inline(always)] fn elem_mul(self, other: Self) -> Self { $t::from_f32(self.to_f32() * other.to_f32()) }
            #[inline(always)] fn neg(self) -> Self { -self }
            #[inline(always)] fn abs(self) -> Self { $t::from_f32(self.to_f32().abs()) }
            #[inline(always)] fn max(self, other: Self) -> Self { if self.to_f32() >= other.to_f32() { self } else { other } }
            #[inline(always)] fn min(self, other: Self) -> Self { if self.to_f32() <= other.to_f32() { self } else { other } }

            #[inline(always)] fn to_acc(self) -> f32 { self.to_f32() }
            #[inline(always)] fn from_acc(acc: f32) -> Self { $t::from_f32(acc) }

            #[inline(always)] fn unpack(self) -> Self { self }
            #[inline(always)] fn pack(v: Self) -> Self { v }
        }
    };
}

impl_half_element!(bf16, ElementType::BF16);
impl_half_element!(f16, ElementType::F16);

impl Element for Int4 {
    type Acc = i32;
    type Unpacked = i8;

    const DESCRIPTOR: ElementType = ElementType::I4;
    const ZERO: Self = Int4::ZERO_LANE;
    const ONE: Self = Int4::ONE_LANE;

    #[inline(always)] fn scribble() -> Self { Int4::wrapping(-3) }

    #[inline(always)] fn elem_add(self, other: Self) -> Self { Int4::wrapping(self.get().wrapping_add(other.get())) }
    #[inline(always)] fn elem_sub(self, other: Self) -> Self { Int4::wrapping(self.get().wrapping_sub(other.get())) }
    #[inline(always)] fn elem_mul(self, other: Self) -> Self { Int4::wrapping(self.get().wrapping_mul(other.get())) }
    #[inline(always)] fn neg(self) -> Self { Int4::wrapping(self.get().wrapping_neg()) }
    #[inline(always)] fn abs(self) -> Self { Int4::wrapping(self.get().wrapping_abs()) }
    #[inline(always)] fn max(self, other: Self) -> Self { Ord::max(self, other) }
    #[inline(always)] fn min(self, other: Self) -> Self { Ord::min(self, other) }

    #[inline(always)] fn to_acc(self) -> i32 { self.get() as i32 }
    #[inline(always)] fn from_acc(acc: i32) -> Self { Int4::wrapping(acc as i8) }

    #[inline(always)] fn unpack(self) -> i8 { self.get() }
    #[inline(always)] fn pack(v: i8) -> Self { Int4::wrapping(v) }
}

impl Element for UInt4 {
    type Acc = i32;
    type Unpacked = u8;

    const DESCRIPTOR: ElementType = ElementType::U4;
    const ZERO: Self = UInt4::ZERO_LANE;
    const ONE: Self = UInt4::ONE_LANE;

    #[inline(always)] fn scribble() -> Self { UInt4::wrapping(0x0d) }

    #[inline(always)] fn elem_add(self, other: Self) -> Self { UInt4::wrapping(self.get().wrapping_add(other.get())) }
    #[inline(always)] fn elem_sub(self, other: Self) -> Self { UInt4::wrapping(self.get().wrapping_sub(other.get())) }
    #[inline(always)] fn elem_mul(self, other: Self) -> Self { UInt4::wrapping(self.get().wrapping_mul(other.get())) }
    #[inline(always)] fn neg(self) -> Self { UInt4::wrapping(self.get().wrapping_neg()) }
    #[inline(always)] fn abs(self) -> Self { self }
    #[inline(always)] fn max(self, other: Self) -> Self { Ord::max(self, other) }
    #[inline(always)] fn min(self, other: Self) -> Self { Ord::min(self, other) }

    #[inline(always)] fn to_acc(self) -> i32 { self.get() as i32 }
    #[inline(always)] fn from_acc(acc: i32) -> Self { UInt4::wrapping(acc as u8) }

    #[inline(always)] fn unpack(self) -> u8 { self.get() }
    #[inline(always)] fn pack(v: u8) -> Self { UInt4::wrapping(v) }
}

macro_rules! impl_widen {
    ($($narrow:ty => $wide:ty),* $(,)?) => {
        $(
            impl Widen for $narrow {
                type Wider = $wide;
                #[inline(always)] fn widen(self) -> $wide { self as $wide }
            }
        )*
    };
}

impl_widen!(i8 => i16, u8 => u16, i16 => i32, u16 => u32, i32 => i64, u32 => u64);

impl Widen for Int4 {
    type Wider = i8;
    #[inline(always)] fn widen(self) -> i8 { self.get() }
}

impl Widen for UInt4 {
    type Wider = u8;
    #[inline(always)] fn widen(self) -> u8 { self.get() }
}
