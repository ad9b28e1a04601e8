use crate::engine::adapter::unpack_lanes;
use crate::engine::Engine;
use crate::error::EngineResult;
use crate::primitives::{Primitives, ReduceOp};
use crate::traits::Element;
use crate::types::OperationFamily;
use crate::vector::LogicalVector;

impl<P: Primitives> Engine<P> {
    /// Tree reduction over all lanes; lane `i` pairs with lane `i + L/2`,
    /// then `i + L/4`, down to 1.
    pub fn reduce<T: Element>(&self, op: ReduceOp, v: &LogicalVector<T>) -> EngineResult<T> {
        let res = self.resolve(OperationFamily::Reduce, T::DESCRIPTOR)?;
        if res.unpack {
            let unpacked = unpack_lanes(v.as_slice());
            return self.reduce_lanes(res.width, op, &unpacked).map(T::pack);
        }
        self.reduce_lanes(res.width, op, v.as_slice())
    }

    pub fn reduce_add<T: Element>(&self, v: &LogicalVector<T>) -> EngineResult<T> {
        self.reduce(ReduceOp::Add, v)
    }

    pub fn reduce_mul<T: Element>(&self, v: &LogicalVector<T>) -> EngineResult<T> {
        self.reduce(ReduceOp::Mul, v)
    }

    pub fn reduce_max<T: Element>(&self, v: &LogicalVector<T>) -> EngineResult<T> {
        self.reduce(ReduceOp::Max, v)
    }

    pub fn reduce_min<T: Element>(&self, v: &LogicalVector<T>) -> EngineResult<T> {
        self.reduce(ReduceOp::Min, v)
    }
}
