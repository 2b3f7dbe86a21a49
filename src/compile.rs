pub(crate) mod plan;

pub use plan::{
    DrawOp, DrawStyle, FontWeight, OpRole, SealPlan, Shadow, StrokeStyle, compile_seal,
    global_transform,
};
