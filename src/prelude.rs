//! Commonly used types and functions for ease of import.

pub use crate::{
    evaluate_containment, evaluate_flood, BarrierMask, CornerClosure, FloodEngine, FloodResult,
    Grid, Layout, Session, SessionStatus,
};

#[cfg(feature = "std")]
pub use crate::init_logging;
