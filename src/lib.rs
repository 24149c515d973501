#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod barrier;
pub mod bitgrid;
mod common;
mod config;
pub mod connectivity;
mod flood;
mod grid;
pub mod layout;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
mod score;
mod session;

pub use barrier::BarrierMask;
pub use bitgrid::{BitGrid, CellMask, MaskError};
pub use common::*;
pub use config::*;
pub use connectivity::{
    apply_corner_closure, compute_blocked_mask, detect_containment, detect_containment_with,
    newly_enclosed, reachable_from_boundary, Containment, CornerClosure,
};
pub use flood::*;
pub use grid::*;
pub use layout::{render, Layout};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use score::*;
pub use session::*;
