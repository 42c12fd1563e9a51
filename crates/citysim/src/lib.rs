//! Top-level facade crate for citysim.
//!
//! Re-exports the calculator core and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use citysim_core::*;
}

pub mod gateway {
    pub use citysim_gateway::*;
}
