//! Top-level facade crate for tribridge.
//!
//! Re-exports the protocol core and the runtime so users can depend on a single crate.

pub mod core {
    pub use tribridge_core::*;
}

pub mod runtime {
    pub use tribridge_runtime::*;
}
