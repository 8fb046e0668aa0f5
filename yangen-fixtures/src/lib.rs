//! # Yangen Fixtures
//!
//! Types generated at build time from a fixture schema. The tests below
//! check the runtime behaviour of the generated code.

mod generated {
    include!(concat!(env!("OUT_DIR"), "/generated.rs"));
}

pub use generated::*;
