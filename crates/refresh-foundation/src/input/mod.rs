//! Motion events as delivered by the host toolkit.

mod types;

pub use types::*;
