pub mod casino;
pub mod fixed;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

mod session;

pub use session::{RevealOutcome, Session};
