//! Thread coordination helpers

pub mod latch;

pub use latch::{await_latch, CountDownLatch, WaitOutcome};
