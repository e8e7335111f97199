// tests/support/mocks/mod.rs
pub mod store;
pub mod time;

pub use store::UnavailableStore;
pub use time::{FixedClock, SteppingClock, fixed_now};
