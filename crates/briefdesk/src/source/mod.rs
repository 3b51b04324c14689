//! Data-source backends composed into the application.

mod mock;

pub use mock::MockSource;
