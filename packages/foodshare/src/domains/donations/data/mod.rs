pub mod seed;

pub use seed::mock_donations;
