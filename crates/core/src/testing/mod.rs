//! Test doubles shared between unit and integration tests.

mod mock_converter;

pub use mock_converter::MockConverter;
