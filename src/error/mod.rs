mod types;

pub use types::{Result, SwitcherError};
