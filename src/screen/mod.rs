mod core;

pub use self::core::{Screen, ScreenRef, Transition, View};
