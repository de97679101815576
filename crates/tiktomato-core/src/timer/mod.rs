mod clock;
mod mode;

pub use clock::CountdownClock;
pub use mode::{Mode, ModeDurations, ModeManager};
