pub mod automation;
pub mod constants;
pub mod cue;
pub mod error;
pub mod latch;
pub mod layers;
pub mod motion;
pub mod noise;
pub mod playback;
pub mod scanner;
pub mod trigger;

pub use automation::*;
pub use cue::*;
pub use error::AudioError;
pub use latch::*;
pub use layers::*;
pub use motion::*;
pub use playback::*;
pub use scanner::*;
pub use trigger::*;
