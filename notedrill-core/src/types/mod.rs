// notedrill-core/src/types/mod.rs

pub mod duration;
pub mod letter;
pub mod pitch;
pub mod range;
pub mod trial;

pub use duration::NoteDuration;
pub use letter::Letter;
pub use pitch::Pitch;
pub use range::{OctaveRange, DEFAULT_GROUP_RANGE, DEFAULT_MAX_COUNT, FULL_GROUP_RANGE};
pub use trial::TrialSpec;
