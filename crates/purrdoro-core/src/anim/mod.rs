mod driver;
mod frames;

pub use driver::{AnimationDriver, CadenceTick, Direction, SpeedState};
pub use frames::{frame, frame_count, FrameGrid, FRAME_HEIGHT, FRAME_WIDTH};
