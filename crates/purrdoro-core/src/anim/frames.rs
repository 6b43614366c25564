//! Pixel frame tables for the companion sprite.
//!
//! Frames are 15x9 grids of pixel codes. The renderer maps codes to colors
//! per companion; the core only hands out grids. Left-facing sprites are a
//! mirrored table lookup, not a semantic state.
//!
//! Pixel codes: 0 = transparent, 1 = fur, 2 = stripe, 4 = eye, 5 = nose.

use super::driver::{Direction, SpeedState};

pub const FRAME_WIDTH: usize = 15;
pub const FRAME_HEIGHT: usize = 9;

pub type FrameGrid = [[u8; FRAME_WIDTH]; FRAME_HEIGHT];

/// Run cycle, head left, tail right, drawn facing right.
const RUN_FRAMES: [FrameGrid; 4] = [
    // Front legs extended, hind legs pushing off.
    [
        [0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0],
        [0, 1, 4, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
        [0, 0, 1, 5, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
    ],
    // Legs gathered under the body.
    [
        [0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
        [0, 1, 4, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [0, 0, 1, 5, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
    ],
    // Airborne.
    [
        [0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        [0, 1, 4, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
        [0, 0, 1, 5, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
        [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 1, 1, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
    ],
    // Hind legs extended, front legs tucked.
    [
        [0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0],
        [0, 1, 4, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [0, 0, 1, 5, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0],
    ],
];

/// Sitting pose with a slow tail flick, shown while Stopped.
const SIT_FRAMES: [FrameGrid; 2] = [
    // Tail raised.
    [
        [0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 4, 1, 4, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 5, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
        [0, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0, 0],
    ],
    // Tail resting.
    [
        [0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 4, 1, 4, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 5, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0, 0],
    ],
];

/// Number of frames in the cycle for a speed state.
pub fn frame_count(speed: SpeedState) -> usize {
    frame_set(speed).len()
}

/// Look up a frame grid. Returns `None` for an out-of-range index so a
/// missing frame degrades to "no visible frame" rather than a panic.
pub fn frame(speed: SpeedState, direction: Direction, index: usize) -> Option<FrameGrid> {
    let grid = frame_set(speed).get(index)?;
    Some(match direction {
        Direction::Right => *grid,
        Direction::Left => mirror(grid),
    })
}

fn frame_set(speed: SpeedState) -> &'static [FrameGrid] {
    match speed {
        SpeedState::Stopped => &SIT_FRAMES,
        _ => &RUN_FRAMES,
    }
}

fn mirror(grid: &FrameGrid) -> FrameGrid {
    let mut out = *grid;
    for row in &mut out {
        row.reverse();
    }
    out
}
