//! Starfield viewer application: the fixed-timestep loop, the session that
//! ties universe, camera, selection, and collaborators together, and the
//! headless driver.

pub mod game_loop;
pub mod headless;
pub mod session;

pub use game_loop::{FIXED_DT, GameLoop, MAX_FRAME_TIME};
pub use headless::{
    HeadlessSummary, LogOverlay, click_nearest_star, nearest_visible_star, run_headless,
};
pub use session::{SessionStats, StarfieldSession};
