//! Rule sets for the bundled games.
//!
//! - `flip`: two-sided bracket capture
//! - `gems`: match-three swaps with cascades
//! - `ink`: flood recoloring from the top-left corner
//! - `pusher`: token pushing onto goals

pub mod flip;
pub mod gems;
pub mod ink;
pub mod pusher;
