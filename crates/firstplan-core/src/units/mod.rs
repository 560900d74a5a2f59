//! Time, distance, and pace quantities.

mod distance;
mod pace;
mod time;

pub use distance::{Distance, LengthUnit};
pub(crate) use distance::format_magnitude;
pub use pace::Pace;
pub use time::{Time, TimeUnit};
