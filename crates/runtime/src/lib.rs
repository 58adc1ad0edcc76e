pub mod clock;
pub mod frame;
pub mod frame_loop;
pub mod metrics;
pub mod readout;
pub mod scroll;

pub use clock::*;
pub use frame::*;
pub use frame_loop::*;
pub use metrics::*;
pub use readout::*;
pub use scroll::*;
