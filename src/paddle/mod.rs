pub mod classifier;
pub mod press;
pub mod registry;

pub use classifier::{TimingConfig, TimingInfo};
pub use press::{InputSource, Paddle, PaddleListener, PressResult, TimingBar, TimingZone};
pub use registry::{PaddleError, PaddleRegistry};
