mod meta;
mod port;

pub use meta::DeviceMeta;
pub use port::{PoeDetection, PoeStatus, Port, PortStatus};
