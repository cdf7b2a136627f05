pub mod clock;
pub mod token;
pub mod queue;
pub mod estimate;
pub mod registry;
pub mod report;

pub use clock::*;
pub use token::*;
pub use queue::*;
pub use estimate::*;
pub use registry::*;
