pub mod fitness;
pub mod turtle;

pub use fitness::FitnessReport;
pub use turtle::{interpret, Turtle, TurtleConfig};
