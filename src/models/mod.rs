pub mod enums;
pub mod submission;
pub mod triage;

pub use enums::*;
pub use submission::*;
pub use triage::*;
