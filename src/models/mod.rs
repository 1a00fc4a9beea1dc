pub mod paragraph;
pub mod roster;
pub mod span;
pub mod transcript;

pub use paragraph::*;
pub use roster::*;
pub use span::*;
pub use transcript::*;
