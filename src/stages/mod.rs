pub mod assemble;
pub mod stage0_sections;
pub mod stage1_roster;
pub mod stage2_extract;
pub mod stage3_structure;
pub mod stage4_metadata;

pub use assemble::*;
pub use stage0_sections::*;
pub use stage1_roster::*;
pub use stage2_extract::*;
pub use stage3_structure::*;
pub use stage4_metadata::*;
