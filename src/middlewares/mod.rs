pub mod authmw;
pub mod method_override;
pub mod visitor;
