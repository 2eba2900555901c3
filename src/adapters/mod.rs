// Adapters layer: concrete implementations of the domain ports and the protoc wire format.

pub mod go_oracle;
pub mod protoc;
pub mod storage;

pub use go_oracle::GoMethodOracle;
pub use storage::LocalSourceTree;
