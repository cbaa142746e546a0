//! Download system for thumbgrab

pub mod batch;

pub use batch::*;
