//! Remote metadata fetching for thumbgrab

pub mod client;

pub use client::*;
