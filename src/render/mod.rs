pub mod charts;
pub mod error;
pub mod theme;
