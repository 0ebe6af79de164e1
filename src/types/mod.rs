pub mod columns;
pub mod views;
