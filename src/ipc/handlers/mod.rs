pub mod catalog;
pub mod classes;
pub mod core;
pub mod export;
pub mod planner;
