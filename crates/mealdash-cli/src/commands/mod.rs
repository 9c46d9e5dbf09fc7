pub mod catalog;
pub mod dashboard;
pub mod session;
pub mod theme;
