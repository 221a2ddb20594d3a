//! Embassy async tasks

pub mod proximity;

pub use proximity::proximity_task;
