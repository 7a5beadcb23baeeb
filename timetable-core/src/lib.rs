//! Core types for the timetable.
//!
//! This crate holds everything the front end builds on:
//! - `ClassRecord`, the scheduled class
//! - `store` for persisting the class list to a local key-value slot
//! - `manager::ClassManager`, the observable owner of the class list
//! - `day_filter` for per-day buckets and window counts
//! - `reminder` for the notification gateway and the pending reminder queue

pub mod class_record;
pub mod constants;
pub mod day_filter;
pub mod error;
pub mod manager;
pub mod reminder;
pub mod seed;
pub mod store;
pub mod timetable;
pub mod timetable_config;

pub use class_record::ClassRecord;
pub use error::{TimetableError, TimetableResult};
