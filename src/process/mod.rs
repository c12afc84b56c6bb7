// src/process/mod.rs
pub mod coerce;
pub mod format;

pub use coerce::to_number;
pub use format::{fmt_num, fmt_pct, Formatter, DEFAULT_DIGITS};
