//! slate-domains - The record shapes stored by slate.
//!
//! Each module defines one [`Fields`](slate_core::Fields) implementation
//! together with its patch type, search filter and derived views.

pub mod attendance;
pub mod blog;
pub mod contact;

pub use attendance::{
    AttendanceEntry, AttendanceFilter, AttendancePatch, AttendanceStats, AttendanceStatus,
    ParseStatusError,
};
pub use blog::{BlogFilter, BlogPatch, BlogPost, parse_tags};
pub use contact::{Contact, ContactFilter, ContactPatch};
