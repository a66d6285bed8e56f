//! Meeting lifecycle classification and calendar overlap layout.
//!
//! This crate is the pure core of the meetgrid dashboard:
//! - `time`: tolerant parsing of date/time strings into wall-clock instants
//! - `meeting` / `projection`: the viewer-relative `Meeting` snapshot type
//!   and its construction from provider records
//! - `lifecycle`: the five tab predicates and `classify`
//! - `overlap`: grouping of same-day meetings into overlap clusters
//! - `layout`: equal-width column assignment and grid geometry
//!
//! Nothing here performs I/O except `config`. Classification and layout
//! are synchronous functions of a snapshot and the current instant; callers
//! re-run them when either changes.

pub mod config;
pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod meeting;
pub mod overlap;
pub mod projection;
pub mod time;

pub use error::{MeetgridError, MeetgridResult};
pub use layout::{layout_calendar, layout_day, DayLayout, GridScale, HourRange, LayoutBlock};
pub use lifecycle::{classify, primary_category, Category, CategoryCounts, Classification};
pub use meeting::Meeting;
pub use overlap::{group_overlaps, MinuteSpan, OverlapCluster};
pub use projection::{project_for_viewer, RawAttendee, RawMeeting};
pub use time::{parse_date_time, Clock, FixedClock, SystemClock};
