//! Domain models for SIGRA reports.
//!
//! This module contains the typed records extracted from each report, the
//! value types they are built from (credits, prerequisites, periods, class
//! meetings), and configuration.

mod config;
pub use config::{Config, ConfigError};

/// Credit load of a course.
pub mod credits;
pub use credits::CreditBreakdown;

/// Prerequisite expressions and their parser.
pub mod prerequisites;
pub use prerequisites::PrerequisiteExpression;

pub mod schedule;
pub use schedule::{ClassMeeting, ClassSchedule, Shift, TimeSlot, Weekday};

mod section;
pub use section::Section;

mod course;
pub use course::{CatalogCourse, OfferedCourse};

mod flow;
pub use flow::{FlowCourse, FlowPeriod};

/// Academic terms.
pub mod period;
pub use period::Period;

pub mod student;
pub use student::{ClassKey, Contact, DegreeTrack, Grade, GradeEntry, Student};

mod statistics;
pub use statistics::SexCount;
