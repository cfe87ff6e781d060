#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Distribution classification and selection for spout
//!
//! Given the artifacts of one release this crate:
//! - parses wheel filenames into their compatibility tags
//! - builds an enumerated catalog with display sizes
//! - narrows the catalog by type and tag pattern to a single target,
//!   or reports that the user has to choose

pub mod catalog;
pub mod select;
pub mod tags;

pub use catalog::{classify, CandidateEntry, Catalog, HumanSize, SizeUnit};
pub use select::{select, Selection, SelectionOutcome, SelectionRequest, SelectionWarning};
pub use tags::{parse_wheel_filename, TagField, TagPattern, WheelTags};
