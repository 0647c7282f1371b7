//! Milestone - split an XML document by milestone element.
//!
//! Documents with more than one hierarchy, such as a TEI book encoded by
//! chapter (`<div>`) with page breaks (`<pb/>`) scattered through it, can be
//! split at the milestones. Each part reopens the elements that enclose its
//! milestone (marked `continued="true"`) and closes whatever is still open
//! where the next milestone sits, so every part is well-formed on its own.
//!
//! # Example
//!
//! ```
//! use milestone::{split_text, SplitOptions};
//!
//! let xml = r#"<div><p>one<pb n="1"/>two</p><p>three<pb n="2"/>four</p></div>"#;
//! let options = SplitOptions::default().with_name_attribute("n");
//! let parts = split_text(xml, &options).unwrap();
//!
//! assert_eq!(
//!     parts.combined("1").unwrap(),
//!     "<div continued=\"true\"><p continued=\"true\">two</p><p>three\n</p></div>"
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, options and name validation
//! - [`error`]: Error types and Result alias
//! - [`types`]: Ancestor chains and segments
//! - [`xml`]: XML utilities
//! - [`splitting`]: Tree pass, raw text pass and reassembly
//! - [`output`]: Writing segment files
//! - [`splitter`]: Multi-file splitter service
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod splitter;
pub mod splitting;
pub mod types;
pub mod xml;

pub use config::{OutputMode, SplitOptions};
pub use error::{MilestoneError, Result};
pub use splitter::{FileOutcome, Splitter};
pub use splitting::{split_text, SegmentMap};
pub use types::{Ancestor, AncestorChain, Segment};
