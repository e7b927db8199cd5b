#![warn(missing_docs)]
//! Autoclose Core - Headless Closing-Tag Completion Engine
//!
//! # Overview
//!
//! `autoclose-core` completes closing tags for markup documents. When the user types `</`
//! right after an open element, the engine walks backward from the caret, finds the nearest
//! opening tag that has no matching closer, and inserts `name>`.
//!
//! The crate does not parse markup itself. Deciding which tags inside a chunk of text are
//! balanced is delegated to a [`MarkupClassifier`] (see `autoclose-markup` for the default
//! implementation); the host editor is reached through the [`TextBuffer`] trait.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Session (AutoCloser, close_tags)           │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Cursor Gate + Drift Tracking               │  ← Multi-cursor ordering
//! ├─────────────────────────────────────────────┤
//! │  Backward Tag Resolver (state machine)      │  ← Window growth
//! ├─────────────────────────────────────────────┤
//! │  Markup Classifier (trait)  │  Tag Closer   │  ← Collaborators
//! ├─────────────────────────────────────────────┤
//! │  Text Buffer (trait) / RopeBuffer           │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use autoclose_core::{
//!     AutoCloseSettings, Classification, MarkupClassifier, Position, RopeBuffer, TagRecord,
//!     close_tags,
//! };
//!
//! // A toy classifier that reports every opening tag as unclosed.
//! struct EveryOpenTag;
//!
//! impl MarkupClassifier for EveryOpenTag {
//!     fn classify(&mut self, text: &str) -> Classification {
//!         let records: Vec<TagRecord> = text
//!             .match_indices("<div>")
//!             .map(|(offset, code)| TagRecord::new(code, text[..offset].chars().count()))
//!             .collect();
//!         Classification::from_records(records)
//!     }
//! }
//!
//! let mut buffer = RopeBuffer::new("<div>\n  </");
//! let insertions = close_tags(
//!     &mut buffer,
//!     &[Position::new(1, 4)],
//!     &mut EveryOpenTag,
//!     &AutoCloseSettings::default(),
//! );
//!
//! assert_eq!(insertions.len(), 1);
//! assert_eq!(buffer.get_text(), "<div>\n  </div>");
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - Host buffer trait and the rope-backed reference buffer
//! - [`classifier`] - Markup balance classifier interface
//! - [`closer`] - Opening tag to closing tag transform
//! - [`gate`] - Cursor eligibility and ordering
//! - [`position`] - Buffer coordinates and scan windows
//! - [`resolver`] - Backward, batch-growing unclosed tag search
//! - [`session`] - Multi-cursor completion with coordinate drift tracking
//! - [`settings`] - User-configurable behavior

pub mod buffer;
pub mod classifier;
pub mod closer;
pub mod gate;
pub mod position;
pub mod resolver;
pub mod session;
pub mod settings;

pub use buffer::{RopeBuffer, TextBuffer};
pub use classifier::{Classification, MarkupClassifier, TagRecord};
pub use closer::closing_tag;
pub use gate::{TRIGGER, eligible_cursors, follows_trigger};
pub use position::{Position, ScanWindow};
pub use resolver::{Resolution, ResolveStep, TagResolver, resolve};
pub use session::{AutoCloser, DriftTracker, Insertion, close_tags};
pub use settings::{AutoCloseSettings, DEFAULT_BATCH_SIZE, SettingsError};
