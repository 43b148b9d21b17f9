//! Test helpers for pipeline and handler tests
//!
//! This module provides scripted host surfaces (editor, notifier), storage
//! fixtures, and file fixtures for isolated testing without any host or
//! network.

pub mod editor;
pub mod fixtures;
pub mod notifier;

pub use editor::ScriptedEditor;
pub use fixtures::*;
pub use notifier::RecordingNotifier;
