//! Scripted editor surface that records insertions.

use std::sync::Mutex;

use notedrop_core::{EditorSurface, Position};

/// Editor whose cursor and active path are fixed up front and whose
/// insertions are recorded for assertions.
pub struct ScriptedEditor {
    cursor: Position,
    active_path: Option<String>,
    insertions: Mutex<Vec<(Position, String)>>,
}

impl ScriptedEditor {
    pub fn new(active_path: Option<&str>) -> Self {
        ScriptedEditor {
            cursor: Position::new(0, 0),
            active_path: active_path.map(String::from),
            insertions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_cursor(mut self, cursor: Position) -> Self {
        self.cursor = cursor;
        self
    }

    /// Recorded insertions, in call order.
    pub fn insertions(&self) -> Vec<(Position, String)> {
        self.insertions.lock().unwrap().clone()
    }
}

impl EditorSurface for ScriptedEditor {
    fn cursor(&self) -> Position {
        self.cursor
    }

    fn replace_range(&self, text: &str, at: Position) {
        self.insertions.lock().unwrap().push((at, text.to_string()));
    }

    fn active_file_path(&self) -> Option<String> {
        self.active_path.clone()
    }
}
