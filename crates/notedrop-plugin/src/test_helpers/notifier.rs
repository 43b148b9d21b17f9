//! Notifier that records every notice.

use std::sync::Mutex;

use notedrop_core::{Notice, NoticeKind, Notifier};

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn transient_texts(&self) -> Vec<String> {
        self.texts_of(NoticeKind::Transient)
    }

    pub fn sticky_texts(&self) -> Vec<String> {
        self.texts_of(NoticeKind::Sticky)
    }

    fn texts_of(&self, kind: NoticeKind) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.text.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
