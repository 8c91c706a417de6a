use serde::Serialize;

/// Local shadow copy of one generated field.
///
/// While `is_editing` is false the buffer mirrors the committed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBuffer {
    pub live_text: String,
    pub is_editing: bool,
}

impl EditBuffer {
    /// Follow rule: overwrite from `committed` unless frozen by an edit.
    pub(crate) fn follow(&mut self, committed: Option<&str>) {
        if !self.is_editing {
            self.resync(committed);
        }
    }

    pub(crate) fn resync(&mut self, committed: Option<&str>) {
        self.live_text = committed.unwrap_or_default().to_string();
    }
}
