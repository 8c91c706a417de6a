//! Per-stage edit buffers shadowing the Session Store.

use serde::Serialize;
use tracing::debug;

use super::buffer::EditBuffer;
use crate::error::{EpromptError, Result};
use crate::session::{EditableStage, Session, SessionStore};

/// One edit buffer per editable stage.
///
/// Only [`save_edit`](Self::save_edit) writes user-typed text into the
/// committed session. Toggling edit mode off resets the buffer and leaves the
/// committed value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingOverlay {
    initial_prompt: EditBuffer,
    refined_prompt: EditBuffer,
    content: EditBuffer,
}

impl EditingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self, stage: EditableStage) -> &EditBuffer {
        match stage {
            EditableStage::InitialPrompt => &self.initial_prompt,
            EditableStage::RefinedPrompt => &self.refined_prompt,
            EditableStage::Content => &self.content,
        }
    }

    fn buffer_mut(&mut self, stage: EditableStage) -> &mut EditBuffer {
        match stage {
            EditableStage::InitialPrompt => &mut self.initial_prompt,
            EditableStage::RefinedPrompt => &mut self.refined_prompt,
            EditableStage::Content => &mut self.content,
        }
    }

    pub fn is_editing(&self, stage: EditableStage) -> bool {
        self.buffer(stage).is_editing
    }

    /// Mirrors every non-editing buffer from the committed session.
    ///
    /// Must run after every committed change.
    pub fn follow(&mut self, session: &Session) {
        for stage in [
            EditableStage::InitialPrompt,
            EditableStage::RefinedPrompt,
            EditableStage::Content,
        ] {
            self.buffer_mut(stage).follow(session.field(stage));
        }
    }

    /// Drops all edit state, then mirrors `session`.
    pub fn reset(&mut self, session: &Session) {
        *self = Self::default();
        self.follow(session);
    }

    /// Freezes the buffer. Entering while already editing is a no-op.
    pub fn enter_edit(&mut self, stage: EditableStage) {
        debug!(%stage, "Entering edit mode");
        self.buffer_mut(stage).is_editing = true;
    }

    pub fn set_live_text(&mut self, stage: EditableStage, text: impl Into<String>) -> Result<()> {
        let buffer = self.buffer_mut(stage);
        if !buffer.is_editing {
            return Err(EpromptError::invalid_state(format!(
                "'{}' is not in edit mode",
                stage
            )));
        }
        buffer.live_text = text.into();
        Ok(())
    }

    /// Writes the buffer into the committed field and leaves edit mode.
    ///
    /// Blank text is rejected and the buffer stays in edit mode.
    pub fn save_edit(&mut self, stage: EditableStage, store: &mut SessionStore) -> Result<()> {
        let buffer = self.buffer(stage);
        if !buffer.is_editing {
            return Err(EpromptError::invalid_state(format!(
                "'{}' is not in edit mode",
                stage
            )));
        }
        if buffer.live_text.trim().is_empty() {
            return Err(EpromptError::validation([stage.to_string()]));
        }

        let text = buffer.live_text.clone();
        store.commit(stage, text);
        self.buffer_mut(stage).is_editing = false;
        self.follow(store.session());
        Ok(())
    }

    /// Throws away unsaved typing and leaves edit mode.
    pub fn discard_edit(&mut self, stage: EditableStage, session: &Session) {
        debug!(%stage, "Discarding edit");
        let buffer = self.buffer_mut(stage);
        buffer.is_editing = false;
        buffer.resync(session.field(stage));
    }

    /// Off → on enters edit mode; on → off behaves like a discard.
    pub fn toggle_edit(&mut self, stage: EditableStage, session: &Session) {
        if self.is_editing(stage) {
            self.discard_edit(stage, session);
        } else {
            self.enter_edit(stage);
        }
    }

    /// Replaces the text underneath a buffer without touching its edit flag.
    pub fn replace_live_text(&mut self, stage: EditableStage, text: impl Into<String>) {
        self.buffer_mut(stage).live_text = text.into();
    }

    /// Text that is authoritative for `stage` right now: the buffer while
    /// editing, the committed field otherwise.
    pub fn authoritative_text<'a>(
        &'a self,
        stage: EditableStage,
        session: &'a Session,
    ) -> Option<&'a str> {
        let buffer = self.buffer(stage);
        if buffer.is_editing {
            Some(buffer.live_text.as_str())
        } else {
            session.field(stage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Template;

    fn store_with_prompt(prompt: &str) -> SessionStore {
        let mut store = SessionStore::new();
        store.select_template(Template {
            id: "t1".to_string(),
            name: "Writer".to_string(),
            description: String::new(),
            role: String::new(),
            tags: vec![],
            required_fields: vec![],
            optional_fields: vec![],
            template: None,
        });
        store.commit_initial_prompt(prompt, None);
        store
    }

    #[test]
    fn test_buffers_follow_while_not_editing() {
        let mut store = store_with_prompt("first");
        let mut overlay = EditingOverlay::new();
        overlay.follow(store.session());
        assert_eq!(overlay.buffer(EditableStage::InitialPrompt).live_text, "first");

        store.commit_initial_prompt("second", None);
        overlay.follow(store.session());
        assert_eq!(overlay.buffer(EditableStage::InitialPrompt).live_text, "second");
    }

    #[test]
    fn test_editing_buffer_stops_following() {
        let mut store = store_with_prompt("first");
        let mut overlay = EditingOverlay::new();
        overlay.follow(store.session());
        overlay.enter_edit(EditableStage::InitialPrompt);
        overlay
            .set_live_text(EditableStage::InitialPrompt, "typed")
            .unwrap();

        store.commit_initial_prompt("regenerated", None);
        overlay.follow(store.session());

        assert_eq!(overlay.buffer(EditableStage::InitialPrompt).live_text, "typed");
    }

    #[test]
    fn test_discard_round_trip_leaves_committed_unchanged() {
        for typed in ["", "x", "a much longer replacement\nwith lines"] {
            let store = store_with_prompt("committed");
            let mut overlay = EditingOverlay::new();
            overlay.follow(store.session());

            overlay.enter_edit(EditableStage::InitialPrompt);
            overlay
                .set_live_text(EditableStage::InitialPrompt, typed)
                .unwrap();
            overlay.discard_edit(EditableStage::InitialPrompt, store.session());

            let buffer = overlay.buffer(EditableStage::InitialPrompt);
            assert_eq!(store.session().initial_prompt.as_deref(), Some("committed"));
            assert_eq!(buffer.live_text, "committed");
            assert!(!buffer.is_editing);
        }
    }

    #[test]
    fn test_save_writes_through() {
        let mut store = store_with_prompt("committed");
        let mut overlay = EditingOverlay::new();
        overlay.follow(store.session());

        overlay.enter_edit(EditableStage::InitialPrompt);
        overlay
            .set_live_text(EditableStage::InitialPrompt, "edited")
            .unwrap();
        overlay
            .save_edit(EditableStage::InitialPrompt, &mut store)
            .unwrap();

        assert_eq!(store.session().initial_prompt.as_deref(), Some("edited"));
        assert!(!overlay.is_editing(EditableStage::InitialPrompt));
    }

    #[test]
    fn test_save_rejects_blank_text() {
        let mut store = store_with_prompt("committed");
        let mut overlay = EditingOverlay::new();
        overlay.enter_edit(EditableStage::InitialPrompt);
        overlay
            .set_live_text(EditableStage::InitialPrompt, "   ")
            .unwrap();

        let err = overlay
            .save_edit(EditableStage::InitialPrompt, &mut store)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(overlay.is_editing(EditableStage::InitialPrompt));
        assert_eq!(store.session().initial_prompt.as_deref(), Some("committed"));
    }

    #[test]
    fn test_set_live_text_requires_edit_mode() {
        let mut overlay = EditingOverlay::new();
        assert!(overlay.set_live_text(EditableStage::Content, "x").is_err());
    }

    #[test]
    fn test_toggle_off_does_not_write_through() {
        let store = store_with_prompt("committed");
        let mut overlay = EditingOverlay::new();
        overlay.follow(store.session());

        overlay.toggle_edit(EditableStage::InitialPrompt, store.session());
        overlay
            .set_live_text(EditableStage::InitialPrompt, "typed")
            .unwrap();
        overlay.toggle_edit(EditableStage::InitialPrompt, store.session());

        assert_eq!(store.session().initial_prompt.as_deref(), Some("committed"));
        assert_eq!(overlay.buffer(EditableStage::InitialPrompt).live_text, "committed");
    }

    #[test]
    fn test_authoritative_text_prefers_buffer_while_editing() {
        let store = store_with_prompt("committed");
        let mut overlay = EditingOverlay::new();
        overlay.follow(store.session());
        assert_eq!(
            overlay.authoritative_text(EditableStage::InitialPrompt, store.session()),
            Some("committed")
        );

        overlay.enter_edit(EditableStage::InitialPrompt);
        overlay
            .set_live_text(EditableStage::InitialPrompt, "draft")
            .unwrap();
        assert_eq!(
            overlay.authoritative_text(EditableStage::InitialPrompt, store.session()),
            Some("draft")
        );
        assert_eq!(
            overlay.authoritative_text(EditableStage::Content, store.session()),
            None
        );
    }
}
