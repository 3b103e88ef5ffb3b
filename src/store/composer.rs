use crate::app::Result;
use crate::domain::CommentItem;
use crate::store::Store;

/// Input state of the comment modal for one video.
#[derive(Debug, Clone, Default)]
pub struct CommentComposer {
    pub video_id: Option<String>,
    pub input: String,
    pub visible: bool,
}

impl CommentComposer {
    pub fn open(&mut self, video_id: impl Into<String>) {
        self.video_id = Some(video_id.into());
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Post the current input. The modal stays open and the input is
    /// cleared only when a comment was actually added.
    pub fn submit<S: Store + ?Sized>(&mut self, store: &S) -> Result<Option<CommentItem>> {
        let Some(video_id) = self.video_id.as_deref() else {
            return Ok(None);
        };

        let added = store.add_comment(video_id, &self.input)?;
        if added.is_some() {
            self.input.clear();
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VideoItem;
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .replace_videos(vec![VideoItem::new("v1", "https://cdn.example.com/v1.mp4", "v1")])
            .unwrap();
        store
    }

    #[test]
    fn test_submit_clears_input_and_stays_open() {
        let store = store();
        let mut composer = CommentComposer::default();
        composer.open("v1");
        for c in "nice clip ".chars() {
            composer.push_char(c);
        }

        let added = composer.submit(&store).unwrap().unwrap();
        assert_eq!(added.text, "nice clip");
        assert!(composer.input.is_empty());
        assert!(composer.visible);
    }

    #[test]
    fn test_blank_submit_is_silent_noop() {
        let store = store();
        let mut composer = CommentComposer::default();
        composer.open("v1");
        composer.input = "   ".to_string();

        assert!(composer.submit(&store).unwrap().is_none());
        assert_eq!(composer.input, "   ");
        assert!(store.comments("v1").unwrap().is_empty());
    }

    #[test]
    fn test_submit_without_target_does_nothing() {
        let store = store();
        let mut composer = CommentComposer {
            input: "hello".to_string(),
            ..Default::default()
        };
        assert!(composer.submit(&store).unwrap().is_none());
        assert!(store.comments("v1").unwrap().is_empty());
    }
}
