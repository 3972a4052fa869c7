use crate::model::{TodoId, TodoItem};

/// In-memory, newest-first todo list plus the text currently being typed.
#[derive(Debug, Default)]
pub struct TodoStore {
    items: Vec<TodoItem>,
    draft: String,
    last_id: u64,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list the app starts with.
    pub fn with_sample_items() -> Self {
        let mut store = TodoStore::new();
        store.push_back("Nopirkt pienu", false);
        store.push_back("Uzrakstīt plānu", true);
        store
    }

    fn next_id(&mut self) -> TodoId {
        self.last_id += 1;
        TodoId::new(self.last_id)
    }

    fn push_back(&mut self, title: &str, done: bool) {
        let id = self.next_id();
        self.items.push(TodoItem {
            id,
            title: title.to_string(),
            done,
        });
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn push_draft(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn pop_draft(&mut self) {
        self.draft.pop();
    }

    /// Adds `title` at the head of the list. Blank titles are ignored and
    /// leave the draft as it was.
    pub fn add(&mut self, title: &str) -> Option<TodoId> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let id = self.next_id();
        self.items.insert(
            0,
            TodoItem {
                id,
                title: title.to_string(),
                done: false,
            },
        );
        self.draft.clear();
        Some(id)
    }

    pub fn submit_draft(&mut self) -> Option<TodoId> {
        let title = self.draft.clone();
        self.add(&title)
    }

    /// Returns the new `done` value.
    pub fn toggle(&mut self, id: TodoId) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.done = !item.done;
        Some(item.done)
    }

    pub fn remove(&mut self, id: TodoId) -> Option<TodoItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn list(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
