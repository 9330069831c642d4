//! Free-text query input (the search bar)

/// Editable query buffer.
///
/// The buffer follows its initial value one way: whenever the owner passes a
/// different initial value to [`QueryInput::sync_initial`], local edits are
/// overwritten. Submitting never performs a request; it only hands the
/// trimmed text back to the owner.
#[derive(Debug, Clone)]
pub struct QueryInput {
    buffer: String,
    initial: String,
    placeholder: String,
}

impl QueryInput {
    /// Create an input seeded with `initial`
    pub fn new(initial: &str, placeholder: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            initial: initial.to_string(),
            placeholder: placeholder.to_string(),
        }
    }

    /// Resynchronize from the owner's value; a no-op when it has not changed
    pub fn sync_initial(&mut self, initial: &str) {
        if self.initial != initial {
            self.initial = initial.to_string();
            self.buffer = initial.to_string();
        }
    }

    /// Current buffer contents
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Placeholder shown while the buffer is empty
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether the clear affordance should be shown
    pub fn can_clear(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Append a typed character
    pub fn insert(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Delete the last character
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// The submit event: trimmed buffer, even when empty
    pub fn submit(&self) -> String {
        self.buffer.trim().to_string()
    }

    /// Empty the buffer and emit an empty submit.
    ///
    /// Returns `None` when the buffer was already empty (the affordance is hidden).
    pub fn clear(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        self.buffer.clear();
        Some(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> QueryInput {
        let mut input = QueryInput::new("", "Search anime...");
        for c in text.chars() {
            input.insert(c);
        }
        input
    }

    #[test]
    fn test_submit_trims() {
        for raw in ["naruto", "  naruto", "naruto \t", "\n one piece  ", "   ", ""] {
            assert_eq!(typed(raw).submit(), raw.trim());
        }
    }

    #[test]
    fn test_submit_keeps_buffer() {
        let input = typed(" bebop ");
        assert_eq!(input.submit(), "bebop");
        assert_eq!(input.text(), " bebop ");
    }

    #[test]
    fn test_clear_emits_empty_submit() {
        let mut input = typed("bleach");
        assert!(input.can_clear());
        assert_eq!(input.clear(), Some(String::new()));
        assert!(input.is_empty());
        assert!(!input.can_clear());
        assert_eq!(input.clear(), None);
    }

    #[test]
    fn test_sync_initial_is_one_way() {
        let mut input = QueryInput::new("naruto", "Search again...");
        input.backspace();
        input.insert('X');
        assert_eq!(input.text(), "narutX");

        // Same initial value: local edits survive
        input.sync_initial("naruto");
        assert_eq!(input.text(), "narutX");

        // Changed initial value overwrites the buffer
        input.sync_initial("bleach");
        assert_eq!(input.text(), "bleach");
    }

    #[test]
    fn test_placeholder() {
        let input = QueryInput::new("", "Search again...");
        assert_eq!(input.placeholder(), "Search again...");
        assert!(input.is_empty());
    }
}
