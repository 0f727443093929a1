//! Word-match queue - the two-slot preview and the typing buffer
//!
//! Both slots are candidates while typing. A keystroke first tries to extend the buffer;
//! failing that it tries to start over from the typed character alone; failing both it is
//! a mistake and changes nothing but the mistake flag.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{Archetype, PREVIEW_COUNT};
use crate::words::WordEntry;

/// A pending piece and the word that claims it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    pub kind: Archetype,
    pub word: WordEntry,
}

/// Which preview word the buffer currently matches, and how far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub match_index: usize,
    pub typed_len: usize,
}

/// A finished word, removed from the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub slot: usize,
    pub entry: PreviewEntry,
    pub typed: u32,
    pub had_mistake: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOutcome {
    /// Not typing input (whitespace or control character).
    Ignored,
    /// No continuation or restart matched; the mistake flag is set.
    Rejected,
    /// The buffer grew or restarted and still prefixes some word.
    Accepted,
    /// The buffer spelled a whole word.
    Completed(Completion),
}

#[derive(Debug, Clone, Default)]
pub struct WordQueue {
    entries: ArrayVec<PreviewEntry, PREVIEW_COUNT>,
    buffer: String,
    match_index: Option<usize>,
    typed: u32,
    had_mistake: bool,
}

impl WordQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PreviewEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn typed(&self) -> u32 {
        self.typed
    }

    pub fn had_mistake(&self) -> bool {
        self.had_mistake
    }

    pub fn match_index(&self) -> Option<usize> {
        self.match_index
    }

    fn any_prefixed(&self, prefix: &str) -> bool {
        self.entries.iter().any(|e| e.word.key().starts_with(prefix))
    }

    /// Feed one typed character.
    pub fn push_char(&mut self, c: char) -> TypeOutcome {
        if c.is_whitespace() || c.is_control() {
            return TypeOutcome::Ignored;
        }

        let letter: String = c.to_lowercase().collect();
        let continued = format!("{}{}", self.buffer, letter);

        if self.any_prefixed(&continued) {
            self.buffer = continued;
            self.typed += 1;
        } else if self.any_prefixed(&letter) {
            self.buffer = letter;
            self.typed = 1;
            self.had_mistake = false;
        } else {
            self.had_mistake = true;
            self.match_index = None;
            return TypeOutcome::Rejected;
        }

        self.match_index = self
            .entries
            .iter()
            .position(|e| e.word.key().starts_with(self.buffer.as_str()));

        let Some(slot) = self
            .entries
            .iter()
            .position(|e| e.word.key() == self.buffer)
        else {
            return TypeOutcome::Accepted;
        };

        let entry = self.entries.remove(slot);
        let completion = Completion {
            slot,
            entry,
            typed: self.typed,
            had_mistake: self.had_mistake,
        };
        self.reset_attempt();
        TypeOutcome::Completed(completion)
    }

    /// Top the queue back up to `PREVIEW_COUNT` entries.
    pub fn refill(&mut self, mut draw: impl FnMut() -> PreviewEntry) {
        while !self.entries.is_full() {
            self.entries.push(draw());
        }
    }

    /// Forget the current attempt (buffer, typed count, mistake flag, match).
    pub fn reset_attempt(&mut self) {
        self.buffer.clear();
        self.typed = 0;
        self.had_mistake = false;
        self.match_index = None;
    }

    /// Drop every entry and the current attempt.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.reset_attempt();
    }

    pub fn highlight(&self) -> Option<Highlight> {
        match self.match_index {
            Some(match_index) if !self.buffer.is_empty() => Some(Highlight {
                match_index,
                typed_len: self.buffer.chars().count(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(words: &[&str]) -> WordQueue {
        let mut queue = WordQueue::new();
        let mut iter = words.iter();
        queue.refill(|| PreviewEntry {
            kind: Archetype::T,
            word: WordEntry::new(*iter.next().unwrap(), ""),
        });
        queue
    }

    #[test]
    fn test_refill_tops_up_to_two() {
        let queue = queue_of(&["cat", "car"]);
        assert_eq!(queue.len(), PREVIEW_COUNT);
    }

    #[test]
    fn test_prefix_tracking_and_lookahead_completion() {
        let mut queue = queue_of(&["cat", "car"]);

        assert_eq!(queue.push_char('c'), TypeOutcome::Accepted);
        assert_eq!(queue.match_index(), Some(0));
        assert_eq!(queue.push_char('a'), TypeOutcome::Accepted);
        assert_eq!(queue.match_index(), Some(0));

        let TypeOutcome::Completed(done) = queue.push_char('r') else {
            panic!("expected completion");
        };
        assert_eq!(done.slot, 1);
        assert_eq!(done.typed, 3);
        assert!(!done.had_mistake);
        assert_eq!(done.entry.word.key(), "car");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.buffer(), "");
        assert_eq!(queue.highlight(), None);
    }

    #[test]
    fn test_rejected_char_only_sets_mistake() {
        let mut queue = queue_of(&["cat", "car"]);
        queue.push_char('c');
        assert_eq!(queue.push_char('z'), TypeOutcome::Rejected);
        assert_eq!(queue.buffer(), "c");
        assert_eq!(queue.typed(), 1);
        assert!(queue.had_mistake());
        assert_eq!(queue.highlight(), None);
    }

    #[test]
    fn test_restart_clears_mistake() {
        let mut queue = queue_of(&["cat", "top"]);
        queue.push_char('c');
        queue.push_char('x');
        assert!(queue.had_mistake());

        // 't' does not continue "c" but starts "top".
        assert_eq!(queue.push_char('t'), TypeOutcome::Accepted);
        assert_eq!(queue.buffer(), "t");
        assert_eq!(queue.typed(), 1);
        assert!(!queue.had_mistake());
        assert_eq!(
            queue.highlight(),
            Some(Highlight {
                match_index: 1,
                typed_len: 1
            })
        );
    }

    #[test]
    fn test_mistake_carries_into_completion() {
        let mut queue = queue_of(&["ab", "cd"]);
        queue.push_char('a');
        queue.push_char('q');
        let TypeOutcome::Completed(done) = queue.push_char('b') else {
            panic!("expected completion");
        };
        assert_eq!(done.slot, 0);
        assert!(done.had_mistake);
    }

    #[test]
    fn test_uppercase_and_whitespace() {
        let mut queue = queue_of(&["cat", "car"]);
        assert_eq!(queue.push_char(' '), TypeOutcome::Ignored);
        assert_eq!(queue.push_char('\n'), TypeOutcome::Ignored);
        assert!(!queue.had_mistake());
        assert_eq!(queue.push_char('C'), TypeOutcome::Accepted);
        assert_eq!(queue.buffer(), "c");
    }

    #[test]
    fn test_first_exact_match_wins_over_longer_word() {
        let mut queue = queue_of(&["ca", "cat"]);
        queue.push_char('c');
        let TypeOutcome::Completed(done) = queue.push_char('a') else {
            panic!("expected completion");
        };
        assert_eq!(done.slot, 0);
    }
}
