//! Word queue and word set tests

use typefall::core::{
    build_word_map, Highlight, PreviewEntry, SimpleRng, TypeOutcome, WordEntry, WordQueue,
    WordSetError, WordSets,
};
use typefall::types::{Archetype, PLACEHOLDER_WORD};

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
fn test_cat_car_walkthrough() {
    let mut queue = queue_of(&["cat", "car"]);

    assert_eq!(queue.push_char('c'), TypeOutcome::Accepted);
    assert_eq!(
        queue.highlight(),
        Some(Highlight {
            match_index: 0,
            typed_len: 1
        })
    );
    assert_eq!(queue.push_char('a'), TypeOutcome::Accepted);
    assert_eq!(queue.match_index(), Some(0));

    let TypeOutcome::Completed(done) = queue.push_char('r') else {
        panic!("expected completion");
    };
    assert_eq!(done.slot, 1);
    assert_eq!(done.entry.word.key(), "car");
    assert_eq!(done.typed, 3);
    assert!(!done.had_mistake);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.buffer(), "");
}

#[test]
fn test_mistake_keeps_buffer_and_count() {
    let mut queue = queue_of(&["cat", "dog"]);
    queue.push_char('c');
    queue.push_char('a');

    assert_eq!(queue.push_char('z'), TypeOutcome::Rejected);
    assert_eq!(queue.buffer(), "ca");
    assert_eq!(queue.typed(), 2);
    assert!(queue.had_mistake());
    assert_eq!(queue.highlight(), None);

    let TypeOutcome::Completed(done) = queue.push_char('t') else {
        panic!("expected completion");
    };
    assert!(done.had_mistake);
}

#[test]
fn test_restart_from_single_letter() {
    let mut queue = queue_of(&["cat", "dog"]);
    queue.push_char('c');
    queue.push_char('z');
    assert!(queue.had_mistake());

    // 'd' does not continue "c" but starts "dog": a fresh, clean attempt.
    assert_eq!(queue.push_char('d'), TypeOutcome::Accepted);
    assert_eq!(queue.buffer(), "d");
    assert_eq!(queue.typed(), 1);
    assert!(!queue.had_mistake());
    assert_eq!(queue.match_index(), Some(1));
}

#[test]
fn test_matching_is_case_insensitive() {
    let mut queue = queue_of(&["Apple", "pear"]);
    queue.push_char('A');
    queue.push_char('P');
    assert_eq!(queue.buffer(), "ap");
    assert_eq!(queue.match_index(), Some(0));
}

#[test]
fn test_whitespace_is_ignored() {
    let mut queue = queue_of(&["cat", "dog"]);
    queue.push_char('c');
    assert_eq!(queue.push_char(' '), TypeOutcome::Ignored);
    assert_eq!(queue.buffer(), "c");
    assert!(!queue.had_mistake());
}

#[test]
fn test_builtin_sets_cover_the_selector() {
    let sets = WordSets::builtin();
    for name in typefall::core::words::AVAILABLE {
        let words = sets.get(name).unwrap_or_else(|| panic!("missing set {name}"));
        assert!(!words.is_empty(), "{name}");
    }
    let short = sets.get("short").unwrap();
    assert!(short.iter().all(|w| (1..=3).contains(&w.key().chars().count())));
    let extra = sets.get("extraLong").unwrap();
    assert!(extra.iter().all(|w| (10..=14).contains(&w.key().chars().count())));
}

#[test]
fn test_random_words_count_and_membership() {
    let sets = WordSets::builtin();
    let mut rng = SimpleRng::new(3);
    let words = sets.random_words("colors", 12, &mut rng);
    assert_eq!(words.len(), 12);
    let colors = sets.get("colors").unwrap();
    for w in &words {
        assert!(colors.iter().any(|c| c.key() == w.key()), "{}", w.key());
    }

    assert!(sets.random_words("nope", 12, &mut rng).is_empty());
}

#[test]
fn test_load_json_custom_sets() {
    let mut sets = WordSets::builtin();
    let count = sets
        .load_json(r#"{"animals": ["Cat", {"en": "dog", "ja": "いぬ"}], "tiny": ["a"]}"#)
        .unwrap();
    assert_eq!(count, 2);

    let animals = sets.get("animals").unwrap();
    assert_eq!(animals[0].text(), "Cat");
    assert_eq!(animals[0].key(), "cat");
    assert_eq!(animals[1].translation(), "いぬ");
}

#[test]
fn test_load_json_is_all_or_nothing() {
    let mut sets = WordSets::new();
    let err = sets.load_json(r#"{"good": ["a"], "bad": []}"#).unwrap_err();
    assert_eq!(err, WordSetError::EmptySet("bad".to_string()));
    assert!(sets.is_empty());

    assert!(matches!(sets.load_json("[1, 2]"), Err(WordSetError::Json(_))));
}

#[test]
fn test_word_map_round_robin_and_placeholder() {
    let words = [WordEntry::new("One", ""), WordEntry::new("two", "")];
    let map = build_word_map(&words);
    assert_eq!(map.get(Archetype::One).text(), "one");
    assert_eq!(map.get(Archetype::Two).text(), "two");
    assert_eq!(map.get(Archetype::Three).text(), "one");

    let empty = build_word_map(&[]);
    assert!(empty.iter().all(|(_, w)| w.text() == PLACEHOLDER_WORD));
}
