//! Words module - word entries, the word-set registry and the per-session word map
//!
//! A word set is a named, ordered list of [`WordEntry`] values. The registry ships with
//! built-in sets, accepts extra sets at runtime (`register`, `load_json`) and derives the
//! length-bucketed sets (`short`, `medium`, `long`, `extraLong`) from the NGSL lists.

use serde::{Deserialize, Serialize};

use crate::error::WordSetError;
use crate::rng::SimpleRng;
use crate::types::{Archetype, PLACEHOLDER_WORD};

/// Selectable word sets, in selector order.
pub const AVAILABLE: [&str; 20] = [
    "1",
    "2",
    "3",
    "alphabet",
    "numbers",
    "colors",
    "fruit",
    "verbs",
    "conjunctions",
    "short",
    "medium",
    "NGSL1",
    "NGSL2",
    "NGSL3",
    "NGSL4",
    "NGSL5",
    "NGSL6",
    "NGSL7",
    "long",
    "extraLong",
];

const NGSL_KEYS: [&str; 7] = ["NGSL1", "NGSL2", "NGSL3", "NGSL4", "NGSL5", "NGSL6", "NGSL7"];

/// A word to type plus an optional translation.
///
/// Deserializes from either a bare string (`"apple"`) or an object
/// (`{"en": "apple", "ja": "りんご"}`); missing fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawWord")]
pub struct WordEntry {
    en: String,
    ja: String,
    #[serde(skip)]
    key: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWord {
    Text(String),
    Entry {
        #[serde(default)]
        en: String,
        #[serde(default)]
        ja: String,
    },
}

impl From<RawWord> for WordEntry {
    fn from(raw: RawWord) -> Self {
        match raw {
            RawWord::Text(en) => WordEntry::new(en, ""),
            RawWord::Entry { en, ja } => WordEntry::new(en, ja),
        }
    }
}

impl WordEntry {
    pub fn new(en: impl Into<String>, ja: impl Into<String>) -> Self {
        let en = en.into();
        let key = en.to_lowercase();
        Self {
            en,
            ja: ja.into(),
            key,
        }
    }

    /// The word as it was written.
    pub fn text(&self) -> &str {
        &self.en
    }

    pub fn translation(&self) -> &str {
        &self.ja
    }

    /// Lower-cased term used for matching.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Copy with the display text lower-cased, as placed on pieces.
    pub fn lowercased(&self) -> Self {
        Self {
            en: self.key.clone(),
            ja: self.ja.clone(),
            key: self.key.clone(),
        }
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_WORD, "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct WordSet {
    name: String,
    words: Vec<WordEntry>,
}

/// Registry of named word sets, kept in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordSets {
    sets: Vec<WordSet>,
}

impl WordSets {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in set, including the derived length buckets.
    pub fn builtin() -> Self {
        let mut sets = Self::new();
        for &(name, words) in BUILTIN {
            sets.insert(
                name,
                words.iter().map(|&(en, ja)| WordEntry::new(en, ja)).collect(),
            );
        }
        sets.derive_length_sets();
        sets
    }

    fn insert(&mut self, name: &str, words: Vec<WordEntry>) {
        match self.sets.iter_mut().find(|s| s.name == name) {
            Some(set) => set.words = words,
            None => self.sets.push(WordSet {
                name: name.to_string(),
                words,
            }),
        }
    }

    fn derive_length_sets(&mut self) {
        for (name, min, max) in [
            ("short", 1, 3),
            ("medium", 4, 6),
            ("long", 7, 9),
            ("extraLong", 10, 14),
        ] {
            if !self.contains(name) {
                let words = self.length_filtered(min, max);
                self.insert(name, words);
            }
        }
    }

    /// NGSL words whose term length is within `min..=max`, first occurrence wins.
    fn length_filtered(&self, min: usize, max: usize) -> Vec<WordEntry> {
        let mut seen = std::collections::HashSet::new();
        NGSL_KEYS
            .iter()
            .filter_map(|key| self.get(key))
            .flatten()
            .filter(|w| (min..=max).contains(&w.key().chars().count()))
            .filter(|w| seen.insert(w.key().to_string()))
            .map(WordEntry::lowercased)
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.iter().any(|s| s.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&[WordEntry]> {
        self.sets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.words.as_slice())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Add or replace a set. Entries with an empty term are dropped.
    pub fn register(&mut self, name: &str, words: Vec<WordEntry>) -> Result<(), WordSetError> {
        if name.trim().is_empty() {
            return Err(WordSetError::EmptyName);
        }
        let words: Vec<WordEntry> = words.into_iter().filter(|w| !w.key().is_empty()).collect();
        if words.is_empty() {
            return Err(WordSetError::EmptySet(name.to_string()));
        }
        log::debug!("registered word set {name} ({} words)", words.len());
        self.insert(name, words);
        Ok(())
    }

    /// Register every set of a JSON object `{"name": [entry, ...], ...}`.
    ///
    /// Returns the number of sets registered. Nothing is registered if any set is invalid.
    pub fn load_json(&mut self, json: &str) -> Result<usize, WordSetError> {
        let doc: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| WordSetError::Json(e.to_string()))?;

        let mut staged = self.clone();
        for (name, value) in doc.iter() {
            let words: Vec<WordEntry> = serde_json::from_value(value.clone())
                .map_err(|e| WordSetError::Json(format!("{name}: {e}")))?;
            staged.register(name, words)?;
        }
        *self = staged;
        Ok(doc.len())
    }

    /// `count` words drawn from a shuffled pool of the set, repeating the set as needed.
    ///
    /// Unknown or empty sets yield an empty list.
    pub fn random_words(&self, name: &str, count: usize, rng: &mut SimpleRng) -> Vec<WordEntry> {
        let Some(base) = self.get(name).filter(|words| !words.is_empty()) else {
            log::warn!("word set {name} is unknown or empty");
            return Vec::new();
        };

        let mut pool: Vec<WordEntry> = Vec::with_capacity(count.max(base.len()));
        while pool.len() < count.max(1) {
            pool.extend(base.iter().map(WordEntry::lowercased));
        }
        rng.shuffle(&mut pool);
        pool.truncate(count);
        pool
    }
}

/// Archetype -> word assignment for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMap {
    words: [WordEntry; 12],
}

impl WordMap {
    pub fn get(&self, kind: Archetype) -> &WordEntry {
        &self.words[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Archetype, &WordEntry)> {
        Archetype::ALL.into_iter().zip(self.words.iter())
    }
}

impl Default for WordMap {
    fn default() -> Self {
        build_word_map(&[])
    }
}

/// Assign words to the archetypes round-robin; an empty list maps every archetype to the
/// placeholder word.
pub fn build_word_map(words: &[WordEntry]) -> WordMap {
    WordMap {
        words: std::array::from_fn(|i| {
            if words.is_empty() {
                WordEntry::placeholder()
            } else {
                words[i % words.len()].lowercased()
            }
        }),
    }
}

/// Display label for a word set.
pub fn label(name: &str) -> &str {
    match name {
        "1" => "1 (home row)",
        "2" => "2 (top row)",
        "3" => "3 (bottom row)",
        "alphabet" => "alphabet (all keys)",
        "numbers" => "numbers",
        "colors" => "colors",
        "verbs" => "verbs",
        "fruit" => "fruit",
        "conjunctions" => "conjunctions",
        "short" => "short (1-3 letters)",
        "medium" => "medium (4-6 letters)",
        "NGSL1" => "NGSL1 (usage level 1)",
        "NGSL2" => "NGSL2 (usage level 2)",
        "NGSL3" => "NGSL3 (usage level 3)",
        "NGSL4" => "NGSL4 (usage level 4)",
        "NGSL5" => "NGSL5 (usage level 5)",
        "NGSL6" => "NGSL6 (usage level 6)",
        "NGSL7" => "NGSL7 (usage level 7)",
        "long" => "long (7-9 letters)",
        "extraLong" => "extra-long (10-14 letters)",
        other => other,
    }
}

/// Difficulty stars for a word set (empty for custom sets).
pub fn difficulty(name: &str) -> &'static str {
    match name {
        "1" | "2" | "3" | "alphabet" => "★",
        "numbers" | "colors" | "verbs" | "fruit" | "conjunctions" | "short" => "★★",
        "medium" | "NGSL1" | "NGSL2" | "NGSL3" => "★★★",
        "NGSL4" | "NGSL5" | "NGSL6" | "NGSL7" | "long" => "★★★★",
        "extraLong" => "★★★★★",
        _ => "",
    }
}

type BuiltinSet = (&'static str, &'static [(&'static str, &'static str)]);

static BUILTIN: &[BuiltinSet] = &[
    (
        "1",
        &[
            ("sad", ""),
            ("dash", ""),
            ("flask", ""),
            ("glad", ""),
            ("hall", ""),
            ("ask", ""),
            ("lash", ""),
            ("gash", ""),
            ("jag", ""),
            ("lad", ""),
            ("salad", ""),
            ("shall", ""),
        ],
    ),
    (
        "2",
        &[
            ("type", ""),
            ("quiet", ""),
            ("tower", ""),
            ("power", ""),
            ("route", ""),
            ("pie", ""),
            ("write", ""),
            ("tree", ""),
            ("poet", ""),
            ("query", ""),
            ("wire", ""),
            ("you", ""),
        ],
    ),
    (
        "3",
        &[
            ("zx", ""),
            ("xc", ""),
            ("cv", ""),
            ("vb", ""),
            ("bn", ""),
            ("nm", ""),
            ("zxc", ""),
            ("cvb", ""),
            ("bnm", ""),
            ("mnb", ""),
            ("vcx", ""),
            ("xz", ""),
        ],
    ),
    (
        "alphabet",
        &[
            ("a", ""),
            ("b", ""),
            ("c", ""),
            ("d", ""),
            ("e", ""),
            ("f", ""),
            ("g", ""),
            ("h", ""),
            ("i", ""),
            ("j", ""),
            ("k", ""),
            ("l", ""),
            ("m", ""),
            ("n", ""),
            ("o", ""),
            ("p", ""),
            ("q", ""),
            ("r", ""),
            ("s", ""),
            ("t", ""),
            ("u", ""),
            ("v", ""),
            ("w", ""),
            ("x", ""),
            ("y", ""),
            ("z", ""),
        ],
    ),
    (
        "numbers",
        &[
            ("one", "1"),
            ("two", "2"),
            ("three", "3"),
            ("four", "4"),
            ("five", "5"),
            ("six", "6"),
            ("seven", "7"),
            ("eight", "8"),
            ("nine", "9"),
            ("ten", "10"),
            ("eleven", "11"),
            ("twelve", "12"),
        ],
    ),
    (
        "colors",
        &[
            ("red", "赤"),
            ("blue", "青"),
            ("green", "緑"),
            ("yellow", "黄"),
            ("black", "黒"),
            ("white", "白"),
            ("orange", "オレンジ"),
            ("purple", "紫"),
            ("pink", "ピンク"),
            ("brown", "茶"),
            ("gray", "灰"),
            ("gold", "金"),
        ],
    ),
    (
        "fruit",
        &[
            ("apple", "りんご"),
            ("banana", "バナナ"),
            ("grape", "ぶどう"),
            ("lemon", "レモン"),
            ("melon", "メロン"),
            ("peach", "もも"),
            ("cherry", "さくらんぼ"),
            ("orange", "オレンジ"),
            ("mango", "マンゴー"),
            ("kiwi", "キウイ"),
            ("pear", "洋梨"),
            ("plum", "すもも"),
        ],
    ),
    (
        "verbs",
        &[
            ("go", "行く"),
            ("come", "来る"),
            ("make", "作る"),
            ("take", "取る"),
            ("see", "見る"),
            ("know", "知る"),
            ("think", "考える"),
            ("look", "見る"),
            ("want", "欲しい"),
            ("give", "与える"),
            ("use", "使う"),
            ("find", "見つける"),
            ("tell", "伝える"),
            ("work", "働く"),
            ("call", "呼ぶ"),
        ],
    ),
    (
        "conjunctions",
        &[
            ("and", "そして"),
            ("but", "しかし"),
            ("or", "または"),
            ("so", "だから"),
            ("because", "なぜなら"),
            ("if", "もし"),
            ("when", "とき"),
            ("while", "間に"),
            ("although", "だけれども"),
            ("though", "けれども"),
            ("unless", "でない限り"),
            ("since", "以来"),
            ("until", "まで"),
            ("after", "後に"),
            ("before", "前に"),
        ],
    ),
    (
        "NGSL1",
        &[
            ("the", "その"),
            ("be", "である"),
            ("and", "そして"),
            ("of", "の"),
            ("to", "へ"),
            ("have", "持つ"),
            ("it", "それ"),
            ("that", "あれ"),
            ("for", "のために"),
            ("you", "あなた"),
            ("with", "と一緒に"),
            ("people", "人々"),
            ("because", "なぜなら"),
            ("government", "政府"),
            ("information", "情報"),
        ],
    ),
    (
        "NGSL2",
        &[
            ("year", "年"),
            ("time", "時間"),
            ("way", "方法"),
            ("day", "日"),
            ("man", "男"),
            ("thing", "物"),
            ("woman", "女性"),
            ("life", "生活"),
            ("child", "子供"),
            ("world", "世界"),
            ("school", "学校"),
            ("problem", "問題"),
            ("important", "重要な"),
            ("development", "発展"),
            ("environment", "環境"),
        ],
    ),
    (
        "NGSL3",
        &[
            ("ask", "尋ねる"),
            ("feel", "感じる"),
            ("try", "試す"),
            ("leave", "去る"),
            ("put", "置く"),
            ("mean", "意味する"),
            ("keep", "保つ"),
            ("begin", "始める"),
            ("seem", "思われる"),
            ("help", "助ける"),
            ("country", "国"),
            ("question", "質問"),
            ("business", "仕事"),
            ("community", "地域社会"),
            ("relationship", "関係"),
        ],
    ),
    (
        "NGSL4",
        &[
            ("art", "芸術"),
            ("war", "戦争"),
            ("law", "法律"),
            ("idea", "考え"),
            ("energy", "エネルギー"),
            ("reason", "理由"),
            ("example", "例"),
            ("society", "社会"),
            ("history", "歴史"),
            ("evidence", "証拠"),
            ("situation", "状況"),
            ("experience", "経験"),
            ("opportunity", "機会"),
            ("organization", "組織"),
            ("international", "国際的な"),
        ],
    ),
    (
        "NGSL5",
        &[
            ("ice", "氷"),
            ("oil", "油"),
            ("tax", "税"),
            ("gift", "贈り物"),
            ("habit", "習慣"),
            ("signal", "信号"),
            ("balance", "均衡"),
            ("climate", "気候"),
            ("equipment", "設備"),
            ("atmosphere", "雰囲気"),
            ("particular", "特定の"),
            ("technology", "技術"),
            ("responsibility", "責任"),
            ("understanding", "理解"),
            ("significant", "重要な"),
        ],
    ),
    (
        "NGSL6",
        &[
            ("aim", "目的"),
            ("fan", "ファン"),
            ("gap", "隙間"),
            ("bold", "大胆な"),
            ("crisis", "危機"),
            ("harbor", "港"),
            ("fiction", "小説"),
            ("ancient", "古代の"),
            ("universe", "宇宙"),
            ("celebrate", "祝う"),
            ("landscape", "風景"),
            ("permission", "許可"),
            ("instruction", "指示"),
            ("entertainment", "娯楽"),
            ("concentration", "集中"),
        ],
    ),
    (
        "NGSL7",
        &[
            ("pet", "ペット"),
            ("fox", "狐"),
            ("wit", "機知"),
            ("glow", "輝く"),
            ("ghost", "幽霊"),
            ("shrimp", "海老"),
            ("volcano", "火山"),
            ("blanket", "毛布"),
            ("umbrella", "傘"),
            ("telescope", "望遠鏡"),
            ("microscope", "顕微鏡"),
            ("thermometer", "温度計"),
            ("encyclopedia", "百科事典"),
            ("refrigerator", "冷蔵庫"),
            ("accommodation", "宿泊施設"),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_available_set_is_builtin_and_non_empty() {
        let sets = WordSets::builtin();
        for name in AVAILABLE {
            let words = sets.get(name).unwrap_or_else(|| panic!("missing {name}"));
            assert!(!words.is_empty(), "{name} is empty");
            assert!(!difficulty(name).is_empty());
        }
    }

    #[test]
    fn test_derived_sets_respect_length_and_dedupe() {
        let sets = WordSets::builtin();
        for (name, min, max) in [
            ("short", 1, 3),
            ("medium", 4, 6),
            ("long", 7, 9),
            ("extraLong", 10, 14),
        ] {
            let words = sets.get(name).unwrap();
            let mut keys: Vec<&str> = words.iter().map(|w| w.key()).collect();
            assert!(keys.iter().all(|k| (min..=max).contains(&k.len())), "{name}");
            let before = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), before, "{name} has duplicates");
        }
    }

    #[test]
    fn test_word_entry_deserializes_from_string_or_object() {
        let words: Vec<WordEntry> =
            serde_json::from_str(r#"["Apple", {"en": "Pear", "ja": "洋梨"}, {"ja": "x"}]"#)
                .unwrap();
        assert_eq!(words[0].text(), "Apple");
        assert_eq!(words[0].key(), "apple");
        assert_eq!(words[0].translation(), "");
        assert_eq!(words[1].key(), "pear");
        assert_eq!(words[1].translation(), "洋梨");
        assert_eq!(words[2].key(), "");
    }

    #[test]
    fn test_register_validates() {
        let mut sets = WordSets::new();
        assert_eq!(
            sets.register("", vec![WordEntry::new("a", "")]),
            Err(WordSetError::EmptyName)
        );
        assert_eq!(
            sets.register("blank", vec![WordEntry::new("", "x")]),
            Err(WordSetError::EmptySet("blank".into()))
        );
        assert!(sets.register("mine", vec![WordEntry::new("Hello", "")]).is_ok());
        assert_eq!(sets.get("mine").map(|w| w.len()), Some(1));
    }

    #[test]
    fn test_load_json_is_all_or_nothing() {
        let mut sets = WordSets::new();
        assert_eq!(sets.load_json(r#"{"a": ["x", "y"], "b": ["z"]}"#), Ok(2));
        assert!(sets.contains("a") && sets.contains("b"));

        let err = sets.load_json(r#"{"c": ["ok"], "d": []}"#);
        assert_eq!(err, Err(WordSetError::EmptySet("d".into())));
        assert!(!sets.contains("c"));

        assert!(matches!(sets.load_json("[1, 2]"), Err(WordSetError::Json(_))));
    }

    #[test]
    fn test_random_words_repeats_small_sets() {
        let mut sets = WordSets::new();
        sets.register("pair", vec![WordEntry::new("Aa", ""), WordEntry::new("bb", "")])
            .unwrap();
        let mut rng = SimpleRng::new(5);
        let words = sets.random_words("pair", 12, &mut rng);
        assert_eq!(words.len(), 12);
        assert_eq!(words.iter().filter(|w| w.key() == "aa").count(), 6);
        assert!(words.iter().all(|w| w.text() == w.key()));

        assert!(sets.random_words("missing", 12, &mut rng).is_empty());
    }

    #[test]
    fn test_build_word_map() {
        let map = build_word_map(&[]);
        assert!(map.iter().all(|(_, w)| w.text() == PLACEHOLDER_WORD));

        let words = vec![WordEntry::new("One", ""), WordEntry::new("two", "")];
        let map = build_word_map(&words);
        assert_eq!(map.get(Archetype::One).key(), "one");
        assert_eq!(map.get(Archetype::Two).key(), "two");
        assert_eq!(map.get(Archetype::Three).key(), "one");
        assert_eq!(map.get(Archetype::V).key(), "two");
    }

    #[test]
    fn test_labels() {
        assert_eq!(label("extraLong"), "extra-long (10-14 letters)");
        assert_eq!(label("custom"), "custom");
        assert_eq!(difficulty("custom"), "");
        assert_eq!(difficulty("extraLong"), "★★★★★");
    }
}
