//! Lightweight rule-based part-of-speech tagger for English.
//!
//! Closed word classes come from fixed lexicons; open-class words are
//! guessed from suffixes and then resolved against their left neighbour.
//! Unknown words default to nouns, which is also what a unigram tagger
//! backs off to. A sentence left without any verb gets one more pass that
//! looks for an unknown word sitting between a subject and its object.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Coarse tag set; enough for the coherence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Modal,
    Adjective,
    Adverb,
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Particle,
    Number,
}

impl PosTag {
    pub fn is_noun(self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun)
    }

    /// Full verbs and auxiliaries; modals are tagged separately.
    pub fn is_verb(self) -> bool {
        matches!(self, Self::Verb)
    }
}

/// First-pass classification before context is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guess {
    Fixed(PosTag),
    /// A known verb form that is also commonly a noun ("use", "costs").
    VerbOrNoun,
    /// `-ing` / `-ed` forms: verbs unless a determiner precedes them.
    Participle,
    Unknown,
}

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such", "my", "your", "his", "its", "our",
    "their", "her", "whose", "which", "what",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
    "mine", "yours", "ours", "theirs", "someone", "everyone", "nobody", "something",
    "everything", "nothing",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "from", "up", "down", "over",
    "under", "across", "along", "around", "behind", "beyond", "near", "within", "without",
    "since", "toward", "towards", "upon", "among", "per", "via", "despite", "than", "off",
    "out", "like", "to",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "while", "if",
    "unless", "whereas", "whether",
];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would",
];

const AUXILIARIES: &[&str] = &[
    "be", "is", "are", "was", "were", "been", "being", "am", "have", "has", "had", "having",
    "do", "does", "did", "doing", "done",
];

const ADVERBS: &[&str] = &[
    "not", "never", "also", "very", "now", "then", "here", "there", "just", "only", "still",
    "already", "even", "again", "often", "always", "soon", "too", "quite", "rather", "almost",
    "really", "well", "however", "ever", "today", "tomorrow", "yesterday", "instead",
];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred",
    "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety", "dozen",
    "thousand", "million", "billion", "first", "second", "third",
];

/// `-s` words that are nouns in every reading.
const PLURAL_ONLY_NOUNS: &[&str] = &[
    "news", "series", "species", "sales", "earnings", "savings", "economics", "politics",
    "physics", "electronics", "robotics", "logistics", "analytics", "headquarters",
];

/// Irregular verb forms that never read as nouns.
const VERB_FORMS: &[&str] = &[
    "said", "made", "got", "went", "gone", "knew", "known", "took", "taken", "saw", "seen",
    "came", "thought", "gave", "given", "found", "told", "became", "shown", "brought",
    "began", "begun", "kept", "held", "wrote", "written", "stood", "heard", "meant", "met",
    "ran", "paid", "spoke", "led", "grew", "grown", "lost", "fell", "fallen", "sent", "built",
    "spent", "rose", "risen", "drove", "driven", "bought", "sold", "won", "sought", "says",
    "goes", "gets", "makes", "takes", "gives", "tells", "becomes", "seems", "seem", "know",
    "think", "become", "bring", "begin", "tell", "grow", "rise", "fall", "remain", "remains",
    "expect", "expects", "include", "includes", "continue", "continues", "provide",
    "provides", "allow", "allows", "require", "requires", "suggest", "suggests", "announce",
    "announces", "expand", "expands", "develop", "develops", "reduce", "reduces", "create",
    "creates", "launch", "launches", "invest", "invests", "enable", "enables", "improve",
    "improves", "believe", "believes", "want", "wants", "keep", "keeps", "get", "go", "make",
    "take", "give", "say", "see", "sees", "come", "comes", "find", "finds", "let", "lets",
    "put", "puts", "adopt", "adopts", "accelerate", "accelerates", "boost", "boosts",
];

/// Base or `-s` forms that are just as often nouns.
const VERB_OR_NOUN: &[&str] = &[
    "use", "uses", "cost", "costs", "plan", "plans", "report", "reports", "increase",
    "increases", "need", "needs", "work", "works", "help", "helps", "show", "shows", "lead",
    "leads", "drive", "drives", "change", "changes", "offer", "offers", "raise", "raises",
    "face", "faces", "support", "supports", "produce", "demand", "demands", "cut", "cuts",
    "charge", "charges", "run", "runs", "set", "sets", "hold", "holds", "start", "starts",
    "call", "calls", "move", "moves", "focus", "focuses", "spread", "spreads", "sell", "sells",
    "build", "builds", "buy", "buys", "pay", "pays", "look", "looks", "turn", "turns", "play",
    "plays", "limit", "limits", "power", "powers", "fund", "funds", "rule", "rules", "vote",
    "votes",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ism", "ship", "ance", "ence", "ery", "ure",
    "ist", "ogy", "hood",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ic", "ical", "less", "ish", "ary", "ial",
];

static LEXICON: LazyLock<HashMap<&'static str, Guess>> = LazyLock::new(|| {
    let mut lexicon = HashMap::new();
    let tables: [(&[&str], Guess); 11] = [
        (PLURAL_ONLY_NOUNS, Guess::Fixed(PosTag::Noun)),
        (VERB_OR_NOUN, Guess::VerbOrNoun),
        (VERB_FORMS, Guess::Fixed(PosTag::Verb)),
        (AUXILIARIES, Guess::Fixed(PosTag::Verb)),
        (NUMBER_WORDS, Guess::Fixed(PosTag::Number)),
        (ADVERBS, Guess::Fixed(PosTag::Adverb)),
        (MODALS, Guess::Fixed(PosTag::Modal)),
        (CONJUNCTIONS, Guess::Fixed(PosTag::Conjunction)),
        (PREPOSITIONS, Guess::Fixed(PosTag::Preposition)),
        (PRONOUNS, Guess::Fixed(PosTag::Pronoun)),
        (DETERMINERS, Guess::Fixed(PosTag::Determiner)),
    ];
    // Later tables win, so closed classes override open-class entries.
    for (words, guess) in tables {
        for word in words {
            lexicon.insert(*word, guess);
        }
    }
    lexicon
});

/// Tag a sentence's tokens. The output has one tag per input token.
pub fn tag<S: AsRef<str>>(tokens: &[S]) -> Vec<PosTag> {
    let guesses: Vec<Guess> = tokens.iter().map(|t| guess(t.as_ref())).collect();
    let mut tags: Vec<PosTag> = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let prev = tags.last().copied();
        let prev_word = i
            .checked_sub(1)
            .map(|j| tokens[j].as_ref().to_lowercase());

        let tag = match guesses[i] {
            Guess::Fixed(tag) => tag,
            Guess::Participle => match prev {
                Some(PosTag::Determiner | PosTag::Adjective) => PosTag::Adjective,
                _ => PosTag::Verb,
            },
            Guess::VerbOrNoun => match prev {
                Some(PosTag::Pronoun | PosTag::Modal) => PosTag::Verb,
                Some(PosTag::Noun | PosTag::ProperNoun) => PosTag::Verb,
                None => PosTag::Verb,
                _ if prev_word.as_deref() == Some("to") => PosTag::Verb,
                _ => PosTag::Noun,
            },
            Guess::Unknown if prev == Some(PosTag::Modal) => PosTag::Verb,
            Guess::Unknown => {
                if i > 0 && starts_uppercase(token) {
                    PosTag::ProperNoun
                } else {
                    PosTag::Noun
                }
            }
        };

        // "to" directly before a verb is an infinitive marker.
        if tag == PosTag::Verb && prev_word.as_deref() == Some("to") {
            if let Some(last) = tags.last_mut() {
                *last = PosTag::Particle;
            }
        }

        tags.push(tag);
    }

    if !tags.iter().any(|t| t.is_verb()) {
        if let Some(i) = find_main_verb(tokens, &guesses, &tags) {
            tags[i] = PosTag::Verb;
        }
    }

    tags
}

/// Position of an unknown word that reads as the finite verb of
/// `subject verb object`, as in "Investors fear a slowdown".
///
/// The word must agree with a noun subject in number: a plural subject
/// takes a base form, a singular one an `-s` form. Pronoun subjects take
/// either. A following determiner, preposition, number or pronoun settles
/// the choice at once; otherwise the rightmost candidate before a noun or
/// adjective wins, which skips the first half of compounds like
/// "battery makers target".
fn find_main_verb<S: AsRef<str>>(
    tokens: &[S],
    guesses: &[Guess],
    tags: &[PosTag],
) -> Option<usize> {
    let mut fallback = None;

    for i in 1..tokens.len().saturating_sub(1) {
        let word = tokens[i].as_ref();
        if guesses[i] != Guess::Unknown || tags[i] != PosTag::Noun {
            continue;
        }

        let agrees = match tags[i - 1] {
            PosTag::Pronoun => true,
            PosTag::ProperNoun => is_s_form(word),
            PosTag::Noun => is_s_form(tokens[i - 1].as_ref()) != is_s_form(word),
            _ => false,
        };
        if !agrees {
            continue;
        }

        match tags[i + 1] {
            PosTag::Determiner | PosTag::Preposition | PosTag::Number | PosTag::Pronoun => {
                return Some(i);
            }
            PosTag::Noun | PosTag::ProperNoun | PosTag::Adjective => fallback = Some(i),
            _ => {}
        }
    }

    fallback
}

/// Plural noun or third-person verb ending; `-ss`, `-us` and `-is` words
/// are neither.
fn is_s_form(word: &str) -> bool {
    let lower = word.to_lowercase();
    lower.chars().count() > 3
        && lower.ends_with('s')
        && !(lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is"))
}

fn guess(token: &str) -> Guess {
    let lower = token.to_lowercase();

    if let Some(guess) = LEXICON.get(lower.as_str()) {
        return *guess;
    }
    if lower.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && lower.chars().any(|c| c.is_ascii_digit())
    {
        return Guess::Fixed(PosTag::Number);
    }
    if lower.chars().count() <= 3 {
        return Guess::Unknown;
    }
    if lower.ends_with("ly") {
        return Guess::Fixed(PosTag::Adverb);
    }
    if lower.ends_with("ing") || lower.ends_with("ed") {
        return Guess::Participle;
    }
    if lower.ends_with("ize") || lower.ends_with("izes") || lower.ends_with("ify") {
        return Guess::Fixed(PosTag::Verb);
    }
    if NOUN_SUFFIXES
        .iter()
        .any(|s| lower.ends_with(s) || lower.ends_with(&format!("{s}s")))
    {
        return Guess::Fixed(PosTag::Noun);
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return Guess::Fixed(PosTag::Adjective);
    }

    Guess::Unknown
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}
