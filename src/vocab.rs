//! Static word lists used by the join heuristics.
//!
//! Both lists are sorted so lookups can binary search without building a set.

/// Short function words that are never merged with a neighbour.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has", "have",
    "he", "her", "him", "his", "i", "if", "in", "into", "is", "it", "its", "me", "no", "not", "of",
    "on", "or", "our", "she", "so", "that", "the", "their", "then", "there", "they", "this", "to",
    "up", "was", "we", "were", "what", "when", "where", "which", "who", "will", "with", "without",
    "would", "you", "your",
];

/// Chess piece names, singular and plural.
pub const PIECE_WORDS: &[&str] = &[
    "bishop", "bishops", "king", "kings", "knight", "knights", "pawn", "pawns", "queen", "queens",
    "rook", "rooks",
];

/// Returns true if `word` is a stopword, ignoring case.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word.to_lowercase().as_str()).is_ok()
}

/// Returns true if `word` is a piece name, ignoring case.
pub fn is_piece_word(word: &str) -> bool {
    PIECE_WORDS.binary_search(&word.to_lowercase().as_str()).is_ok()
}

/// A stopword, or at least three ASCII letters and nothing else.
pub fn looks_like_real_word(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    if is_stopword(word) {
        return true;
    }
    word.len() >= 3 && word.chars().all(|c| c.is_ascii_alphabetic())
}
