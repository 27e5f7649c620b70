//! Small frequency lists used as positive evidence that a word is real.
//!
//! A hit is a strong signal, a miss means nothing.

const ENGLISH: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "back", "be", "because", "been", "before", "but", "by", "can", "code", "come", "could",
    "day", "did", "do", "does", "done", "email", "even", "first", "fix", "for", "from", "get",
    "give", "go", "good", "great", "had", "has", "have", "he", "hello", "help", "her", "here",
    "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "keyboard", "know",
    "language", "last", "layout", "like", "link", "look", "make", "me", "more", "most", "my",
    "need", "new", "no", "not", "now", "of", "ok", "on", "one", "only", "or", "other", "our",
    "out", "over", "people", "please", "right", "say", "see", "she", "so", "some", "take",
    "test", "text", "than", "thank", "thanks", "that", "the", "their", "them", "then", "there",
    "these", "they", "think", "this", "time", "to", "today", "two", "type", "up", "us", "use",
    "very", "want", "was", "way", "we", "well", "were", "what", "when", "where", "which", "who",
    "why", "will", "with", "word", "work", "world", "would", "write", "year", "yes", "you",
    "your",
];

const ARABIC: &[&str] = &[
    "أن", "أنا", "أنت", "أو", "أين", "إذا", "إلى", "إن", "الإنجليزية", "الخير", "الذي",
    "السلام", "العربية", "الكتابة", "الله", "اليوم", "المفاتيح", "التي", "بعد", "بيت", "بين",
    "ثم", "جدا", "جميل", "حتى", "ذلك", "شكرا", "صباح", "عربي", "على", "عليكم", "عن", "في",
    "قال", "قبل", "قد", "كان", "كانت", "كتاب", "كتب", "كثير", "كل", "كيف", "لا", "لغة",
    "لم", "لماذا", "لن", "لوحة", "ما", "متى", "مرحبا", "مساء", "مع", "من", "نحن", "نعم",
    "هذا", "هذه", "هم", "هو", "هي", "وقت", "يوم",
];

pub fn is_common_english(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    ENGLISH.binary_search(&lower.as_str()).is_ok()
}

pub fn is_common_arabic(word: &str) -> bool {
    ARABIC.contains(&word)
}
