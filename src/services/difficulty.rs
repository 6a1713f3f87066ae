//! Heuristic difficulty bands for target words.
//!
//! Curated lists are consulted first. Words on none of them are scored from
//! letter rarity, vowel scarcity, awkward clusters, rare bigrams and long
//! consonant runs; the score is then cut into bands.

use std::collections::{HashMap, HashSet};

use crate::models::WordDifficulty;

/// Scores at or above this are at least `Medium`.
pub const MEDIUM_THRESHOLD: i32 = 4;
/// Scores at or above this are `Hard`.
pub const HARD_THRESHOLD: i32 = 10;

const VOWELS: &str = "aeiou";
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";

fn letter_weight(letter: char) -> i32 {
    match letter {
        'q' | 'z' => 10,
        'x' | 'j' => 8,
        'k' => 6,
        'v' => 5,
        'w' => 4,
        'y' => 3,
        'f' | 'b' | 'g' => 2,
        'h' | 'p' => 1,
        _ => 0,
    }
}

pub fn band_for_score(score: i32) -> WordDifficulty {
    if score >= HARD_THRESHOLD {
        WordDifficulty::Hard
    } else if score >= MEDIUM_THRESHOLD {
        WordDifficulty::Medium
    } else {
        WordDifficulty::Easy
    }
}

/// Numeric difficulty of `word`, ignoring the curated lists.
pub fn difficulty_score(word: &str) -> i32 {
    let word = word.to_lowercase();
    let letters: Vec<char> = word.chars().collect();
    let mut score: i32 = letters.iter().map(|&c| letter_weight(c)).sum();

    let distinct: HashSet<char> = letters.iter().copied().collect();
    if letters.len() >= 5 && distinct.len() < 5 {
        score -= 2;
    }

    let vowels = letters.iter().filter(|c| VOWELS.contains(**c)).count();
    if vowels <= 1 {
        score += 5;
    } else if vowels == 2 {
        score += 2;
    }

    score += 3 * CONSONANT_CLUSTERS
        .iter()
        .filter(|cluster| word.contains(*cluster))
        .count() as i32;

    score += 4 * letters
        .windows(2)
        .filter(|pair| {
            let bigram: String = pair.iter().collect();
            RARE_BIGRAMS.contains(&bigram.as_str())
        })
        .count() as i32;

    let mut longest_run = 0;
    let mut run = 0;
    for &c in &letters {
        if CONSONANTS.contains(c) {
            run += 1;
            longest_run = longest_run.max(run);
        } else {
            run = 0;
        }
    }
    if longest_run >= 3 {
        score += (longest_run - 2) * 3;
    }

    score
}

/// Difficulty band for one word. Total: any input yields a band.
pub fn classify(word: &str) -> WordDifficulty {
    let lower = word.trim().to_lowercase();
    if VERY_COMMON_WORDS.contains(&lower.as_str()) {
        return WordDifficulty::Easy;
    }
    if RARE_WORDS.contains(&lower.as_str()) {
        return WordDifficulty::Hard;
    }
    if UNCOMMON_WORDS.contains(&lower.as_str()) {
        return WordDifficulty::Medium;
    }
    band_for_score(difficulty_score(&lower))
}

pub fn classify_all(words: &[String]) -> HashMap<String, WordDifficulty> {
    words
        .iter()
        .map(|word| (word.clone(), classify(word)))
        .collect()
}

const VERY_COMMON_WORDS: [&str; 112] = [
    "about", "above", "after", "again", "heart", "house", "water", "under",
    "happy", "woman", "world", "thing", "child", "stand", "night", "money",
    "table", "brown", "think", "white", "black", "green", "little", "small",
    "every", "never", "place", "point", "right", "great", "group", "often",
    "build", "earth", "light", "story", "power", "paper", "class", "heard",
    "asset", "alien", "lobby", "brain", "beach", "plant", "movie", "basic",
    "start", "level", "young", "large", "today", "major", "speak", "music",
    "early", "share", "staff", "style", "space", "field", "price", "north",
    "check", "south", "board", "party", "study", "model", "watch", "color",
    "chair", "floor", "hotel", "human", "phone", "river", "sleep", "smile",
    "teeth", "train", "write", "month", "media", "radio", "video", "visit",
    "voice", "cover", "drive", "front", "glass", "guide", "heavy", "horse",
    "judge", "knife", "laugh", "leave", "limit", "local", "match", "metal",
    "mouth", "needs", "nurse", "offer", "order", "other", "owner", "panel",
];

const RARE_WORDS: [&str; 95] = [
    "abaft", "aback", "addle", "aerie", "affix", "antic", "balmy", "bawdy",
    "briar", "canny", "caulk", "crass", "deign", "elide", "fecal", "feign",
    "hoary", "hyena", "jerky", "knack", "lacey", "mourn", "navel", "olden",
    "parch", "quail", "quark", "quirk", "reedy", "rusty", "shirk", "sulky",
    "tryst", "twine", "vague", "vouch", "wacky", "wharf", "whelp", "zesty",
    "yarns", "hares", "azoth", "blain", "carom", "clave", "dixit", "duroc",
    "ergot", "fumet", "galax", "groat", "gloze", "hadal", "ictus", "japer",
    "kench", "livor", "marse", "nadir", "oxter", "pavis", "quoin", "rhumb",
    "scree", "terce", "umiac", "volar", "whelk", "xeric", "yobbo", "ziram",
    "cozen", "demit", "fusil", "gault", "imido", "jorum", "kerfs", "limbi",
    "murex", "nertz", "oasts", "proke", "quire", "reles", "souse", "thrum",
    "unset", "virtu", "witan", "xebec", "yogic", "zoist", "aboon",
];

const UNCOMMON_WORDS: [&str; 54] = [
    "abide", "abort", "abuzz", "acrid", "acute", "adept", "admit", "adobe",
    "adopt", "adore", "agile", "aglow", "agony", "ahead", "aisle", "alarm",
    "album", "alert", "algae", "alibi", "align", "alley", "allot", "alloy",
    "aloft", "alone", "along", "aloof", "amble", "amend", "amidst", "amiss",
    "amuse", "angel", "anger", "angle", "angry", "anime", "ankle", "annex",
    "annoy", "annul", "anode", "anvil", "aorta", "apart", "aphid", "apple",
    "apply", "apron", "aptly", "arbor", "ardor", "areas",
];

const CONSONANT_CLUSTERS: [&str; 20] = [
    "sch", "tch", "thm", "spr", "str", "ngth", "phth", "rld", "rn", "mn",
    "kn", "gh", "bt", "ft", "mb", "ght", "dth", "pth", "lch", "xt",
];

const RARE_BIGRAMS: [&str; 101] = [
    "bk", "bq", "bx", "bz", "cf", "cj", "cp", "cv", "cx", "dx", "fq", "fx",
    "fz", "gq", "gx", "hx", "jb", "jc", "jd", "jf", "jg", "jh", "jl", "jm",
    "jn", "jp", "jq", "jr", "js", "jt", "jv", "jw", "jx", "jy", "jz", "kq",
    "kx", "kz", "mx", "px", "qb", "qc", "qd", "qe", "qf", "qg", "qh", "qi",
    "qj", "qk", "ql", "qm", "qn", "qo", "qp", "qq", "qr", "qs", "qt", "qv",
    "qw", "qx", "qy", "qz", "sx", "sz", "tx", "vb", "vf", "vh", "vj", "vk",
    "vm", "vp", "vq", "vw", "vx", "wq", "wx", "xj", "xk", "xz", "yq", "yj",
    "zb", "zc", "zd", "zf", "zg", "zj", "zl", "zm", "zn", "zp", "zq", "zr",
    "zs", "zt", "zv", "zw", "zx",
];
