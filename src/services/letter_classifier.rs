use crate::models::GameDifficulty;

/// The twelve most frequent letters in English text.
pub const COMMON_LETTERS: [char; 12] = ['E', 'T', 'A', 'O', 'I', 'N', 'S', 'H', 'R', 'D', 'L', 'U'];

/// Count letters of `word` that are among the common letters, with repeats.
pub fn common_letter_count(word: &str) -> usize {
    word.chars()
        .filter(|c| COMMON_LETTERS.contains(&c.to_ascii_uppercase()))
        .count()
}

/// Whether `word` belongs in a puzzle drawn at `difficulty`.
/// Easy puzzles favour common letters, hard ones avoid them.
pub fn matches_game_difficulty(word: &str, difficulty: GameDifficulty) -> bool {
    match difficulty {
        GameDifficulty::Easy => common_letter_count(word) >= 3,
        GameDifficulty::Hard => common_letter_count(word) <= 2,
        GameDifficulty::Normal => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_letter_count() {
        assert_eq!(common_letter_count("HEART"), 5);
        assert_eq!(common_letter_count("jazzy"), 1);
        assert_eq!(common_letter_count("Lobby"), 2);
        assert_eq!(common_letter_count(""), 0);
    }

    #[test]
    fn test_matches_game_difficulty() {
        assert!(matches_game_difficulty("HEART", GameDifficulty::Easy));
        assert!(!matches_game_difficulty("HEART", GameDifficulty::Hard));
        assert!(matches_game_difficulty("JAZZY", GameDifficulty::Hard));
        assert!(!matches_game_difficulty("JAZZY", GameDifficulty::Easy));
        assert!(matches_game_difficulty("JAZZY", GameDifficulty::Normal));
        assert!(matches_game_difficulty("HEART", GameDifficulty::Normal));
    }
}
