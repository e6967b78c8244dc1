use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    // Literals
    Number(i64),

    // Word reference, text kept as written
    Word(String),

    // Definition
    DefinitionStart,
    DefinitionEnd,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Word(w) => write!(f, "{}", w),
            Token::DefinitionStart => write!(f, ":"),
            Token::DefinitionEnd => write!(f, ";"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_source_text() {
        let rendered: Vec<String> = [
            Token::Number(-7),
            Token::Word("Dup".to_string()),
            Token::DefinitionStart,
            Token::DefinitionEnd,
        ]
        .iter()
        .map(|t| t.to_string())
        .collect();
        assert_eq!(rendered, vec!["-7", "Dup", ":", ";"]);
    }
}
