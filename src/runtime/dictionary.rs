use std::collections::HashMap;
use std::rc::Rc;

use crate::frontend::token::Token;
use crate::runtime::builtins::{PRIMITIVES, PRINTERS, Primitive, Printer};

/// What a word does when invoked.
#[derive(Clone)]
pub enum Operation {
    Primitive(Primitive),
    Printer(Printer),
    UserDefined(Rc<UserWord>),
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Primitive(_) => write!(f, "Primitive"),
            Operation::Printer(_) => write!(f, "Printer"),
            Operation::UserDefined(word) => write!(f, "UserDefined({})", word.name),
        }
    }
}

/// A word installed by `: name ... ;`.
///
/// `scope` is a frozen copy of the dictionary taken when the word was
/// defined; the body is always resolved against it, never against later
/// definitions.
#[derive(Debug)]
pub struct UserWord {
    pub name: String,
    pub body: Vec<Token>,
    pub scope: Rc<Dictionary>,
}

/// Case-insensitive word table.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashMap<String, Operation>,
}

/// Lower-cased form used as the dictionary key.
pub fn canonical(name: &str) -> String {
    name.to_lowercase()
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh dictionary holding every built-in word.
    pub fn with_builtins() -> Self {
        let mut dict = Dictionary::new();
        for (name, op) in PRIMITIVES {
            dict.define(name, Operation::Primitive(*op));
        }
        for (name, op) in PRINTERS {
            dict.define(name, Operation::Printer(*op));
        }
        dict
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.words.get(&canonical(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Binds `name`, replacing any previous binding.
    pub fn define(&mut self, name: &str, op: Operation) {
        self.words.insert(canonical(name), op);
    }

    /// Binds a user word whose body resolves against the current bindings.
    pub fn define_word(&mut self, name: &str, body: Vec<Token>) {
        let word = UserWord {
            name: canonical(name),
            body,
            scope: self.snapshot(),
        };
        self.define(name, Operation::UserDefined(Rc::new(word)));
    }

    pub fn snapshot(&self) -> Rc<Dictionary> {
        Rc::new(self.clone())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Sorted canonical names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.words.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_present() {
        let dict = Dictionary::with_builtins();
        assert_eq!(
            dict.names(),
            vec!["*", "+", "-", ".", ".s", "/", "drop", "dup", "emit", "over", "swap"]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dict = Dictionary::with_builtins();
        assert!(dict.contains("DUP"));
        assert!(dict.contains("Dup"));
        assert!(dict.contains("dup"));
        assert!(dict.contains("EMIT"));
        assert!(!dict.contains("rot"));
    }

    #[test]
    fn test_define_replaces_case_insensitively() {
        let mut dict = Dictionary::with_builtins();
        let before = dict.len();
        dict.define_word("SWAP", vec![Token::Word("dup".to_string())]);
        assert_eq!(dict.len(), before);
        assert!(matches!(dict.get("swap"), Some(Operation::UserDefined(w)) if w.name == "swap"));
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let mut dict = Dictionary::with_builtins();
        dict.define_word("foo", vec![Token::Number(5)]);
        dict.define_word("bar", vec![Token::Word("foo".to_string())]);
        dict.define_word("foo", vec![Token::Number(6)]);

        let Some(Operation::UserDefined(bar)) = dict.get("bar") else {
            panic!("bar should be user-defined");
        };
        let Some(Operation::UserDefined(old_foo)) = bar.scope.get("foo") else {
            panic!("bar's scope should hold the first foo");
        };
        assert_eq!(old_foo.body, vec![Token::Number(5)]);
        assert!(!old_foo.scope.contains("foo"));
        assert!(!bar.scope.contains("bar"));
    }
}
