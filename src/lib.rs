//! LR automaton construction and table-driven recognition for grammars
//! written as `LHS->RHS` rules over single letters: uppercase letters are
//! nonterminals, lowercase letters are terminals, `S` is the start symbol.
//!
//! ```
//! let parser = lrtab::build(["S->AB", "A->a", "B->b"]).unwrap();
//! assert!(parser.recognize("ab"));
//! assert!(!parser.recognize("ba"));
//! ```

pub mod error;
pub mod grammar;
pub mod parser;

pub use error::GrammarFormatError;
pub use grammar::{Grammar, Rule, Symbol};
pub use parser::Parser;

/// Reads the rules and builds the automaton and its tables.
pub fn build<I, R>(
  rules: I,
) -> Result<Parser, GrammarFormatError>
where
  I: IntoIterator<Item = R>,
  R: AsRef<str>,
{
  Ok(Parser::new(Grammar::new(rules)?))
}

/// Builds the tables for `rules` and checks `input` against them.
pub fn accepts<I, R>(
  rules: I,
  input: &str,
) -> Result<bool, GrammarFormatError>
where
  I: IntoIterator<Item = R>,
  R: AsRef<str>,
{
  Ok(build(rules)?.recognize(input))
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  struct Case {
    rules: &'static [&'static str],
    input: &'static str,
    expected: bool,
  }

  const CASES: &[Case] = &[
    Case { rules: &["S->AB", "A->a", "B->b"], input: "ab", expected: true },
    Case { rules: &["S->AB", "S->", "A->a", "B->b"], input: "", expected: true },
    Case { rules: &["S->AB", "A->BC", "A->a", "B->b", "C->c"], input: "abc", expected: false },
    Case { rules: &["S->AB", "S->", "A->a", "B->b", "B->AA"], input: "aaaa", expected: false },
    Case { rules: &["S->AB", "A->a", "B->b"], input: "x", expected: false },
    Case { rules: &["S->AB", "A->BC", "A->a", "B->b", "C->c"], input: "ab", expected: true },
    Case { rules: &["S->AB", "A->BC", "A->a", "B->b", "C->c"], input: "bcb", expected: true },
  ];

  #[test]
  fn fixtures() {
    let _ = env_logger::builder().is_test(true).try_init();

    for case in CASES {
      assert_eq!(
        accepts(case.rules, case.input),
        Ok(case.expected),
        "rules {:?}, input {:?}", case.rules, case.input,
      );
    }
  }

  #[test]
  fn repeated_calls_agree() {
    for case in CASES {
      let parser = build(case.rules).unwrap();
      let first = parser.recognize(case.input);
      for _ in 0..3 {
        assert_eq!(parser.recognize(case.input), first);
        assert_eq!(accepts(case.rules, case.input), Ok(first));
      }
    }
  }

  #[test]
  fn foreign_characters_are_rejected() {
    for case in CASES {
      for input in ["x", "Z", "a?", "#", "\u{e9}"] {
        let with_foreign = format!("{}{}", case.input, input);
        assert_eq!(accepts(case.rules, &with_foreign), Ok(false));
      }
    }
  }

  #[test]
  fn epsilon_start_only_accepts_empty_input() {
    let parser = build(["S->AB", "S->", "A->a", "B->b"]).unwrap();

    assert!(parser.recognize(""));
    // the empty production of `S` is reduced before `a` can be shifted
    assert!(!parser.recognize("ab"));
  }

  #[test]
  fn malformed_rule() {
    assert_eq!(build(["S-A"]).unwrap_err(), GrammarFormatError::MissingSeparator {
      rule: "S-A".to_owned(),
    });
    assert_eq!(accepts(["S->a", "S-A"], "a"), Err(GrammarFormatError::MissingSeparator {
      rule: "S-A".to_owned(),
    }));
  }

  #[test]
  fn no_rules() {
    assert_eq!(accepts(Vec::<String>::new(), ""), Ok(false));
    assert_eq!(accepts(["A->a"], "a"), Ok(false));
  }
}
