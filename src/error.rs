use thiserror::Error;

/// A rule string that cannot be read as `LHS->RHS`.
///
/// Returned by [`Rule::parse`](crate::grammar::Rule::parse) and everything
/// built on top of it. No automaton is constructed once a rule fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarFormatError {
  #[error("rule `{rule}` has no `->` separator")]
  MissingSeparator {
    rule: String,
  },

  #[error("rule `{rule}` must have a single uppercase letter left of `->`")]
  InvalidLeftSide {
    rule: String,
  },

  #[error("rule `{rule}` contains `{symbol}`, which is neither a terminal nor a nonterminal")]
  InvalidSymbol {
    rule: String,
    symbol: char,
  },
}
