use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use indexmap::IndexMap;
use crate::error::GrammarFormatError;

/// Separator between the left and right side of a rule.
pub const SEPARATOR: &str = "->";

/// Start nonterminal used by [`Grammar::new`].
pub const DEFAULT_START: char = 'S';

/// A grammar symbol.
///
/// Nonterminals order before terminals, the same way uppercase letters
/// order before lowercase ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
  Nonterm(char),
  Term(char),
}

impl Symbol {
  pub fn classify(c: char) -> Option<Symbol> {
    if c.is_ascii_uppercase() {
      Some(Symbol::Nonterm(c))
    } else if c.is_ascii_lowercase() {
      Some(Symbol::Term(c))
    } else {
      None
    }
  }

  pub fn as_char(self) -> char {
    match self {
      Symbol::Nonterm(c) | Symbol::Term(c) => c,
    }
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.as_char())
  }
}

/// One production, `lhs -> rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
  pub lhs: char,
  pub rhs: Vec<Symbol>,
}

impl Rule {
  pub fn parse(
    text: &str,
  ) -> Result<Rule, GrammarFormatError> {
    let (lhs, rhs) = text.split_once(SEPARATOR)
      .ok_or_else(|| GrammarFormatError::MissingSeparator {
        rule: text.to_owned(),
      })?;

    let mut lhs_chars = lhs.chars();
    let lhs = match (lhs_chars.next(), lhs_chars.next()) {
      (Some(c), None) if c.is_ascii_uppercase() => c,
      _ => return Err(GrammarFormatError::InvalidLeftSide {
        rule: text.to_owned(),
      }),
    };

    let rhs = rhs.chars()
      .map(|c| Symbol::classify(c).ok_or_else(|| {
        GrammarFormatError::InvalidSymbol {
          rule: text.to_owned(),
          symbol: c,
        }
      }))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Rule { lhs, rhs })
  }
}

/// Productions grouped by left side, plus the two alphabets.
///
/// Right sides of the same nonterminal keep their input order; a
/// right side's position in that list is its rule number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
  start: char,
  prods: IndexMap<char, Vec<Arc<[Symbol]>>>,
  terms: BTreeSet<char>,
  nonterms: BTreeSet<char>,
}

impl Grammar {
  /// Reads `rules` with `S` as the start symbol.
  pub fn new<I, R>(
    rules: I,
  ) -> Result<Grammar, GrammarFormatError>
  where
    I: IntoIterator<Item = R>,
    R: AsRef<str>,
  {
    Grammar::with_start(rules, DEFAULT_START)
  }

  pub fn with_start<I, R>(
    rules: I,
    start: char,
  ) -> Result<Grammar, GrammarFormatError>
  where
    I: IntoIterator<Item = R>,
    R: AsRef<str>,
  {
    let mut grammar = Grammar {
      start,
      prods: IndexMap::new(),
      terms: BTreeSet::new(),
      nonterms: BTreeSet::new(),
    };

    for text in rules {
      let rule = Rule::parse(text.as_ref())?;
      grammar.add(rule);
    }

    if !grammar.prods.contains_key(&start) {
      log::warn!("no production for start symbol `{}`", start);
    }

    Ok(grammar)
  }

  fn add(&mut self, rule: Rule) {
    self.nonterms.insert(rule.lhs);
    for sym in &rule.rhs {
      match *sym {
        Symbol::Nonterm(c) => self.nonterms.insert(c),
        Symbol::Term(c) => self.terms.insert(c),
      };
    }
    self.prods.entry(rule.lhs)
      .or_insert_with(Vec::new)
      .push(rule.rhs.into());
  }

  pub fn start(&self) -> char {
    self.start
  }

  /// Terminals in ascending order.
  pub fn terms(&self) -> impl Iterator<Item = char> + '_ {
    self.terms.iter().copied()
  }

  /// Nonterminals in ascending order, including ones without productions.
  pub fn nonterms(&self) -> impl Iterator<Item = char> + '_ {
    self.nonterms.iter().copied()
  }

  pub fn is_term(&self, c: char) -> bool {
    self.terms.contains(&c)
  }

  pub fn productions(&self, nonterm: char) -> &[Arc<[Symbol]>] {
    self.prods.get(&nonterm).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn production(&self, nonterm: char, rule: usize) -> Option<&[Symbol]> {
    self.productions(nonterm).get(rule).map(|rhs| &**rhs)
  }

  /// Rule number of the first production of `nonterm` equal to `rhs`.
  pub fn rule_index(&self, nonterm: char, rhs: &[Symbol]) -> Option<usize> {
    self.productions(nonterm).iter().position(|p| &**p == rhs)
  }
}
