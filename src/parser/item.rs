use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use crate::grammar::{Grammar, Symbol};

/// Left side of an item. `Start` is the augmented start production and
/// orders before every nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lhs {
  Start,
  Nonterm(char),
}

/// A production with a dot marking how much of it has been matched.
///
/// Items compare by `(lhs, rhs, dot)`; state identity and the order in
/// which table cells are written both follow from this ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
  pub(crate) lhs: Lhs,
  pub(crate) rhs: Arc<[Symbol]>,
  pub(crate) dot: usize,
}

impl Item {
  pub(crate) fn new(
    lhs: Lhs,
    rhs: Arc<[Symbol]>,
    dot: usize,
  ) -> Item {
    debug_assert!(dot <= rhs.len());
    Item { lhs, rhs, dot }
  }

  /// `S' -> .S`
  pub(crate) fn start(start: char) -> Item {
    Item::new(Lhs::Start, Arc::new([Symbol::Nonterm(start)]), 0)
  }

  pub fn lhs(&self) -> Lhs {
    self.lhs
  }

  pub fn rhs(&self) -> &[Symbol] {
    &self.rhs
  }

  pub fn dot(&self) -> usize {
    self.dot
  }

  pub fn is_complete(&self) -> bool {
    self.dot == self.rhs.len()
  }

  /// Symbol right after the dot.
  pub fn next_symbol(&self) -> Option<Symbol> {
    self.rhs.get(self.dot).copied()
  }

  pub(crate) fn advance(&self) -> Item {
    Item::new(self.lhs, self.rhs.clone(), self.dot + 1)
  }
}

impl Display for Item {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self.lhs {
      Lhs::Start => {
        for sym in self.rhs.iter() {
          write!(f, "{}'", sym)?;
        }
      }
      Lhs::Nonterm(c) => write!(f, "{}", c)?,
    }
    f.write_str(" -> ")?;
    for (i, sym) in self.rhs.iter().enumerate() {
      if i == self.dot {
        f.write_str(".")?;
      }
      write!(f, "{}", sym)?;
    }
    if self.is_complete() {
      f.write_str(".")?;
    }
    Ok(())
  }
}

/// Adds `N -> .rhs` for every production of every nonterminal `N` that
/// follows a dot, until nothing new is added.
pub(crate) fn closure(
  grammar: &Grammar,
  items: BTreeSet<Item>,
) -> BTreeSet<Item> {
  let mut set = items;
  let mut pending = set.iter().cloned().collect::<Vec<_>>();

  while let Some(item) = pending.pop() {
    if let Some(Symbol::Nonterm(n)) = item.next_symbol() {
      for rhs in grammar.productions(n) {
        let new_item = Item::new(Lhs::Nonterm(n), rhs.clone(), 0);
        if set.insert(new_item.clone()) {
          pending.push(new_item);
        }
      }
    }
  }

  set
}
