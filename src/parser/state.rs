use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use indexmap::{IndexMap, IndexSet};
use crate::grammar::{Grammar, Symbol};
use super::item::{closure, Item};

/// A closed item set and its outgoing transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
  /// sorted, closed
  pub(crate) items: Vec<Item>,
  /// symbol -> index of target state, in sweep order
  pub(crate) transitions: IndexMap<Symbol, u32>,
}

impl State {
  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn transition(&self, symbol: Symbol) -> Option<u32> {
    self.transitions.get(&symbol).copied()
  }

  pub fn transitions(&self) -> impl Iterator<Item = (Symbol, u32)> + '_ {
    self.transitions.iter().map(|(&sym, &target)| (sym, target))
  }
}

/// The canonical collection of item sets. State 0 is the initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
  states: Vec<State>,
}

/// Item sets are identified by their sorted item list.
type StateKey = Vec<Item>;

/// Advances every item of `items` whose next symbol is `symbol` and closes
/// the result. `None` means there is no transition on `symbol`.
pub(crate) fn goto(
  grammar: &Grammar,
  items: &[Item],
  symbol: Symbol,
) -> Option<StateKey> {
  let kernel = items.iter()
    .filter(|item| item.next_symbol() == Some(symbol))
    .map(Item::advance)
    .collect::<BTreeSet<_>>();

  if kernel.is_empty() {
    None
  } else {
    Some(closure(grammar, kernel).into_iter().collect())
  }
}

impl Automaton {
  /// Sweeps every state over all nonterminals and then all terminals
  /// until no new item set appears. States are numbered in discovery
  /// order.
  pub fn build(grammar: &Grammar) -> Automaton {
    let symbols = grammar.nonterms().map(Symbol::Nonterm)
      .chain(grammar.terms().map(Symbol::Term))
      .collect::<Vec<_>>();

    let mut start = BTreeSet::new();
    start.insert(Item::start(grammar.start()));

    let mut keys: IndexSet<StateKey> = IndexSet::new();
    keys.insert(closure(grammar, start).into_iter().collect());

    let mut transitions = Vec::new();
    let mut id = 0;
    while let Some(items) = keys.get_index(id) {
      let targets = symbols.iter()
        .filter_map(|&sym| goto(grammar, items, sym).map(|key| (sym, key)))
        .collect::<Vec<_>>();

      let mut trans = IndexMap::new();
      for (sym, key) in targets {
        let (target, is_new) = keys.insert_full(key);
        if is_new {
          log::trace!("state {} = goto({}, {})", target, id, sym);
        }
        trans.insert(sym, target as u32);
      }
      transitions.push(trans);
      id += 1;
    }

    log::debug!("built {} states", keys.len());

    let states = keys.into_iter()
      .zip(transitions)
      .map(|(items, transitions)| State { items, transitions })
      .collect();

    Automaton { states }
  }

  pub fn states(&self) -> &[State] {
    &self.states
  }

  pub fn state(&self, id: u32) -> Option<&State> {
    self.states.get(id as usize)
  }

  pub fn len(&self) -> usize {
    self.states.len()
  }

  /// Always false for a built automaton; pairs with `len`.
  pub fn is_empty(&self) -> bool {
    self.states.is_empty()
  }

  pub fn transition(&self, id: u32, symbol: Symbol) -> Option<u32> {
    self.state(id).and_then(|state| state.transition(symbol))
  }
}

impl Display for Automaton {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    for (id, state) in self.states.iter().enumerate() {
      write!(f, "{}:", id)?;
      for (i, item) in state.items.iter().enumerate() {
        let sep = if i == 0 { " " } else { ", " };
        write!(f, "{}{}", sep, item)?;
      }
      if !state.transitions.is_empty() {
        f.write_str(" |")?;
        for (sym, target) in state.transitions() {
          write!(f, " {}:{}", sym, target)?;
        }
      }
      writeln!(f)?;
    }
    Ok(())
  }
}
