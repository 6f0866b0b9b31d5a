use std::fmt::{self, Display, Formatter};
use indexmap::IndexSet;
use crate::grammar::{Grammar, Symbol};
use super::item::Lhs;
use super::state::Automaton;

/// An input column of the action table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lookahead {
  Term(char),
  /// end of input
  End,
}

impl Display for Lookahead {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Lookahead::Term(c) => write!(f, "{}", c),
      Lookahead::End => f.write_str("$"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
  Shift(u32),
  /// Reduce by production number `rule` of `lhs`.
  Reduce {
    lhs: char,
    rule: usize,
  },
  Accept,
  #[default]
  Error,
}

impl Display for Action {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Action::Shift(target) => write!(f, "s{}", target),
      Action::Reduce { lhs, rule } => write!(f, "r({},{})", lhs, rule),
      Action::Accept => f.write_str("acc"),
      Action::Error => f.write_str("."),
    }
  }
}

/// A cell that held a non-error action and was written again with a
/// different one. The later write is the one kept in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
  pub state: u32,
  pub lookahead: Lookahead,
  pub overwritten: Action,
  pub action: Action,
}

impl Display for Conflict {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "state {} on {}: {} replaced by {}",
      self.state, self.lookahead, self.overwritten, self.action)
  }
}

/// Terminal-driven actions, one row per state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTable {
  /// terminals in ascending order, then `End`
  columns: IndexSet<Lookahead>,
  rows: Vec<Vec<Action>>,
}

impl ActionTable {
  fn new(grammar: &Grammar, num_states: usize) -> ActionTable {
    let columns = grammar.terms().map(Lookahead::Term)
      .chain(Some(Lookahead::End))
      .collect::<IndexSet<_>>();
    let rows = vec![vec![Action::Error; columns.len()]; num_states];
    ActionTable { columns, rows }
  }

  pub fn columns(&self) -> impl Iterator<Item = Lookahead> + '_ {
    self.columns.iter().copied()
  }

  pub fn num_states(&self) -> usize {
    self.rows.len()
  }

  /// `None` if `lookahead` is not a column, i.e. outside the alphabet.
  pub fn get(&self, state: u32, lookahead: Lookahead) -> Option<Action> {
    let col = self.columns.get_index_of(&lookahead)?;
    self.rows.get(state as usize).map(|row| row[col])
  }

  fn set(
    &mut self,
    conflicts: &mut Vec<Conflict>,
    state: u32,
    lookahead: Lookahead,
    action: Action,
  ) {
    let col = match self.columns.get_index_of(&lookahead) {
      Some(col) => col,
      None => return,
    };
    let cell = &mut self.rows[state as usize][col];
    if *cell != Action::Error && *cell != action {
      let conflict = Conflict {
        state,
        lookahead,
        overwritten: *cell,
        action,
      };
      log::trace!("conflict: {}", conflict);
      conflicts.push(conflict);
    }
    *cell = action;
  }
}

/// Nonterminal-driven transitions, one row per state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GotoTable {
  /// nonterminals in ascending order
  columns: IndexSet<char>,
  rows: Vec<Vec<Option<u32>>>,
}

impl GotoTable {
  fn new(grammar: &Grammar, num_states: usize) -> GotoTable {
    let columns = grammar.nonterms().collect::<IndexSet<_>>();
    let rows = vec![vec![None; columns.len()]; num_states];
    GotoTable { columns, rows }
  }

  pub fn columns(&self) -> impl Iterator<Item = char> + '_ {
    self.columns.iter().copied()
  }

  pub fn get(&self, state: u32, nonterm: char) -> Option<u32> {
    let col = self.columns.get_index_of(&nonterm)?;
    self.rows.get(state as usize).and_then(|row| row[col])
  }

  fn set(&mut self, state: u32, nonterm: char, target: u32) {
    if let Some(col) = self.columns.get_index_of(&nonterm) {
      self.rows[state as usize][col] = Some(target);
    }
  }
}

/// Fills both tables from the finished automaton.
///
/// Items are visited in their sorted order and a later write to a cell
/// replaces an earlier one. A completed item reduces on every column,
/// regardless of what could actually follow its left side.
pub(crate) fn gen_tables(
  grammar: &Grammar,
  automaton: &Automaton,
) -> (ActionTable, GotoTable, Vec<Conflict>) {
  let mut actions = ActionTable::new(grammar, automaton.len());
  let mut gotos = GotoTable::new(grammar, automaton.len());
  let mut conflicts = Vec::new();
  let columns = actions.columns().collect::<Vec<_>>();

  for (id, state) in automaton.states().iter().enumerate() {
    let id = id as u32;
    for item in state.items() {
      match (item.next_symbol(), item.lhs()) {
        (None, Lhs::Start) => {
          actions.set(&mut conflicts, id, Lookahead::End, Action::Accept);
        }
        (None, Lhs::Nonterm(lhs)) => {
          let rule = match grammar.rule_index(lhs, item.rhs()) {
            Some(rule) => rule,
            None => continue,
          };
          let action = Action::Reduce { lhs, rule };
          for &lookahead in &columns {
            actions.set(&mut conflicts, id, lookahead, action);
          }
        }
        (Some(sym), _) => {
          let target = match state.transition(sym) {
            Some(target) => target,
            None => continue,
          };
          match sym {
            Symbol::Term(c) => {
              actions.set(&mut conflicts, id, Lookahead::Term(c), Action::Shift(target));
            }
            Symbol::Nonterm(c) => gotos.set(id, c, target),
          }
        }
      }
    }
  }

  log::debug!("filled {} x {} action table with {} conflicts",
    actions.num_states(), columns.len(), conflicts.len());

  (actions, gotos, conflicts)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn tables(rules: &[&str]) -> (ActionTable, GotoTable, Vec<Conflict>) {
    let grammar = Grammar::new(rules).unwrap();
    let automaton = Automaton::build(&grammar);
    gen_tables(&grammar, &automaton)
  }

  #[test]
  fn simple() {
    let (actions, gotos, conflicts) = tables(&["S->AB", "A->a", "B->b"]);

    assert_eq!(actions.columns().collect::<Vec<_>>(),
      vec![Lookahead::Term('a'), Lookahead::Term('b'), Lookahead::End]);
    assert_eq!(actions.get(0, Lookahead::Term('a')), Some(Action::Shift(3)));
    assert_eq!(actions.get(0, Lookahead::Term('b')), Some(Action::Error));
    assert_eq!(actions.get(2, Lookahead::End), Some(Action::Accept));
    assert_eq!(actions.get(4, Lookahead::Term('b')),
      Some(Action::Reduce { lhs: 'S', rule: 0 }));
    assert_eq!(actions.get(0, Lookahead::Term('x')), None);
    assert_eq!(actions.get(6, Lookahead::End), None);

    assert_eq!(gotos.get(0, 'A'), Some(1));
    assert_eq!(gotos.get(0, 'S'), Some(2));
    assert_eq!(gotos.get(0, 'B'), None);
    assert_eq!(gotos.get(1, 'B'), Some(4));
    assert_eq!(gotos.get(1, 'Z'), None);

    assert!(conflicts.is_empty());
  }

  #[test]
  fn epsilon_reduce_overwrites_shift() {
    let (actions, _, conflicts) = tables(&["S->AB", "S->", "A->a", "B->b"]);

    let reduce = Action::Reduce { lhs: 'S', rule: 1 };
    assert_eq!(actions.get(0, Lookahead::Term('a')), Some(reduce));
    assert_eq!(actions.get(0, Lookahead::Term('b')), Some(reduce));
    assert_eq!(actions.get(0, Lookahead::End), Some(reduce));

    assert_eq!(conflicts, vec![Conflict {
      state: 0,
      lookahead: Lookahead::Term('a'),
      overwritten: Action::Shift(3),
      action: reduce,
    }]);
  }

  #[test]
  fn reduce_overwrites_accept() {
    let (actions, _, conflicts) = tables(&["S->S", "S->a"]);

    assert_eq!(actions.get(1, Lookahead::End),
      Some(Action::Reduce { lhs: 'S', rule: 0 }));
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].to_string(), "state 1 on $: acc replaced by r(S,0)");
  }

  #[test]
  fn later_reduce_wins_reduce_reduce() {
    let (actions, _, conflicts) = tables(&["S->B", "S->A", "A->a", "B->a"]);

    // state 4 holds `A -> a.` and `B -> a.`, visited in that order
    let reduce = Action::Reduce { lhs: 'B', rule: 0 };
    assert_eq!(actions.get(4, Lookahead::Term('a')), Some(reduce));
    assert_eq!(actions.get(4, Lookahead::End), Some(reduce));

    assert_eq!(conflicts.iter().map(|c| c.to_string()).collect::<Vec<_>>(), vec![
      "state 4 on a: r(A,0) replaced by r(B,0)",
      "state 4 on $: r(A,0) replaced by r(B,0)",
    ]);
    assert_eq!(crate::accepts(["S->B", "S->A", "A->a", "B->a"], "a"), Ok(true));
  }

  #[test]
  fn default_action_is_error() {
    assert_eq!(Action::default(), Action::Error);
  }

  #[test]
  fn rule_numbers_follow_input_order() {
    let (actions, _, _) = tables(&["S->AB", "A->BC", "A->a", "B->b", "C->c"]);

    // state 4 is `A -> a.`, state 7 is `A -> BC.`
    assert_eq!(actions.get(4, Lookahead::End), Some(Action::Reduce { lhs: 'A', rule: 1 }));
    assert_eq!(actions.get(7, Lookahead::End), Some(Action::Reduce { lhs: 'A', rule: 0 }));
  }
}
