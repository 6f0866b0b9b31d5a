use std::fmt::{self, Display, Formatter};
use crate::grammar::Grammar;

mod item;
mod recognize;
mod state;
mod table;

pub use item::{Item, Lhs};
pub use state::{Automaton, State};
pub use table::{Action, ActionTable, Conflict, GotoTable, Lookahead};

/// A grammar together with its automaton and tables.
///
/// Everything is built once in [`Parser::new`] and never changes, so a
/// `Parser` can be shared between threads and used for any number of
/// [`recognize`](Parser::recognize) calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parser {
  grammar: Grammar,
  automaton: Automaton,
  actions: ActionTable,
  gotos: GotoTable,
  conflicts: Vec<Conflict>,
}

impl Parser {
  pub fn new(grammar: Grammar) -> Parser {
    let automaton = Automaton::build(&grammar);
    let (actions, gotos, conflicts) = table::gen_tables(&grammar, &automaton);

    Parser {
      grammar,
      automaton,
      actions,
      gotos,
      conflicts,
    }
  }

  /// Whether `input` is in the language. Characters that are not
  /// terminals of the grammar make the answer `false`.
  pub fn recognize(&self, input: &str) -> bool {
    recognize::recognize(self, input)
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  pub fn automaton(&self) -> &Automaton {
    &self.automaton
  }

  pub fn actions(&self) -> &ActionTable {
    &self.actions
  }

  pub fn gotos(&self) -> &GotoTable {
    &self.gotos
  }

  /// Cells that were written more than once while filling the action
  /// table, in write order.
  pub fn conflicts(&self) -> &[Conflict] {
    &self.conflicts
  }
}

/// One line per state: the action row, then the defined goto entries.
impl Display for Parser {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    for id in 0..self.automaton.len() as u32 {
      write!(f, "{}:", id)?;
      for lookahead in self.actions.columns() {
        let action = self.actions.get(id, lookahead).unwrap_or_default();
        write!(f, " {}={}", lookahead, action)?;
      }
      f.write_str(" |")?;
      for nonterm in self.gotos.columns() {
        match self.gotos.get(id, nonterm) {
          Some(target) => write!(f, " {}={}", nonterm, target)?,
          None => write!(f, " {}=.", nonterm)?,
        }
      }
      writeln!(f)?;
    }
    Ok(())
  }
}
