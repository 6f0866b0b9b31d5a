use std::iter;
use super::Parser;
use super::table::{Action, Lookahead};

/// Catches reductions that would repeat forever on one lookahead.
///
/// Between two shifts the recognizer only reduces, and each reduction is
/// fully determined by the exposed state, the left side, and whatever
/// lies deeper in the stack. `seen[d]` holds the `(state, lhs)` pairs
/// reduced through at depth `d` since the last time anything below `d`
/// was exposed. Meeting one of them again at the same or a greater depth
/// means the run has entered a cycle.
#[derive(Default)]
struct ReductionGuard {
  seen: Vec<Vec<(u32, char)>>,
}

impl ReductionGuard {
  fn clear(&mut self) {
    self.seen.clear();
  }

  /// Returns false when the reduction repeats an earlier one.
  fn observe(&mut self, depth: usize, state: u32, lhs: char) -> bool {
    self.seen.truncate(depth + 1);
    if self.seen.iter().any(|level| level.contains(&(state, lhs))) {
      return false;
    }
    if self.seen.len() <= depth {
      self.seen.resize_with(depth + 1, Vec::new);
    }
    self.seen[depth].push((state, lhs));
    true
  }
}

pub(super) fn recognize(
  parser: &Parser,
  input: &str,
) -> bool {
  let mut stack: Vec<u32> = vec![0];
  let mut guard = ReductionGuard::default();
  let mut symbols = input.chars()
    .map(Lookahead::Term)
    .chain(iter::once(Lookahead::End))
    .peekable();

  while let Some(&lookahead) = symbols.peek() {
    let state = match stack.last() {
      Some(&state) => state,
      None => return false,
    };

    if let Lookahead::Term(c) = lookahead {
      if !parser.grammar().is_term(c) {
        log::trace!("`{}` is not a terminal", c);
        return false;
      }
    }

    let action = match parser.actions().get(state, lookahead) {
      Some(action) => action,
      None => return false,
    };

    match action {
      Action::Shift(target) => {
        log::trace!("{} on {}: shift {}", state, lookahead, target);
        stack.push(target);
        symbols.next();
        guard.clear();
      }

      Action::Reduce { lhs, rule } => {
        let len = match parser.grammar().production(lhs, rule) {
          Some(rhs) => rhs.len(),
          None => return false,
        };
        if len >= stack.len() {
          return false;
        }
        stack.truncate(stack.len() - len);

        let depth = stack.len() - 1;
        let exposed = stack[depth];
        if !guard.observe(depth, exposed, lhs) {
          log::debug!("reductions on {} repeat forever", lookahead);
          return false;
        }

        match parser.gotos().get(exposed, lhs) {
          Some(target) => {
            log::trace!("{} on {}: reduce ({}, {}), goto {}",
              state, lookahead, lhs, rule, target);
            stack.push(target);
          }
          None => return false,
        }
      }

      // `End` is the only column that can hold `Accept`, so the whole
      // input has been consumed here.
      Action::Accept => {
        log::trace!("{} on {}: accept", state, lookahead);
        return lookahead == Lookahead::End;
      }

      Action::Error => {
        log::trace!("{} on {}: error", state, lookahead);
        return false;
      }
    }
  }

  false
}
