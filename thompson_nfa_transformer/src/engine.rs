use crate::automata::{Automaton, StateAllocator};
use crate::error::ConversionError;
use crate::postfix::PostfixItem;
use crate::token::Operator;
use either::{Left, Right};
use log::debug;

/// Folds a postfix sequence into one automaton over a stack of fragments.
pub struct Construction<'a> {
    allocator: &'a mut StateAllocator,
    /// Each fragment with the offset of its first literal.
    fragments: Vec<(Automaton, usize)>,
    atomic_fragments: usize,
}

impl<'a> Construction<'a> {
    pub fn new(allocator: &'a mut StateAllocator) -> Self {
        Self { allocator, fragments: Vec::new(), atomic_fragments: 0 }
    }

    /// How many literal fragments have been created so far.
    pub fn atomic_fragments(&self) -> usize {
        self.atomic_fragments
    }

    pub fn step(&mut self, item: &PostfixItem) -> Result<(), ConversionError> {
        match *item.item() {
            Left(c) => {
                let fragment = Automaton::atomic(c, self.allocator);
                self.fragments.push((fragment, *item.offset()));
                self.atomic_fragments += 1;
            }
            Right(operator) => {
                let underflow = ConversionError::StackUnderflow {
                    operator: operator.token(),
                    offset: *item.offset(),
                };
                if self.fragments.len() < operator.arity() {
                    return Err(underflow);
                }
                let combined = self.combine(operator).ok_or(underflow)?;
                self.fragments.push(combined);
            }
        }
        Ok(())
    }

    /// Pops the right operand first: it was pushed last.
    fn combine(&mut self, operator: Operator) -> Option<(Automaton, usize)> {
        let (right, right_offset) = self.fragments.pop()?;
        let combined = match operator {
            Operator::Star => (right.star(self.allocator), right_offset),
            Operator::Concat => {
                let (left, left_offset) = self.fragments.pop()?;
                (left.connect(right), left_offset)
            }
            Operator::Alternate => {
                let (left, left_offset) = self.fragments.pop()?;
                (left.union(right, self.allocator), left_offset)
            }
        };
        Some(combined)
    }

    pub fn finish(mut self) -> Result<Automaton, ConversionError> {
        match self.fragments.len() {
            0 => Err(ConversionError::EmptyExpression),
            1 => self
                .fragments
                .pop()
                .map(|(automaton, _)| automaton)
                .ok_or(ConversionError::EmptyExpression),
            count => Err(ConversionError::DanglingOperands {
                count,
                offset: self.fragments[1].1,
            }),
        }
    }
}

pub fn build(
    postfix: &[PostfixItem],
    allocator: &mut StateAllocator,
) -> Result<Automaton, ConversionError> {
    let mut construction = Construction::new(allocator);
    for item in postfix {
        construction.step(item)?;
    }
    debug!("{} atomic fragments", construction.atomic_fragments());
    construction.finish()
}
