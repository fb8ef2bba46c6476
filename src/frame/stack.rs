use crate::foundation::error::{FrameError, FrameResult};
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

/// Double-ended sequence used as a LIFO stack.
///
/// An item's destructor is its `Drop`: popping hands ownership back to the caller, and tearing the
/// stack down (via [`Stack::clear`] or by dropping it) drops every remaining item exactly once.
pub struct Stack<T> {
    items: VecDeque<T>,
}

impl<T> Stack<T> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Push onto the top.
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Pop the most recently pushed item.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Borrow the most recently pushed item.
    pub fn peek(&self) -> Option<&T> {
        self.items.back()
    }

    /// Borrow the oldest item.
    pub fn bottom(&self) -> Option<&T> {
        self.items.front()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return `true` when the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every item, top first.
    pub fn clear(&mut self) {
        while self.items.pop_back().is_some() {}
    }

    /// Pop the top item if `take` accepts it; otherwise put it back and report what was found.
    pub(crate) fn pop_matching<U>(
        &mut self,
        stack: &str,
        expected: &str,
        kind: impl Fn(&T) -> &'static str,
        take: impl FnOnce(T) -> Result<U, T>,
    ) -> FrameResult<Option<U>> {
        let Some(item) = self.pop() else {
            return Ok(None);
        };
        match take(item) {
            Ok(value) => Ok(Some(value)),
            Err(item) => {
                let found = kind(&item);
                self.push(item);
                Err(FrameError::stack_mismatch(format!(
                    "expected {expected} on top of the {stack} stack, found {found}"
                )))
            }
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("len", &self.items.len()).finish()
    }
}

/// Entry on the image or audio stack: a processing step, or stage-local data a step pushed for
/// its own later use.
pub enum StackItem<S> {
    /// A processing step.
    Step(S),
    /// Opaque stage-local data.
    Data(Box<dyn Any + Send>),
}

impl<S> StackItem<S> {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Step(_) => "a processing step",
            Self::Data(_) => "stage data",
        }
    }
}

impl<S> Stack<StackItem<S>> {
    /// Pop a processing step; stage data on top is a mismatch and stays in place.
    pub(crate) fn pop_step(&mut self, stack: &str) -> FrameResult<Option<S>> {
        self.pop_matching(stack, "a processing step", StackItem::kind, |item| match item {
            StackItem::Step(step) => Ok(step),
            other => Err(other),
        })
    }

    /// Pop stage data of type `T`; anything else on top is a mismatch and stays in place.
    pub(crate) fn pop_data<T: Any + Send>(&mut self, stack: &str) -> FrameResult<Option<Box<T>>> {
        let expected = format!("stage data of type {}", std::any::type_name::<T>());
        self.pop_matching(stack, &expected, StackItem::kind, |item| match item {
            StackItem::Data(data) => data.downcast::<T>().map_err(StackItem::Data),
            other => Err(other),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/stack.rs"]
mod tests;
