use tracing::warn;

use super::context::{ContextName, FocusState};

/// Focus snapshot taken when an overlay opens, restored on close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalFrame {
    pub context: ContextName,
    pub index: usize,
}

impl From<FocusState> for ModalFrame {
    fn from(f: FocusState) -> Self {
        ModalFrame {
            context: f.context,
            index: f.index,
        }
    }
}

/// Snapshot/restore stack for overlay contexts.
///
/// Only one overlay is open in the current shell except for the power menu,
/// which may stack on top of another overlay; the stack handles arbitrary
/// nesting anyway.
#[derive(Debug, Default)]
pub struct ModalStack {
    frames: Vec<ModalFrame>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self, frame: ModalFrame) {
        self.frames.push(frame);
    }

    /// Pop the most recent frame. Underflow means an engine invariant was
    /// broken somewhere; it is logged and recovered with the home fallback
    /// rather than crashing the shell.
    pub fn pop(&mut self) -> ModalFrame {
        self.frames.pop().unwrap_or_else(|| {
            warn!("modal stack underflow on close; falling back to home");
            ModalFrame {
                context: ContextName::Home,
                index: 0,
            }
        })
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_restores_last_pushed_frame() {
        let mut stack = ModalStack::new();
        stack.push(ModalFrame {
            context: ContextName::Games,
            index: 7,
        });
        stack.push(ModalFrame {
            context: ContextName::MediaOverlay,
            index: 1,
        });
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop().context, ContextName::MediaOverlay);
        assert_eq!(stack.pop().index, 7);
        assert!(!stack.is_open());
    }

    #[test]
    fn underflow_recovers_to_home() {
        let mut stack = ModalStack::new();
        let frame = stack.pop();
        assert_eq!(frame.context, ContextName::Home);
        assert_eq!(frame.index, 0);
    }
}
