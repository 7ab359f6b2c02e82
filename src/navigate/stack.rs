use super::NavigationFrame;

/// Ordered frames, bottom = catalog listing, top = current view.
///
/// Never empty: the root frame cannot be popped.
#[derive(Clone, Debug)]
pub struct NavigationStack {
    frames: Vec<NavigationFrame>,
}

impl NavigationStack {
    pub fn new(root: NavigationFrame) -> Self {
        Self { frames: vec![root] }
    }

    pub fn current(&self) -> &NavigationFrame {
        // The root frame is never removed.
        &self.frames[self.frames.len() - 1]
    }

    pub(super) fn current_mut(&mut self) -> &mut NavigationFrame {
        let top = self.frames.len() - 1;
        &mut self.frames[top]
    }

    pub fn frames(&self) -> &[NavigationFrame] {
        &self.frames
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.frames.len() == 1
    }

    pub(super) fn push(&mut self, frame: NavigationFrame) {
        self.frames.push(frame);
    }

    /// Drops the top frame. Returns false (and does nothing) at the root.
    pub(super) fn pop(&mut self) -> bool {
        if self.is_at_root() {
            return false;
        }
        self.frames.pop();
        true
    }
}
