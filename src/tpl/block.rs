/// Open conditional blocks of a single render.
///
/// Output is kept only while no open block evaluated to false, so instead of
/// re-checking every ancestor the stack keeps a count of its false entries.
#[derive(Debug, Default)]
pub(crate) struct BlockStack {
    open: Vec<bool>,
    suppressed: usize,
}

impl BlockStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cond: bool) {
        if !cond {
            self.suppressed += 1;
        }
        self.open.push(cond);
    }

    /// Closes the innermost block, or returns `None` if nothing is open.
    pub fn pop(&mut self) -> Option<bool> {
        let cond = self.open.pop()?;
        if !cond {
            self.suppressed -= 1;
        }
        Some(cond)
    }

    pub fn is_emitting(&self) -> bool {
        self.suppressed == 0
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }
}
