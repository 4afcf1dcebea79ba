//! Code fence tracking for line-based preprocessing.
//!
//! Admonition markers (`!!!`) and `[TOC]` lines inside fenced code blocks must
//! stay literal, so the preprocessor asks the tracker before rewriting a line.

/// Tracks code fence state during line-by-line processing.
///
/// Fences use backticks or tildes (three or more). The closing fence must use
/// the same character and be at least as long as the opening fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line; returns `true` when the line opens or closes a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        match self.open {
            Some((ch, len)) => {
                let closes = fence_run(trimmed).is_some_and(|(c, n)| {
                    c == ch && n >= len && trimmed[n..].trim().is_empty()
                });
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = fence_run(trimmed);
                self.open.is_some()
            }
        }
    }
}

/// Leading run of three or more fence characters.
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    // Fence characters are ASCII, so the char count equals the byte length.
    let count = trimmed.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}
