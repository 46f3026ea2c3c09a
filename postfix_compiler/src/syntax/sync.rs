use crate::tokens::TokenKind;

/// Tokens at which panic-mode recovery stops skipping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSet(&'static [TokenKind]);

impl SyncSet {
    /// `;`, `.` and end of input
    pub const fn statement_boundary() -> Self {
        Self(&[TokenKind::Semicolon, TokenKind::Period, TokenKind::EndOfFile])
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.0.contains(&kind)
    }
}

impl Default for SyncSet {
    fn default() -> Self {
        Self::statement_boundary()
    }
}
