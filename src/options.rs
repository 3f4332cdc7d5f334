//! Engine configuration options.

/// Configuration options for a [`GameEngine`](crate::GameEngine).
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::GameOptions;
///
/// let options = GameOptions::default()
///     .with_replace_in_progress(false)
///     .with_resolve_on_exhausted(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Whether starting a game discards a game the player already has.
    pub replace_in_progress: bool,
    /// Whether a hit on an exhausted deck resolves the game as a stand.
    ///
    /// When disabled, the hit fails with
    /// [`ActionError::DeckExhausted`](crate::ActionError::DeckExhausted) and
    /// the game stays stored as it was.
    pub resolve_on_exhausted: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            replace_in_progress: true,
            resolve_on_exhausted: false,
        }
    }
}

impl GameOptions {
    /// Sets whether starting a game replaces one already in progress.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_replace_in_progress(false);
    /// assert_eq!(options.replace_in_progress, false);
    /// ```
    #[must_use]
    pub const fn with_replace_in_progress(mut self, replace: bool) -> Self {
        self.replace_in_progress = replace;
        self
    }

    /// Sets whether a hit on an exhausted deck resolves the game.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_resolve_on_exhausted(true);
    /// assert_eq!(options.resolve_on_exhausted, true);
    /// ```
    #[must_use]
    pub const fn with_resolve_on_exhausted(mut self, resolve: bool) -> Self {
        self.resolve_on_exhausted = resolve;
        self
    }
}
