//! Keyboard input abstraction

/// Source of player input
pub trait InputSource {
    /// Next pending key press, without blocking
    fn poll_key(&mut self) -> Option<char>;

    /// Read a full line for a prompt. `None` at end of input.
    fn read_line(&mut self) -> Option<String>;

    /// Switch between per-key (play) and line (prompt) input
    fn set_realtime(&mut self, _enabled: bool) {}
}
