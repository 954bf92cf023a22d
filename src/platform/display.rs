//! Text output abstraction

/// Where frames and messages go
pub trait DisplaySink {
    /// Replace the screen contents with `frame`
    fn clear_and_write(&mut self, frame: &str);

    /// Append one line below whatever is on screen
    fn write_line(&mut self, line: &str);
}
