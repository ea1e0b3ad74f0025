//! Configurable print output.
//!
//! The `print` command writes through a handler so output can go to
//! stdout in the CLI or into a buffer for tests. Enum dispatch, no trait
//! objects.

use parking_lot::Mutex;

/// Captures output into a string buffer.
#[derive(Default)]
pub struct BufferPrinter {
    buffer: Mutex<String>,
}

impl BufferPrinter {
    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

pub enum PrintHandler {
    /// Writes to stdout (default).
    Stdout,
    /// Captures to a buffer, for tests.
    Buffer(BufferPrinter),
    /// Discards output.
    Silent,
}

impl PrintHandler {
    pub fn buffer() -> Self {
        PrintHandler::Buffer(BufferPrinter::default())
    }

    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buffer) => buffer.println(msg),
            PrintHandler::Silent => {}
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.output(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let PrintHandler::Buffer(buffer) = self {
            buffer.clear();
        }
    }
}

impl Default for PrintHandler {
    fn default() -> Self {
        PrintHandler::Stdout
    }
}
