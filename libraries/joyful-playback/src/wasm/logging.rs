//! Browser console logging
//!
//! Routes `tracing` output to `console.log` and panics to `console.error`.

use std::io;
use std::sync::Once;

static INIT: Once = Once::new();

/// Install the panic hook and console subscriber (once per page)
pub(crate) fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();

        let _ = tracing_subscriber::fmt()
            .with_writer(ConsoleWriter::default)
            .without_time()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Buffers one formatted event and logs it when dropped
#[derive(Default)]
struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer);
        web_sys::console::log_1(&line.trim_end().into());
    }
}
