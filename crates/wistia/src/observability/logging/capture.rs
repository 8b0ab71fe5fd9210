use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs the closure with a subscriber that records everything down to `TRACE`
/// on the current thread, and returns the formatted log output along with the
/// closure's result.
pub(crate) fn capture_logs<R>(imp: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(buffer.clone())
        .finish();

    let output = tracing::subscriber::with_default(subscriber, imp);
    let logs = String::from_utf8_lossy(&buffer.0.lock()).into_owned();

    (output, logs)
}
