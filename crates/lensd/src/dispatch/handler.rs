//! Line-delimited request serving.
//!
//! The handler reads one request document per line from a byte stream,
//! dispatches it and writes the answer followed by a newline. Lines longer
//! than the request limit are drained and answered with the sentinel.

use std::io::{self, BufRead, Read, Write};

use tracing::{debug, warn};

use super::dispatcher::Dispatcher;
use super::registry::DISPATCH_TARGET;
use super::request::MAX_REQUEST_BYTES;

/// Serves newline-delimited requests from a reader to a writer.
#[derive(Clone)]
pub struct LineHandler {
    dispatcher: Dispatcher,
}

impl LineHandler {
    /// Creates a handler dispatching through `dispatcher`.
    #[must_use]
    pub const fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Answers requests until `reader` reaches end of input.
    ///
    /// Blank lines are ignored. Returns the number of requests answered.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing the stream fails.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> io::Result<usize> {
        let mut answered = 0;
        let mut line = Vec::new();

        while read_request_line(&mut reader, &mut line)? {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let answer = self.dispatcher.handle(&line);
            writer.write_all(answer.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            answered += 1;
        }

        debug!(target: DISPATCH_TARGET, answered, "input closed");
        Ok(answered)
    }
}

/// Longest line kept in memory: a full document plus a CRLF delimiter.
const MAX_LINE_BYTES: usize = MAX_REQUEST_BYTES + 2;

/// Reads the next line into `line`, keeping at most [`MAX_LINE_BYTES`].
///
/// Returns `false` at end of input. Any remainder of an oversized line is
/// consumed so the next call starts on a fresh request.
fn read_request_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<bool> {
    line.clear();
    let limit = u64::try_from(MAX_LINE_BYTES).unwrap_or(u64::MAX);
    let read = reader.by_ref().take(limit).read_until(b'\n', line)?;
    if read == 0 {
        return Ok(false);
    }

    if line.len() >= MAX_LINE_BYTES && line.last() != Some(&b'\n') {
        let skipped = reader.skip_until(b'\n')?;
        warn!(
            target: DISPATCH_TARGET,
            size = line.len() + skipped,
            "oversized request line"
        );
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::dispatch::INVALID_REQUEST;
    use crate::gateway::{LocalGateway, MemoryPreferences, StateStore};

    fn handler() -> LineHandler {
        let state = Arc::new(StateStore::default());
        state.set_battery_level(64).expect("battery");
        let gateway = LocalGateway::new(MemoryPreferences::new(), state);
        LineHandler::new(Dispatcher::new(Arc::new(gateway)))
    }

    fn serve(input: &[u8]) -> (usize, Vec<String>) {
        let mut output = Vec::new();
        let answered = handler()
            .serve(Cursor::new(input.to_vec()), &mut output)
            .expect("serve");
        let text = String::from_utf8(output).expect("utf8");
        (answered, text.lines().map(str::to_owned).collect())
    }

    #[test]
    fn answers_each_line() {
        let (answered, lines) = serve(b"{\"action\":\"battery\"}\n42\n{\"action\":\"screen\"}");
        assert_eq!(answered, 3);
        assert_eq!(
            lines,
            vec![
                r#"{"battery":"64"}"#.to_owned(),
                INVALID_REQUEST.to_owned(),
                r#"{"screen":"0"}"#.to_owned(),
            ]
        );
    }

    #[test]
    fn skips_blank_lines() {
        let (answered, lines) = serve(b"\n  \r\n{\"action\":\"battery\"}\n");
        assert_eq!(answered, 1);
        assert_eq!(lines, vec![r#"{"battery":"64"}"#.to_owned()]);
    }

    fn padded_request(size: usize) -> String {
        let head = r#"{"action":"battery","pad":""#;
        let tail = r#""}"#;
        let padding = "x".repeat(size - head.len() - tail.len());
        format!("{head}{padding}{tail}")
    }

    #[rstest]
    #[case::lf("\n")]
    #[case::crlf("\r\n")]
    fn document_at_size_limit_is_answered(#[case] delimiter: &str) {
        let input = format!(
            "{request}{delimiter}{request}{delimiter}",
            request = padded_request(MAX_REQUEST_BYTES)
        );

        let (answered, lines) = serve(input.as_bytes());

        assert_eq!(answered, 2);
        assert_eq!(lines, vec![r#"{"battery":"64"}"#.to_owned(); 2]);
    }

    #[test]
    fn document_one_byte_over_limit_is_rejected() {
        let input = format!(
            "{}\n{{\"action\":\"battery\"}}\n",
            padded_request(MAX_REQUEST_BYTES + 1)
        );

        let (answered, lines) = serve(input.as_bytes());

        assert_eq!(answered, 2);
        assert_eq!(
            lines,
            vec![INVALID_REQUEST.to_owned(), r#"{"battery":"64"}"#.to_owned()]
        );
    }

    #[test]
    fn oversized_line_is_rejected_and_stream_recovers() {
        let mut input = vec![b'['; MAX_REQUEST_BYTES + 10];
        input.extend_from_slice(b"\n{\"action\":\"battery\"}\n");

        let (answered, lines) = serve(&input);

        assert_eq!(answered, 2);
        assert_eq!(
            lines,
            vec![INVALID_REQUEST.to_owned(), r#"{"battery":"64"}"#.to_owned()]
        );
    }
}
