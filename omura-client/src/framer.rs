//! Response framing
//!
//!     A Gemini response is a header line, `<status><space><meta>\r\n`, followed by the body.
//!     [ResponseFramer] consumes the response in whatever chunks the socket delivers and
//!     reports the header exactly once, as soon as its CRLF arrives.
//!
//! States
//!
//!     Buffering: chunks accumulate until a CRLF shows up. If more than 2048 bytes are
//!     buffered without one, framing fails for good.
//!     PassThrough: after the header, every chunk is body and is handed back untouched.
//!     Failed: every further push fails.

pub const MAX_HEADER_LEN: usize = 2048;

const CRLF: &[u8] = b"\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FramingError {
    #[error("response header too long or CRLF not found")]
    HeaderTooLong,
    #[error("stream ended before a response header was received")]
    MissingHeader,
}

/// The raw header line, before the status code is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    /// Leading decimal digits within the first two bytes, 0 when there are none.
    pub status: u8,
    /// Everything from the fourth byte on, trimmed.
    pub meta: String,
}

impl HeaderLine {
    pub fn parse(line: &[u8]) -> Self {
        let status = line
            .iter()
            .take(2)
            .take_while(|b| b.is_ascii_digit())
            .fold(0u8, |acc, b| acc * 10 + (b - b'0'));
        let meta = line
            .get(3..)
            .map(|rest| String::from_utf8_lossy(rest).trim().to_string())
            .unwrap_or_default();
        Self { status, meta }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Progress<'a> {
    /// No complete header yet.
    NeedMore,
    /// The header line, with the body bytes that arrived in the same chunk.
    Header { header: HeaderLine, body: Vec<u8> },
    /// A chunk of body.
    Body(&'a [u8]),
}

#[derive(Debug)]
enum State {
    Buffering(Vec<u8>),
    PassThrough,
    Failed,
}

#[derive(Debug)]
pub struct ResponseFramer {
    state: State,
}

impl ResponseFramer {
    pub fn new() -> Self {
        Self {
            state: State::Buffering(Vec::new()),
        }
    }

    pub fn push<'a>(&mut self, chunk: &'a [u8]) -> Result<Progress<'a>, FramingError> {
        let buffer = match &mut self.state {
            State::PassThrough => return Ok(Progress::Body(chunk)),
            State::Failed => return Err(FramingError::HeaderTooLong),
            State::Buffering(buffer) => buffer,
        };

        // a CR at the end of the previous chunk may pair with an LF at the start of this one
        let search_from = buffer.len().saturating_sub(1);
        buffer.extend_from_slice(chunk);

        match find_crlf(buffer, search_from) {
            Some(at) => {
                let header = HeaderLine::parse(&buffer[..at]);
                let body = buffer[at + CRLF.len()..].to_vec();
                self.state = State::PassThrough;
                Ok(Progress::Header { header, body })
            }
            None if buffer.len() > MAX_HEADER_LEN => {
                self.state = State::Failed;
                Err(FramingError::HeaderTooLong)
            }
            None => Ok(Progress::NeedMore),
        }
    }

    /// Signal the end of the stream.
    pub fn finish(self) -> Result<(), FramingError> {
        match self.state {
            State::PassThrough => Ok(()),
            State::Buffering(_) => Err(FramingError::MissingHeader),
            State::Failed => Err(FramingError::HeaderTooLong),
        }
    }

    pub fn header_received(&self) -> bool {
        matches!(self.state, State::PassThrough)
    }
}

impl Default for ResponseFramer {
    fn default() -> Self {
        Self::new()
    }
}

fn find_crlf(buffer: &[u8], from: usize) -> Option<usize> {
    buffer[from..]
        .windows(CRLF.len())
        .position(|window| window == CRLF)
        .map(|at| from + at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_header_and_body_in_one_chunk() {
        let mut framer = ResponseFramer::new();
        let progress = framer.push(b"20 text/gemini\r\n# Hi\n").unwrap();
        assert_eq!(
            progress,
            Progress::Header {
                header: HeaderLine {
                    status: 20,
                    meta: "text/gemini".into()
                },
                body: b"# Hi\n".to_vec(),
            }
        );
        assert_eq!(framer.push(b"more").unwrap(), Progress::Body(b"more"));
        assert!(framer.finish().is_ok());
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        let mut framer = ResponseFramer::new();
        assert_eq!(framer.push(b"31 gemini://x/\r").unwrap(), Progress::NeedMore);
        let Progress::Header { header, body } = framer.push(b"\nrest").unwrap() else {
            panic!("expected header");
        };
        assert_eq!(header.status, 31);
        assert_eq!(header.meta, "gemini://x/");
        assert_eq!(body, b"rest");
    }

    #[test]
    fn test_body_is_not_inspected() {
        let mut framer = ResponseFramer::new();
        framer.push(b"20 \r\n").unwrap();
        let body = vec![b'x'; 5000];
        assert_eq!(framer.push(&body).unwrap(), Progress::Body(&body[..]));
        assert_eq!(framer.push(b"\r\n40 \r\n").unwrap(), Progress::Body(b"\r\n40 \r\n"));
    }

    #[test]
    fn test_header_too_long() {
        let mut framer = ResponseFramer::new();
        assert_eq!(framer.push(&[b'a'; 2048]).unwrap(), Progress::NeedMore);
        assert_eq!(framer.push(b"a"), Err(FramingError::HeaderTooLong));
        assert_eq!(framer.push(b"\r\n"), Err(FramingError::HeaderTooLong));
        assert_eq!(framer.finish(), Err(FramingError::HeaderTooLong));
    }

    #[test]
    fn test_missing_header() {
        let mut framer = ResponseFramer::new();
        framer.push(b"20 text/gemini").unwrap();
        assert!(!framer.header_received());
        assert_eq!(framer.finish(), Err(FramingError::MissingHeader));
        assert_eq!(ResponseFramer::new().finish(), Err(FramingError::MissingHeader));
    }

    #[rstest]
    #[case(b"20 text/gemini; lang=en", 20, "text/gemini; lang=en")]
    #[case(b"51", 51, "")]
    #[case(b"5 not found", 5, "ot found")]
    #[case(b"x1 meta", 0, "meta")]
    #[case(b"", 0, "")]
    #[case(b"20   padded  ", 20, "padded")]
    fn test_header_line(#[case] line: &[u8], #[case] status: u8, #[case] meta: &str) {
        let header = HeaderLine::parse(line);
        assert_eq!(header.status, status);
        assert_eq!(header.meta, meta);
    }
}
