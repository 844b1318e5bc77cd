//! Recorded session scripts used as a transport.
//!
//! One item per line; `#` starts a comment.
//!
//! ```text
//! S 0          # mode select, value byte 0
//! T            # pen toggle (value defaults to 0)
//! M 8          # move right
//! wait 250     # advance the clock by 250 ms
//! hex 4d       # raw bytes, here a truncated frame
//! undo         # toolbar interaction
//! ```
//!
//! Files replay on a virtual clock that only advances on `wait`, so
//! debounce behaviour is deterministic. Readers (stdin) are consumed live
//! and stamped with the real arrival time.

use std::collections::VecDeque;
use std::fs;
use std::io::{BufRead, ErrorKind};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::transport::{Incoming, Timed, Transport, TransportError, UiCommand};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptItem {
    Send(Incoming),
    Wait(Duration),
}

enum Source {
    File(PathBuf),
    Reader(Box<dyn BufRead>),
}

/// Transport replaying a session script from a file or a live reader.
pub struct ScriptTransport {
    name: String,
    source: Source,
    pending: VecDeque<ScriptItem>,
    clock: Option<Instant>,
    line: usize,
}

impl ScriptTransport {
    /// Replays a script file on a virtual clock.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: format!("script {}", path.display()),
            source: Source::File(path),
            pending: VecDeque::new(),
            clock: None,
            line: 0,
        }
    }

    /// Reads script lines live from `reader`.
    pub fn from_reader(name: impl Into<String>, reader: Box<dyn BufRead>) -> Self {
        Self {
            name: name.into(),
            source: Source::Reader(reader),
            pending: VecDeque::new(),
            clock: None,
            line: 0,
        }
    }

    /// Parses an in-memory script, replayed on a virtual clock.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        let pending = parse_script(script)?;
        Ok(Self {
            name: "inline script".to_string(),
            source: Source::Reader(Box::new(std::io::empty())),
            pending,
            clock: Some(Instant::now()),
            line: 0,
        })
    }

    fn next_live_item(&mut self) -> Option<Timed<Incoming>> {
        let Source::Reader(reader) = &mut self.source else {
            return None;
        };
        let mut buf = String::new();
        loop {
            buf.clear();
            match reader.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => {
                    log::warn!("{}: read failed: {err}", self.name);
                    return None;
                }
            }
            self.line += 1;
            match parse_line(&buf) {
                Ok(Some(ScriptItem::Send(item))) => {
                    return Some(Timed {
                        at: Instant::now(),
                        item,
                    });
                }
                // Live input already arrives in real time
                Ok(Some(ScriptItem::Wait(_))) | Ok(None) => continue,
                Err(message) => {
                    log::warn!("{}: line {}: {message}", self.name, self.line);
                    continue;
                }
            }
        }
    }
}

impl Transport for ScriptTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn connect(&mut self) -> Result<(), TransportError> {
        if let Source::File(path) = &self.source {
            let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
                ErrorKind::NotFound => {
                    TransportError::Unavailable(format!("{} does not exist", path.display()))
                }
                _ => TransportError::Io(err),
            })?;
            self.pending = parse_script(&contents)?;
            self.clock = Some(Instant::now());
        }
        Ok(())
    }

    fn recv(&mut self) -> Option<Timed<Incoming>> {
        let Some(clock) = self.clock.as_mut() else {
            return self.next_live_item();
        };
        while let Some(item) = self.pending.pop_front() {
            match item {
                ScriptItem::Wait(delay) => *clock += delay,
                ScriptItem::Send(item) => return Some(Timed { at: *clock, item }),
            }
        }
        None
    }

    fn disconnect(&mut self) {
        self.pending.clear();
    }
}

fn parse_script(script: &str) -> Result<VecDeque<ScriptItem>, ScriptError> {
    let mut items = VecDeque::new();
    for (index, line) in script.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(item)) => items.push_back(item),
            Ok(None) => {}
            Err(message) => {
                return Err(ScriptError::Parse {
                    line: index + 1,
                    message,
                });
            }
        }
    }
    Ok(items)
}

fn parse_line(line: &str) -> Result<Option<ScriptItem>, String> {
    let content = line.split('#').next().unwrap_or("").trim();
    let mut tokens = content.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = tokens.collect();

    if head == "wait" {
        let [ms] = rest.as_slice() else {
            return Err("wait takes exactly one millisecond value".to_string());
        };
        let ms: u64 = ms
            .parse()
            .map_err(|_| format!("invalid wait duration '{ms}'"))?;
        return Ok(Some(ScriptItem::Wait(Duration::from_millis(ms))));
    }

    if head == "hex" {
        let bytes = rest
            .iter()
            .map(|b| u8::from_str_radix(b, 16).map_err(|_| format!("invalid hex byte '{b}'")))
            .collect::<Result<Vec<u8>, String>>()?;
        return Ok(Some(ScriptItem::Send(Incoming::Frame(bytes))));
    }

    if let Some(command) = UiCommand::from_keyword(head) {
        if !rest.is_empty() {
            return Err(format!("'{head}' takes no arguments"));
        }
        return Ok(Some(ScriptItem::Send(Incoming::Ui(command))));
    }

    let mut chars = head.chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) if code.is_ascii_graphic() => {
            let value = match rest.as_slice() {
                [] => 0,
                [value] => value
                    .parse::<u8>()
                    .map_err(|_| format!("frame value '{value}' is not a byte"))?,
                _ => return Err(format!("frame '{head}' takes at most one value")),
            };
            Ok(Some(ScriptItem::Send(Incoming::Frame(vec![
                code as u8, value,
            ]))))
        }
        _ => Err(format!("unknown directive '{head}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn frame(bytes: &[u8]) -> Incoming {
        Incoming::Frame(bytes.to_vec())
    }

    #[test]
    fn parses_frames_waits_and_ui() {
        assert_eq!(
            parse_line("M 8").unwrap(),
            Some(ScriptItem::Send(frame(&[b'M', 8])))
        );
        assert_eq!(
            parse_line("T   # toggle").unwrap(),
            Some(ScriptItem::Send(frame(&[b'T', 0])))
        );
        assert_eq!(
            parse_line("wait 250").unwrap(),
            Some(ScriptItem::Wait(Duration::from_millis(250)))
        );
        assert_eq!(
            parse_line("hex 4d").unwrap(),
            Some(ScriptItem::Send(frame(&[0x4d])))
        );
        assert_eq!(
            parse_line("undo").unwrap(),
            Some(ScriptItem::Send(Incoming::Ui(UiCommand::Undo)))
        );
        assert_eq!(parse_line("   # only a comment").unwrap(), None);
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(parse_line("M 256").is_err());
        assert!(parse_line("wait soon").is_err());
        assert!(parse_line("jump 3").is_err());
        assert!(parse_line("undo 2").is_err());
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let err = parse_script("M 8\n\nM x\n").unwrap_err();
        let ScriptError::Parse { line, .. } = err;
        assert_eq!(line, 3);
    }

    #[test]
    fn virtual_clock_advances_only_on_wait() {
        let mut transport = ScriptTransport::from_script("M 8\nM 8\nwait 200\nM 8\n").unwrap();
        let first = transport.recv().unwrap();
        let second = transport.recv().unwrap();
        let third = transport.recv().unwrap();
        assert!(transport.recv().is_none());

        assert_eq!(first.at, second.at);
        assert_eq!(third.at - first.at, Duration::from_millis(200));
    }

    #[test]
    fn live_reader_skips_bad_lines() {
        let input = Cursor::new("M 8\nbogus line\nwait 10\nA\n");
        let mut transport = ScriptTransport::from_reader("stdin", Box::new(input));
        transport.connect().unwrap();

        assert_eq!(transport.recv().unwrap().item, frame(&[b'M', 8]));
        assert_eq!(transport.recv().unwrap().item, frame(&[b'A', 0]));
        assert!(transport.recv().is_none());
    }

    #[test]
    fn missing_file_is_unavailable() {
        let mut transport = ScriptTransport::from_path("/nonexistent/neuroscribe/session.txt");
        assert!(matches!(
            transport.connect(),
            Err(TransportError::Unavailable(_))
        ));
    }
}
