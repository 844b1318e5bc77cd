//! Raw device frame layout.

/// Command byte of a device frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    /// `M`: cursor movement, value = direction code
    Move,
    /// `S`: drawing mode select, value = mode code
    SelectMode,
    /// `T` or `P`: advance the pen cycle, value unused
    TogglePen,
    /// `J`: jaw clench duration in seconds
    Jaw,
    /// `A`: open the menu
    OpenMenu,
    /// `E`: confirm the menu entry at the given index
    ConfirmIndex,
    /// `N`: menu navigation, 0 = previous, 1 = next
    Navigate,
    /// `C`: triple blink, confirm the highlighted entry
    TripleBlink,
}

impl CommandCode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'M' => Some(Self::Move),
            b'S' => Some(Self::SelectMode),
            b'T' | b'P' => Some(Self::TogglePen),
            b'J' => Some(Self::Jaw),
            b'A' => Some(Self::OpenMenu),
            b'E' => Some(Self::ConfirmIndex),
            b'N' => Some(Self::Navigate),
            b'C' => Some(Self::TripleBlink),
            _ => None,
        }
    }

    /// Canonical byte for this command (`T` for the pen toggle).
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Move => b'M',
            Self::SelectMode => b'S',
            Self::TogglePen => b'T',
            Self::Jaw => b'J',
            Self::OpenMenu => b'A',
            Self::ConfirmIndex => b'E',
            Self::Navigate => b'N',
            Self::TripleBlink => b'C',
        }
    }
}

/// One device notification: command byte followed by a value byte.
///
/// Bytes past the second are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub code: u8,
    pub value: u8,
}

impl Frame {
    pub const LEN: usize = 2;

    pub fn new(code: u8, value: u8) -> Self {
        Self { code, value }
    }

    /// Reads a frame from a notification payload. Short payloads yield `None`.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [code, value, ..] => Some(Self::new(*code, *value)),
            _ => None,
        }
    }

    pub fn command(&self) -> Option<CommandCode> {
        CommandCode::from_byte(self.code)
    }

    pub fn to_bytes(self) -> [u8; 2] {
        [self.code, self.value]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_payloads_are_rejected() {
        assert_eq!(Frame::parse(&[]), None);
        assert_eq!(Frame::parse(b"M"), None);
    }

    #[test]
    fn extra_bytes_are_ignored() {
        assert_eq!(Frame::parse(&[b'M', 8, 0xff]), Some(Frame::new(b'M', 8)));
    }

    #[test]
    fn pen_toggle_has_two_spellings() {
        assert_eq!(CommandCode::from_byte(b'T'), Some(CommandCode::TogglePen));
        assert_eq!(CommandCode::from_byte(b'P'), Some(CommandCode::TogglePen));
        assert_eq!(CommandCode::from_byte(b'm'), None);
    }
}
