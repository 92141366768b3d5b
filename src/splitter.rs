//! The splitter (§4.3): a resumable byte-level state machine that
//! frames messages off the wire and verifies the mod-256 checksum.
//!
//! States advance over a literal pattern (`"8=FIX"`, `"4."`, …) via a
//! pattern/position pair, exactly as the source this is grounded on
//! does with a raw pointer into a C string; once the pattern is fully
//! matched, per-state custom logic (digit accumulation, message-type
//! collection, body copying) takes over until the next `set_state`.
//! Every field is plain, `Copy`-friendly state, so suspending at any
//! byte boundary is just "stop the loop and keep the struct".

use crate::error::ParserError;
use crate::msg_type::MsgType;
use crate::schema::FixVersion;

const SOH: u8 = 0x01;

/// Matches §6.3 / `MAX_MESSAGE_LEN`.
pub const MAX_MESSAGE_LEN: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Fix4,
    BodyLength,
    MsgType,
    Body,
    CheckSum,
}

impl State {
    /// The noun used in "Unexpected byte ... in FIX message <noun>".
    fn noun(self) -> &'static str {
        match self {
            State::Header | State::Fix4 => "header",
            State::BodyLength => "length",
            State::MsgType => "type",
            State::Body => "body",
            State::CheckSum => "check sum",
        }
    }
}

pub(crate) enum Outcome {
    /// The input given to `feed` was exhausted mid-message; state has
    /// been saved and the next call resumes exactly here.
    Pending,
    /// A full message was assembled into the caller's body buffer.
    Complete {
        version: FixVersion,
        msg_type: MsgType,
    },
    /// A framing violation; the splitter (and therefore the parser)
    /// is now poisoned.
    Error(ParserError),
}

pub(crate) struct Splitter {
    state: State,
    pattern: &'static [u8],
    pattern_pos: usize,
    /// Overloaded, matching the source: declared body length while
    /// accumulating it, then remaining-bytes-of-body while copying,
    /// then digit count while reading the trailing checksum.
    byte_counter: u64,
    /// Message-type character count.
    counter: usize,
    check_sum: u8,
    their_sum: u8,
    version: Option<FixVersion>,
    msg_type: MsgType,
}

impl Default for Splitter {
    fn default() -> Self {
        Splitter::new()
    }
}

impl Splitter {
    pub(crate) fn new() -> Self {
        Splitter {
            state: State::Header,
            pattern: b"8=FIX",
            pattern_pos: 0,
            byte_counter: 0,
            counter: 0,
            check_sum: 0,
            their_sum: 0,
            version: None,
            msg_type: MsgType::default(),
        }
    }

    fn set_state(&mut self, state: State, pattern: &'static [u8]) {
        self.state = state;
        self.pattern = pattern;
        self.pattern_pos = 0;
        self.counter = 0;
    }

    fn unexpected(&self, c: u8) -> Outcome {
        let detail = if c.is_ascii_graphic() {
            format!("Unexpected byte '{}' in FIX message {}", c as char, self.state.noun())
        } else {
            format!("Unexpected byte {:#x} in FIX message {}", c, self.state.noun())
        };
        Outcome::Error(ParserError::new(detail))
    }

    fn fatal(text: impl Into<String>) -> Outcome {
        Outcome::Error(ParserError::new(text.into()))
    }

    /// Consumes as much of `input[*pos..]` as needed to either
    /// complete a message, hit a framing error, or run out of bytes.
    /// `body` accumulates the message body bytes (reused across calls;
    /// the caller clears it when starting a new message).
    pub(crate) fn feed(&mut self, input: &[u8], pos: &mut usize, body: &mut Vec<u8>) -> Outcome {
        while *pos < input.len() {
            let c = input[*pos];
            *pos += 1;

            if self.pattern_pos == self.pattern.len() {
                match self.step_data(c, body) {
                    Some(outcome) => return outcome,
                    None => continue,
                }
            } else if self.pattern[self.pattern_pos] == c {
                match self.step_literal(c) {
                    Some(outcome) => return outcome,
                    None => {
                        self.pattern_pos += 1;
                        continue;
                    }
                }
            } else {
                return self.unexpected(c);
            }
        }
        Outcome::Pending
    }

    /// Returns `Some(outcome)` to stop, `None` to keep looping.
    fn step_literal(&mut self, c: u8) -> Option<Outcome> {
        match self.state {
            State::Header | State::Fix4 | State::BodyLength => {
                self.check_sum = self.check_sum.wrapping_add(c);
                None
            }
            State::MsgType => {
                self.byte_counter -= 1;
                if self.byte_counter == 0 {
                    return Some(Self::fatal("Unexpected end of FIX message"));
                }
                self.check_sum = self.check_sum.wrapping_add(c);
                None
            }
            State::CheckSum => None,
            State::Body => Some(Self::fatal("Invalid FIX splitter state")),
        }
    }

    fn step_data(&mut self, c: u8, body: &mut Vec<u8>) -> Option<Outcome> {
        match self.state {
            State::Header => {
                self.check_sum = self.check_sum.wrapping_add(c);
                match c {
                    b'T' => {
                        self.version = Some(FixVersion::Fix5_0);
                        self.set_state(State::BodyLength, b".1.1\x019=");
                        None
                    }
                    b'.' => {
                        self.set_state(State::Fix4, b"4.");
                        None
                    }
                    _ => Some(self.unexpected(c)),
                }
            }
            State::Fix4 => {
                self.check_sum = self.check_sum.wrapping_add(c);
                self.version = Some(match c {
                    b'2' => FixVersion::Fix4_2,
                    b'3' => FixVersion::Fix4_3,
                    b'4' => FixVersion::Fix4_4,
                    _ => return Some(self.unexpected(c)),
                });
                self.set_state(State::BodyLength, b"\x019=");
                None
            }
            State::BodyLength => {
                self.check_sum = self.check_sum.wrapping_add(c);
                match c {
                    b'0'..=b'9' => {
                        self.byte_counter = self.byte_counter * 10 + (c - b'0') as u64;
                        if self.byte_counter == 0 {
                            return Some(self.unexpected(c)); // leading zero
                        }
                        if self.byte_counter > MAX_MESSAGE_LEN {
                            return Some(Self::fatal(format!(
                                "FIX message longer than {MAX_MESSAGE_LEN} bytes"
                            )));
                        }
                        None
                    }
                    SOH => {
                        if self.byte_counter < 5 {
                            return Some(Self::fatal(format!(
                                "Invalid FIX message length: {}",
                                self.byte_counter
                            )));
                        }
                        body.clear();
                        body.reserve(self.byte_counter as usize);
                        self.set_state(State::MsgType, b"35=");
                        None
                    }
                    _ => Some(self.unexpected(c)),
                }
            }
            State::MsgType => {
                self.byte_counter -= 1;
                if self.byte_counter == 0 {
                    return Some(Self::fatal("Unexpected end of FIX message"));
                }
                if c.is_ascii_alphanumeric() {
                    if self.counter > 2 {
                        return Some(Self::fatal("Invalid FIX message type"));
                    }
                    self.msg_type.push(c);
                    self.counter += 1;
                    self.check_sum = self.check_sum.wrapping_add(c);
                    None
                } else if c == SOH {
                    if self.counter == 0 {
                        return Some(Self::fatal("Invalid FIX message type"));
                    }
                    self.check_sum = self.check_sum.wrapping_add(c);
                    self.set_state(State::Body, b"");
                    None
                } else {
                    Some(self.unexpected(c))
                }
            }
            State::Body => {
                self.check_sum = self.check_sum.wrapping_add(c);
                self.byte_counter -= 1;
                if self.byte_counter > 0 {
                    body.push(c);
                    None
                } else if c == SOH {
                    body.push(SOH);
                    self.set_state(State::CheckSum, b"10=");
                    None
                } else {
                    Some(Self::fatal("Invalid FIX message type"))
                }
            }
            State::CheckSum => match c {
                b'0'..=b'9' => {
                    self.byte_counter += 1;
                    if self.byte_counter == 4 {
                        return Some(self.unexpected(c));
                    }
                    self.their_sum = self.their_sum.wrapping_mul(10).wrapping_add(c - b'0');
                    None
                }
                SOH => {
                    if self.their_sum != self.check_sum {
                        return Some(Self::fatal("Invalid FIX message checksum"));
                    }
                    let version = self.version.expect("version set before checksum state");
                    let msg_type = self.msg_type;
                    *self = Splitter::new();
                    Some(Outcome::Complete { version, msg_type })
                }
                _ => Some(self.unexpected(c)),
            },
        }
    }
}
