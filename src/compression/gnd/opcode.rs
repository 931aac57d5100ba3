//! GND opcode grammar
//!
//! Each command byte selects one of six families by numeric range; the low
//! bits and up to two trailing bytes carry the parameters. `0x00` terminates
//! the stream and `0x20-0x3F` is unassigned.
//!
//! | Family       | Command range | Extra bytes | Payload                                   |
//! |--------------|---------------|-------------|-------------------------------------------|
//! | Literal      | `0x01-0x1F`   | cmd         | cmd raw bytes copied from the stream      |
//! | Short repeat | `0x40-0x5F`   | 1           | `(cmd & 0x3F) + 3` copies of the value    |
//! | Long repeat  | `0x60-0x7F`   | 2           | `((cmd & 0x1F) << 8) + b1 + 36` copies    |
//! | Copy-2       | `0x80-0x9F`   | 0           | 2 bytes at distance `(cmd & 0x1F) + 2`    |
//! | Copy-3       | `0xA0-0xBF`   | 0           | 3 bytes at distance `(cmd & 0x1F) + 3`    |
//! | Long copy    | `0xC0-0xFF`   | 1           | 4-19 bytes at distance `offset + length`  |

use crate::error::{Error, Result};

/// Added to the encoded short-repeat count to recover the run length.
pub const SHORT_REPEAT_BIAS: usize = 3;
/// Added to the encoded long-repeat count to recover the run length.
pub const LONG_REPEAT_BIAS: usize = 36;
/// Added to the encoded copy-2 field to recover the back-reference distance.
pub const COPY2_BIAS: usize = 2;
/// Added to the encoded copy-3 field to recover the back-reference distance.
pub const COPY3_BIAS: usize = 3;

/// Stream terminator command byte.
pub const TERMINATOR: u8 = 0x00;

/// A fully decoded GND command.
///
/// The six payload-producing families plus the terminator; unassigned command
/// bytes never construct an `Opcode` and surface as [`Error::UnknownOpcode`]
/// from [`Opcode::parse`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// End of stream; produces nothing.
    Terminator,
    /// Copy `len` raw bytes that follow the command byte.
    Literal {
        /// Payload length (1-31).
        len: usize,
    },
    /// Repeat a single value byte.
    ShortRepeat {
        /// Run length (3-34).
        len: usize,
        /// The repeated byte.
        value: u8,
    },
    /// Repeat a single value byte, long form.
    LongRepeat {
        /// Run length (36-8227).
        len: usize,
        /// The repeated byte.
        value: u8,
    },
    /// Copy 2 bytes from history.
    Copy2 {
        /// Back-reference distance (2-33).
        distance: usize,
    },
    /// Copy 3 bytes from history.
    Copy3 {
        /// Back-reference distance (3-34).
        distance: usize,
    },
    /// Copy 4-19 bytes from history.
    LongCopy {
        /// Payload length (4-19).
        len: usize,
        /// Back-reference distance (`offset + len`, up to 1042).
        distance: usize,
    },
}

/// An opcode together with the stream bytes it occupies.
#[derive(Debug, Clone, Copy)]
pub struct ParsedOpcode {
    pub op: Opcode,
    /// Total bytes consumed: command byte, extra bytes, and any literal payload.
    pub consumed: usize,
}

impl Opcode {
    /// Classify and decode the command at `pos`, validating that every byte
    /// the opcode declares is actually present in the stream.
    pub fn parse(src: &[u8], pos: usize) -> Result<ParsedOpcode> {
        let cmd = src[pos];
        let remaining = src.len() - pos - 1;

        let need = |needed: usize| -> Result<()> {
            if remaining < needed {
                Err(Error::TruncatedStream {
                    offset: pos,
                    needed,
                    available: remaining,
                })
            } else {
                Ok(())
            }
        };

        match cmd {
            TERMINATOR => Ok(ParsedOpcode {
                op: Opcode::Terminator,
                consumed: 1,
            }),
            0x01..=0x1F => {
                let len = cmd as usize;
                need(len)?;
                Ok(ParsedOpcode {
                    op: Opcode::Literal { len },
                    consumed: 1 + len,
                })
            }
            0x20..=0x3F => Err(Error::UnknownOpcode {
                opcode: cmd,
                offset: pos,
            }),
            0x40..=0x5F => {
                need(1)?;
                Ok(ParsedOpcode {
                    op: Opcode::ShortRepeat {
                        len: (cmd & 0x3F) as usize + SHORT_REPEAT_BIAS,
                        value: src[pos + 1],
                    },
                    consumed: 2,
                })
            }
            0x60..=0x7F => {
                need(2)?;
                Ok(ParsedOpcode {
                    op: Opcode::LongRepeat {
                        len: (((cmd & 0x1F) as usize) << 8) + src[pos + 1] as usize
                            + LONG_REPEAT_BIAS,
                        value: src[pos + 2],
                    },
                    consumed: 3,
                })
            }
            0x80..=0x9F => Ok(ParsedOpcode {
                op: Opcode::Copy2 {
                    distance: (cmd & 0x1F) as usize + COPY2_BIAS,
                },
                consumed: 1,
            }),
            0xA0..=0xBF => Ok(ParsedOpcode {
                op: Opcode::Copy3 {
                    distance: (cmd & 0x1F) as usize + COPY3_BIAS,
                },
                consumed: 1,
            }),
            0xC0..=0xFF => {
                need(1)?;
                // High nibble picks the length group (4/8/12/16), bits 3-2
                // add 0-3 on top.
                let group = ((cmd >> 4) - 0xC) as usize;
                let len = 4 * group + 4 + ((cmd >> 2) & 0x3) as usize;
                // Bits 1-0 are the top bits of the 10-bit raw offset; the
                // distance bias equals the copy length.
                let offset = (((cmd & 0x3) as usize) << 8) | src[pos + 1] as usize;
                Ok(ParsedOpcode {
                    op: Opcode::LongCopy {
                        len,
                        distance: offset + len,
                    },
                    consumed: 2,
                })
            }
        }
    }

    /// Number of output bytes this opcode produces.
    pub fn payload_len(&self) -> usize {
        match *self {
            Opcode::Terminator => 0,
            Opcode::Literal { len }
            | Opcode::ShortRepeat { len, .. }
            | Opcode::LongRepeat { len, .. }
            | Opcode::LongCopy { len, .. } => len,
            Opcode::Copy2 { .. } => 2,
            Opcode::Copy3 { .. } => 3,
        }
    }

    /// Human-readable label used in trace files, matching the vocabulary of
    /// the reference decoder's captures.
    pub fn label(&self) -> String {
        match *self {
            Opcode::Terminator => "TERM".to_string(),
            Opcode::Literal { len } => format!("LIT {len}"),
            Opcode::ShortRepeat { len, value } => format!("R_SHRT_LIT {len}x{value:02X}"),
            Opcode::LongRepeat { len, value } => format!("R_LONG_LIT {len}x{value:02X}"),
            Opcode::Copy2 { distance } => format!("SHRT_CPY2 off={distance}"),
            Opcode::Copy3 { distance } => format!("SHRT_CPY3 off={distance}"),
            Opcode::LongCopy { len, distance } => format!("COPY{len} off={distance}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_lengths() {
        for cmd in 0x01..=0x1Fu8 {
            let mut src = vec![cmd];
            src.extend(std::iter::repeat_n(0xEE, cmd as usize));
            let parsed = Opcode::parse(&src, 0).unwrap();
            assert_eq!(parsed.op, Opcode::Literal { len: cmd as usize });
            assert_eq!(parsed.consumed, 1 + cmd as usize);
        }
    }

    #[test]
    fn test_short_repeat_bounds() {
        let parsed = Opcode::parse(&[0x40, 0xAB], 0).unwrap();
        assert_eq!(
            parsed.op,
            Opcode::ShortRepeat {
                len: 3,
                value: 0xAB
            }
        );
        let parsed = Opcode::parse(&[0x5F, 0x01], 0).unwrap();
        assert_eq!(
            parsed.op,
            Opcode::ShortRepeat {
                len: 34,
                value: 0x01
            }
        );
    }

    #[test]
    fn test_long_repeat_decode() {
        // ((0x65 & 0x1F) << 8) + 0x10 + 36 = 1280 + 16 + 36
        let parsed = Opcode::parse(&[0x65, 0x10, 0x7E], 0).unwrap();
        assert_eq!(
            parsed.op,
            Opcode::LongRepeat {
                len: 1332,
                value: 0x7E
            }
        );
        assert_eq!(parsed.consumed, 3);
    }

    #[test]
    fn test_copy_distances() {
        let parsed = Opcode::parse(&[0x80], 0).unwrap();
        assert_eq!(parsed.op, Opcode::Copy2 { distance: 2 });
        let parsed = Opcode::parse(&[0x9F], 0).unwrap();
        assert_eq!(parsed.op, Opcode::Copy2 { distance: 33 });
        let parsed = Opcode::parse(&[0xA0], 0).unwrap();
        assert_eq!(parsed.op, Opcode::Copy3 { distance: 3 });
        let parsed = Opcode::parse(&[0xBF], 0).unwrap();
        assert_eq!(parsed.op, Opcode::Copy3 { distance: 34 });
    }

    #[test]
    fn test_long_copy_length_groups() {
        // 0xC0: group 0, extra 0, offset 0 -> len 4, distance 4
        let parsed = Opcode::parse(&[0xC0, 0x00], 0).unwrap();
        assert_eq!(
            parsed.op,
            Opcode::LongCopy {
                len: 4,
                distance: 4
            }
        );
        // 0xFF: group 3, extra 3, offset bits 0b11 -> len 19
        let parsed = Opcode::parse(&[0xFF, 0xFF], 0).unwrap();
        assert_eq!(
            parsed.op,
            Opcode::LongCopy {
                len: 19,
                distance: 1023 + 19
            }
        );
        // 0xD4: group 1, extra 1 -> len 9; offset = 0x12
        let parsed = Opcode::parse(&[0xD4, 0x12], 0).unwrap();
        assert_eq!(
            parsed.op,
            Opcode::LongCopy {
                len: 9,
                distance: 0x12 + 9
            }
        );
    }

    #[test]
    fn test_unassigned_range_is_fatal() {
        for cmd in 0x20..=0x3Fu8 {
            let err = Opcode::parse(&[cmd], 0).unwrap_err();
            assert!(matches!(
                err,
                Error::UnknownOpcode { opcode, offset: 0 } if opcode == cmd
            ));
        }
    }

    #[test]
    fn test_truncated_literal() {
        let err = Opcode::parse(&[0x05, 0x01, 0x02], 0).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedStream {
                offset: 0,
                needed: 5,
                available: 2,
            }
        ));
    }

    #[test]
    fn test_truncated_extra_bytes() {
        assert!(matches!(
            Opcode::parse(&[0x40], 0).unwrap_err(),
            Error::TruncatedStream { needed: 1, .. }
        ));
        assert!(matches!(
            Opcode::parse(&[0x60, 0x01], 0).unwrap_err(),
            Error::TruncatedStream { needed: 2, .. }
        ));
        assert!(matches!(
            Opcode::parse(&[0xC0], 0).unwrap_err(),
            Error::TruncatedStream { needed: 1, .. }
        ));
    }
}
