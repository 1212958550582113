//! Controller initialization tables
//!
//! The ILI9163 is brought up by replaying a fixed list of register writes.
//! Each record is an opcode, its argument bytes, and an optional settle delay
//! in milliseconds. Records are authored as [`InitCommand`] values, and the
//! compact wire encoding is supported in both directions:
//!
//! ```text
//! [count] { [opcode] [spec] [arg; spec & 0x7F] [delay_ms if spec & 0x80] } * count
//! ```
//!
//! A delay byte of 255 is a plain 255 ms wait.
//!
//! Encoded tables are trusted data. [`CommandTable`] decodes them without
//! checking that the authored layout is consistent: a wrong argument count
//! shifts every following record. Use [`CommandTable::validate`] when
//! authoring a table; replay never validates.
//!
//! ## Example
//!
//! ```
//! use ili9163::table::{CommandTable, InitCommand};
//!
//! let table = CommandTable::new(&[2, 0x01, 0x80, 50, 0x3A, 0x01, 0x05]);
//! assert!(table.validate().is_ok());
//!
//! let mut records = table.iter();
//! assert_eq!(records.next(), Some(InitCommand::new(0x01, &[]).with_delay(50)));
//! assert_eq!(records.next(), Some(InitCommand::new(0x3A, &[0x05])));
//! assert_eq!(records.next(), None);
//! ```

use crate::command::{
    COLMOD, DISPON, FRMCTR1, FRMCTR2, FRMCTR3, GMCTRN1, GMCTRP1, INVCTR, INVOFF, MADCTL, NORON,
    PWCTR1, PWCTR2, PWCTR3, PWCTR4, PWCTR5, SLPOUT, SWRESET, VMCTR1,
};
use crate::error::TableError;

/// Spec-byte flag: a delay byte follows the arguments
pub const DELAY_FLAG: u8 = 0x80;

/// Spec-byte mask for the argument count
pub const ARG_COUNT_MASK: u8 = 0x7F;

/// Largest argument count a record can encode
pub const MAX_ARGS: usize = ARG_COUNT_MASK as usize;

/// Largest record count a table header can encode
pub const MAX_COMMANDS: usize = u8::MAX as usize;

/// One controller command with its argument payload and settle delay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitCommand<'a> {
    /// Command opcode
    pub opcode: u8,
    /// Argument bytes sent after the opcode in the same transaction
    pub args: &'a [u8],
    /// Milliseconds to wait after the command, if any
    pub delay_ms: Option<u8>,
}

impl<'a> InitCommand<'a> {
    /// Create a command with no delay
    pub const fn new(opcode: u8, args: &'a [u8]) -> Self {
        Self {
            opcode,
            args,
            delay_ms: None,
        }
    }

    /// Wait `ms` milliseconds after this command
    pub const fn with_delay(self, ms: u8) -> Self {
        Self {
            delay_ms: Some(ms),
            ..self
        }
    }

    /// The encoded spec byte: argument count plus [`DELAY_FLAG`]
    pub const fn arg_spec(&self) -> u8 {
        let count = (self.args.len() as u8) & ARG_COUNT_MASK;
        if self.delay_ms.is_some() {
            count | DELAY_FLAG
        } else {
            count
        }
    }

    /// Bytes this record occupies in the wire encoding
    pub const fn encoded_len(&self) -> usize {
        2 + self.args.len() + if self.delay_ms.is_some() { 1 } else { 0 }
    }
}

/// Check that a table fits the wire encoding
///
/// At most [`MAX_COMMANDS`] records with at most [`MAX_ARGS`] arguments each.
/// Usable in `const` assertions so a mis-authored table fails to compile.
pub const fn is_encodable(commands: &[InitCommand<'_>]) -> bool {
    if commands.len() > MAX_COMMANDS {
        return false;
    }
    let mut i = 0;
    while i < commands.len() {
        if commands[i].args.len() > MAX_ARGS {
            return false;
        }
        i += 1;
    }
    true
}

/// Size of the wire encoding of `commands`, header byte included
pub fn encoded_len(commands: &[InitCommand<'_>]) -> usize {
    1 + commands
        .iter()
        .map(InitCommand::encoded_len)
        .sum::<usize>()
}

/// Serialize `commands` into the wire encoding
///
/// Returns the number of bytes written to `out`.
///
/// # Errors
///
/// - [`TableError::TooManyCommands`] if there are more than [`MAX_COMMANDS`] records
/// - [`TableError::TooManyArgs`] if a record has more than [`MAX_ARGS`] arguments
/// - [`TableError::BufferTooSmall`] if `out` is shorter than [`encoded_len`]
pub fn encode(commands: &[InitCommand<'_>], out: &mut [u8]) -> Result<usize, TableError> {
    let count = u8::try_from(commands.len()).map_err(|_| TableError::TooManyCommands {
        count: commands.len(),
    })?;
    if let Some(record) = commands.iter().position(|c| c.args.len() > MAX_ARGS) {
        return Err(TableError::TooManyArgs {
            record,
            count: commands[record].args.len(),
        });
    }
    let required = encoded_len(commands);
    if out.len() < required {
        return Err(TableError::BufferTooSmall {
            required,
            provided: out.len(),
        });
    }

    out[0] = count;
    let mut cursor = 1;
    for command in commands {
        out[cursor] = command.opcode;
        out[cursor + 1] = command.arg_spec();
        cursor += 2;
        out[cursor..cursor + command.args.len()].copy_from_slice(command.args);
        cursor += command.args.len();
        if let Some(ms) = command.delay_ms {
            out[cursor] = ms;
            cursor += 1;
        }
    }
    Ok(cursor)
}

/// An encoded command table
///
/// Wraps the wire encoding and decodes it lazily into [`InitCommand`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandTable<'a> {
    bytes: &'a [u8],
}

impl<'a> CommandTable<'a> {
    /// Wrap an encoded table; no checks are made
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The raw encoded bytes
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Record count declared by the header byte
    pub const fn len(&self) -> usize {
        match self.bytes.first() {
            Some(count) => *count as usize,
            None => 0,
        }
    }

    /// Whether the header declares no records
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walk the encoding and check every record fits and nothing trails
    ///
    /// This catches truncation and leftover bytes. A wrong argument count
    /// that happens to keep the total length right cannot be detected.
    ///
    /// # Errors
    ///
    /// - [`TableError::Truncated`] if the header or a record runs past the end
    /// - [`TableError::TrailingBytes`] if bytes remain after the last record
    pub const fn validate(&self) -> Result<(), TableError> {
        let bytes = self.bytes;
        if bytes.is_empty() {
            return Err(TableError::Truncated { record: 0 });
        }
        let count = bytes[0] as usize;
        let mut cursor = 1;
        let mut record = 0;
        while record < count {
            if cursor + 2 > bytes.len() {
                return Err(TableError::Truncated { record });
            }
            let spec = bytes[cursor + 1];
            let mut next = cursor + 2 + (spec & ARG_COUNT_MASK) as usize;
            if spec & DELAY_FLAG != 0 {
                next += 1;
            }
            if next > bytes.len() {
                return Err(TableError::Truncated { record });
            }
            cursor = next;
            record += 1;
        }
        if cursor != bytes.len() {
            return Err(TableError::TrailingBytes {
                extra: bytes.len() - cursor,
            });
        }
        Ok(())
    }

    /// Iterate the decoded records in table order
    pub fn iter(&self) -> Commands<'a> {
        Commands {
            bytes: self.bytes,
            cursor: 1,
            remaining: self.len(),
        }
    }
}

impl<'a> IntoIterator for CommandTable<'a> {
    type Item = InitCommand<'a>;
    type IntoIter = Commands<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &CommandTable<'a> {
    type Item = InitCommand<'a>;
    type IntoIter = Commands<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Decoding iterator over a [`CommandTable`]
#[derive(Clone, Debug)]
pub struct Commands<'a> {
    bytes: &'a [u8],
    cursor: usize,
    remaining: usize,
}

impl<'a> Commands<'a> {
    /// Decode the record at the cursor, returning it and the next cursor
    fn decode(&self) -> Option<(InitCommand<'a>, usize)> {
        let opcode = *self.bytes.get(self.cursor)?;
        let spec = *self.bytes.get(self.cursor + 1)?;
        let start = self.cursor + 2;
        let end = start + usize::from(spec & ARG_COUNT_MASK);
        let args = self.bytes.get(start..end)?;
        let (delay_ms, next) = if spec & DELAY_FLAG != 0 {
            (Some(*self.bytes.get(end)?), end + 1)
        } else {
            (None, end)
        };
        Some((
            InitCommand {
                opcode,
                args,
                delay_ms,
            },
            next,
        ))
    }
}

impl<'a> Iterator for Commands<'a> {
    type Item = InitCommand<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if let Some((command, next)) = self.decode() {
            self.cursor = next;
            self.remaining -= 1;
            Some(command)
        } else {
            log::warn!(
                "command table ends at byte {} with {} records left",
                self.cursor,
                self.remaining
            );
            self.remaining = 0;
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// Power, frame rate and pixel format setup
///
/// Software reset and sleep-out each need 50 ms to settle.
pub const BASELINE: &[InitCommand<'static>] = &[
    InitCommand::new(SWRESET, &[]).with_delay(50),
    InitCommand::new(SLPOUT, &[]).with_delay(50),
    // Frame rate: normal, idle, partial
    InitCommand::new(FRMCTR1, &[0x08, 0x02, 0x02]),
    InitCommand::new(FRMCTR2, &[0xB2, 0xB2, 0xB2]),
    InitCommand::new(FRMCTR3, &[0x08, 0x02, 0x02, 0x08, 0x02, 0x02]),
    InitCommand::new(INVCTR, &[0xB4]),
    InitCommand::new(PWCTR1, &[0x0A, 0x02, 0x84]),
    InitCommand::new(PWCTR2, &[0x02]),
    InitCommand::new(PWCTR3, &[0x02, 0x00]),
    InitCommand::new(PWCTR4, &[0x8A, 0x2A]),
    InitCommand::new(PWCTR5, &[0x8A, 0xEE]),
    InitCommand::new(VMCTR1, &[0x50]),
    InitCommand::new(INVOFF, &[]),
    InitCommand::new(MADCTL, &[0x08]),
    // 16-bit color
    InitCommand::new(COLMOD, &[0x05]),
];

/// Gamma curves, then normal mode and display on
pub const GAMMA_AND_ENABLE: &[InitCommand<'static>] = &[
    InitCommand::new(
        GMCTRP1,
        &[
            0x36, 0x29, 0x12, 0x22, 0x1C, 0x15, 0x42, 0xB7, 0x2F, 0x13, 0x12, 0x0A, 0x11, 0x0B,
            0x06,
        ],
    ),
    InitCommand::new(
        GMCTRN1,
        &[
            0x09, 0x16, 0x2D, 0x0D, 0x13, 0x15, 0x40, 0x48, 0x53, 0x0C, 0x1D, 0x25, 0x2E, 0x34,
            0x39,
        ],
    ),
    InitCommand::new(NORON, &[]).with_delay(10),
    InitCommand::new(DISPON, &[]).with_delay(100),
];

const _: () = assert!(is_encodable(BASELINE));
const _: () = assert!(is_encodable(GAMMA_AND_ENABLE));

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const BASELINE_BYTES: [u8; 59] = [
        15, // records
        0x01, 0x80, 50, // SWRESET
        0x11, 0x80, 50, // SLPOUT
        0xB1, 3, 0x08, 0x02, 0x02, // FRMCTR1
        0xB2, 3, 0xB2, 0xB2, 0xB2, // FRMCTR2
        0xB3, 6, 0x08, 0x02, 0x02, 0x08, 0x02, 0x02, // FRMCTR3
        0xB4, 1, 0xB4, // INVCTR
        0xC0, 3, 0x0A, 0x02, 0x84, // PWCTR1
        0xC1, 1, 0x02, // PWCTR2
        0xC2, 2, 0x02, 0x00, // PWCTR3
        0xC3, 2, 0x8A, 0x2A, // PWCTR4
        0xC4, 2, 0x8A, 0xEE, // PWCTR5
        0xC5, 1, 0x50, // VMCTR1
        0x20, 0, // INVOFF
        0x36, 1, 0x08, // MADCTL
        0x3A, 1, 0x05, // COLMOD
    ];

    const GAMMA_AND_ENABLE_BYTES: [u8; 41] = [
        4, // records
        0xE0, 15, 0x36, 0x29, 0x12, 0x22, 0x1C, 0x15, 0x42, 0xB7, 0x2F, 0x13, 0x12, 0x0A, 0x11,
        0x0B, 0x06, // GMCTRP1
        0xE1, 15, 0x09, 0x16, 0x2D, 0x0D, 0x13, 0x15, 0x40, 0x48, 0x53, 0x0C, 0x1D, 0x25, 0x2E,
        0x34, 0x39, // GMCTRN1
        0x13, 0x80, 10, // NORON
        0x29, 0x80, 100, // DISPON
    ];

    fn encode_to_vec(commands: &[InitCommand<'_>]) -> Vec<u8> {
        let mut out = alloc::vec![0u8; encoded_len(commands)];
        let written = encode(commands, &mut out).unwrap();
        assert_eq!(written, out.len());
        out
    }

    #[test]
    fn test_decode_single_delayed_command() {
        let table = CommandTable::new(&[1, 0x01, 0x80, 50]);
        let records: Vec<_> = table.iter().collect();
        assert_eq!(
            records,
            [InitCommand {
                opcode: 0x01,
                args: &[],
                delay_ms: Some(50),
            }]
        );
    }

    #[test]
    fn test_decode_slices_exact_arguments() {
        let table = CommandTable::new(&[2, 0x10, 0x03, 0xAA, 0xBB, 0xCC, 0x11, 0x00]);
        let mut records = table.iter();

        let first = records.next().unwrap();
        assert_eq!(first.opcode, 0x10);
        assert_eq!(first.args, &[0xAA, 0xBB, 0xCC]);
        assert_eq!(first.delay_ms, None);
        // Cursor moved 2 + 3 bytes: next record starts at opcode 0x11
        assert_eq!(records.cursor, 6);

        let second = records.next().unwrap();
        assert_eq!(second, InitCommand::new(0x11, &[]));
        assert_eq!(records.next(), None);
    }

    #[test]
    fn test_decode_delay_255_is_a_number() {
        let table = CommandTable::new(&[1, 0x29, 0x80, 255]);
        let record = table.iter().next().unwrap();
        assert_eq!(record.delay_ms, Some(255));
    }

    #[test]
    fn test_decode_delay_after_arguments() {
        let table = CommandTable::new(&[1, 0x3A, 0x81, 0x05, 20]);
        let record = table.iter().next().unwrap();
        assert_eq!(record.args, &[0x05]);
        assert_eq!(record.delay_ms, Some(20));
    }

    #[test]
    fn test_mis_authored_count_desyncs_following_records() {
        // First record claims two args but was authored with one
        let table = CommandTable::new(&[2, 0x10, 0x02, 0xAA, 0x11, 0x00, 0x00]);
        let records: Vec<_> = table.iter().collect();
        assert_eq!(
            records,
            [
                InitCommand::new(0x10, &[0xAA, 0x11]),
                InitCommand::new(0x00, &[]),
            ]
        );
    }

    #[test]
    fn test_decode_stops_on_truncated_table() {
        let table = CommandTable::new(&[3, 0x10, 0x00, 0x11, 0x04, 0xAA]);
        let records: Vec<_> = table.iter().collect();
        assert_eq!(records, [InitCommand::new(0x10, &[])]);
    }

    #[test]
    fn test_empty_table() {
        assert!(CommandTable::new(&[]).is_empty());
        assert_eq!(CommandTable::new(&[]).iter().count(), 0);
        assert_eq!(CommandTable::new(&[0]).iter().count(), 0);
        assert!(CommandTable::new(&[0]).validate().is_ok());
    }

    #[test]
    fn test_validate_reports_truncation() {
        let table = CommandTable::new(&[2, 0x10, 0x01, 0xAA, 0x11, 0x80]);
        assert_eq!(table.validate(), Err(TableError::Truncated { record: 1 }));
        assert_eq!(
            CommandTable::new(&[]).validate(),
            Err(TableError::Truncated { record: 0 })
        );
    }

    #[test]
    fn test_validate_reports_trailing_bytes() {
        let table = CommandTable::new(&[1, 0x10, 0x00, 0xFF, 0xFF]);
        assert_eq!(table.validate(), Err(TableError::TrailingBytes { extra: 2 }));
    }

    #[test]
    fn test_builtin_tables_match_wire_encoding() {
        assert_eq!(encode_to_vec(BASELINE), BASELINE_BYTES);
        assert_eq!(encode_to_vec(GAMMA_AND_ENABLE), GAMMA_AND_ENABLE_BYTES);
    }

    #[test]
    fn test_builtin_wire_encoding_decodes_to_tables() {
        let baseline = CommandTable::new(&BASELINE_BYTES);
        assert!(baseline.validate().is_ok());
        assert_eq!(baseline.len(), 15);
        assert!(baseline.iter().eq(BASELINE.iter().copied()));

        let gamma = CommandTable::new(&GAMMA_AND_ENABLE_BYTES);
        assert!(gamma.validate().is_ok());
        assert_eq!(gamma.len(), 4);
        assert!(gamma.iter().eq(GAMMA_AND_ENABLE.iter().copied()));
    }

    #[test]
    fn test_encode_rejects_small_buffer() {
        let mut out = [0u8; 4];
        assert_eq!(
            encode(GAMMA_AND_ENABLE, &mut out),
            Err(TableError::BufferTooSmall {
                required: 41,
                provided: 4
            })
        );
    }

    #[test]
    fn test_encode_rejects_oversized_arguments() {
        let args = [0u8; MAX_ARGS + 1];
        let commands = [InitCommand::new(0x2C, &[]), InitCommand::new(0x2C, &args)];
        let mut out = [0u8; 256];
        assert_eq!(
            encode(&commands, &mut out),
            Err(TableError::TooManyArgs {
                record: 1,
                count: 128
            })
        );
        assert!(!is_encodable(&commands));
    }

    #[test]
    fn test_encode_rejects_too_many_commands() {
        let commands = [InitCommand::new(0x00, &[]); MAX_COMMANDS + 1];
        let mut out = [0u8; 1024];
        assert_eq!(
            encode(&commands, &mut out),
            Err(TableError::TooManyCommands { count: 256 })
        );
        assert!(!is_encodable(&commands));
    }

    #[test]
    fn test_arg_spec_packs_count_and_flag() {
        assert_eq!(InitCommand::new(0x01, &[]).with_delay(50).arg_spec(), 0x80);
        assert_eq!(InitCommand::new(0xB1, &[1, 2, 3]).arg_spec(), 0x03);
        assert_eq!(InitCommand::new(0xB1, &[1, 2, 3]).with_delay(1).arg_spec(), 0x83);
        assert_eq!(InitCommand::new(0xB1, &[1, 2, 3]).with_delay(1).encoded_len(), 6);
    }
}
