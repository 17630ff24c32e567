//! iTunes SoundCheck (iTunNORM) encoding
//!
//! An iTunNORM value is ten 32-bit fields written as 8-digit uppercase hex.
//! Only the first four carry the loudness adjustment:
//!
//! - Fields 0/1: `1000 * 10^(-gain/10)` (left/right, 1/1000 W reference)
//! - Fields 2/3: `2500 * 10^(-gain/10)` (left/right, 1/2500 W reference)
//! - Fields 4-9: peak and statistics fields, carried over untouched
//!
//! See Slim/Utils/SoundCheck.pm from the Squeezebox server for a longer
//! description of the layout.

use std::fmt;

/// Largest value ever written into an adjustment field
pub const MAX_ADJUSTMENT: u32 = 65534;

/// Number of fields in an iTunNORM vector
pub const FIELD_COUNT: usize = 10;

const LOW_REFERENCE: f64 = 1000.0;
const HIGH_REFERENCE: f64 = 2500.0;

const DEFAULT_FIELDS: [u32; FIELD_COUNT] = [
    0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00024CA8, 0x00024CA8, 0x00007FFF, 0x00007FFF,
    0x00024CA8, 0x00024CA8,
];

/// A ten-field SoundCheck vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundCheckVector {
    fields: [u32; FIELD_COUNT],
}

impl SoundCheckVector {
    /// Build a vector from raw field values
    pub fn from_fields(fields: [u32; FIELD_COUNT]) -> Self {
        Self { fields }
    }

    /// Raw field values
    pub fn fields(&self) -> &[u32; FIELD_COUNT] {
        &self.fields
    }

    /// Fields rendered as 8-digit uppercase hex strings
    pub fn hex_fields(&self) -> Vec<String> {
        self.fields.iter().map(|f| format!("{:08X}", f)).collect()
    }

    /// Parse the text of a stored iTunNORM field.
    ///
    /// Returns `None` unless the text holds exactly ten whitespace-separated
    /// hexadecimal tokens of at most eight digits each.
    pub fn parse(text: &str) -> Option<Self> {
        let mut fields = [0u32; FIELD_COUNT];
        let mut count = 0;

        for token in text.split_whitespace() {
            if count == FIELD_COUNT || token.len() > 8 {
                return None;
            }
            if !token.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            fields[count] = u32::from_str_radix(token, 16).ok()?;
            count += 1;
        }

        (count == FIELD_COUNT).then_some(Self { fields })
    }

    /// Text as stored on disk: a leading space, then the space-joined fields
    pub fn to_tag_text(&self) -> String {
        format!(" {}", self)
    }
}

impl Default for SoundCheckVector {
    /// The baseline used when a file carries no iTunNORM value yet
    fn default() -> Self {
        Self {
            fields: DEFAULT_FIELDS,
        }
    }
}

impl fmt::Display for SoundCheckVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:08X}", field)?;
        }
        Ok(())
    }
}

/// Encodes a ReplayGain gain into SoundCheck adjustment fields
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundCheckEncoder;

impl SoundCheckEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode `gain_db` on top of `baseline`.
    ///
    /// Fields 0-3 are recomputed; fields 4-9 come from `baseline` unchanged.
    /// The ReplayGain peak is not used: the peak fields (6/7) keep whatever
    /// the baseline holds.
    pub fn encode(&self, gain_db: f64, baseline: &SoundCheckVector) -> SoundCheckVector {
        let low = gain_to_adjustment(gain_db, LOW_REFERENCE);
        let high = gain_to_adjustment(gain_db, HIGH_REFERENCE);

        let mut fields = baseline.fields;
        fields[0] = low;
        fields[1] = low;
        fields[2] = high;
        fields[3] = high;

        SoundCheckVector { fields }
    }
}

/// `round(10^(-gain/10) * reference)`, capped at [`MAX_ADJUSTMENT`]
fn gain_to_adjustment(gain_db: f64, reference: f64) -> u32 {
    let scaled = (10.0_f64.powf(-gain_db / 10.0) * reference).round();
    scaled.clamp(0.0, f64::from(MAX_ADJUSTMENT)) as u32
}
