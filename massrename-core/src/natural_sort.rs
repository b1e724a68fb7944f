use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fmt;

/// One run of a natural sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Lowercased non-digit run.
    Text(String),
    /// Digit run as ASCII digits, leading zeros stripped ("" for all zeros).
    Number(String),
}

impl Segment {
    fn cmp_segment(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // Shorter significant digits means a smaller integer.
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

/// Sort key ordering names the way people expect: `item2` before `item10`.
///
/// Digit runs compare by numeric value, other runs compare case-insensitively.
/// ASCII digits and full-width digits (`０`-`９`) form digit runs and may be
/// mixed within one run; digits of other scripts compare as text.
/// When the runs at the same position differ in kind, the digit run sorts
/// first. Keys whose runs are all equal (`img01` and `img1`, `A` and `a`) fall
/// back to comparing the original text, so the order is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalSortKey {
    segments: Vec<Segment>,
    original: String,
}

impl NaturalSortKey {
    pub fn new(s: impl Into<String>) -> Self {
        let original = s.into();
        Self {
            segments: split_segments(&original),
            original,
        }
    }

    /// Key for a value that is not a string, through its `Display` form.
    pub fn from_display(value: &impl fmt::Display) -> Self {
        Self::new(value.to_string())
    }

    /// Key for an OS string; invalid UTF-8 is replaced lossily.
    pub fn from_os_str(s: &OsStr) -> Self {
        Self::new(s.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

/// ASCII form of a decimal digit, full-width digits included.
fn ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '\u{ff10}'..='\u{ff19}' => char::from_u32(u32::from(c) - 0xff10 + u32::from('0')),
        _ => None,
    }
}

fn split_segments(s: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = s.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let is_digit = ascii_digit(c).is_some();
        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if ascii_digit(c).is_some() != is_digit {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }

        let run = &s[start..end];
        if is_digit {
            let digits: String = run.chars().filter_map(ascii_digit).collect();
            segments.push(Segment::Number(digits.trim_start_matches('0').to_string()));
        } else {
            segments.push(Segment::Text(run.to_lowercase()));
        }
    }

    segments
}

impl Ord for NaturalSortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.segments.iter().zip(&other.segments) {
            match a.cmp_segment(b) {
                Ordering::Equal => {},
                unequal => return unequal,
            }
        }
        self.segments
            .len()
            .cmp(&other.segments.len())
            .then_with(|| self.original.cmp(&other.original))
    }
}

impl PartialOrd for NaturalSortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two strings in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalSortKey::new(a).cmp(&NaturalSortKey::new(b))
}
