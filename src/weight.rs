//! In-place editing of an edge weight from keystrokes.
//!
//! The weight behaves like its decimal text: digits append at the end, a
//! backspace drops the last digit, `-` and `+` set the sign. Everything is
//! done with integer arithmetic on the value itself.

use log::debug;

/// A single keystroke applied to an edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightEdit {
    /// Append a decimal digit (0-9).
    Digit(u8),
    /// Drop the last digit; a single remaining digit becomes 0.
    Backspace,
    /// `-`: make a positive weight negative. Signs do not stack.
    Negate,
    /// `+`: make the weight non-negative.
    Absolute,
}

impl WeightEdit {
    /// Map a typed character to an edit. Anything outside `0-9`, `-`, `+`
    /// is not an edit.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| WeightEdit::Digit(d as u8)),
            '-' => Some(WeightEdit::Negate),
            '+' => Some(WeightEdit::Absolute),
            _ => None,
        }
    }

    /// Apply the edit to `weight`.
    ///
    /// Appending a digit that would leave the `i32` range (or reach
    /// `i32::MIN`, which has no positive counterpart) keeps the old weight.
    pub fn apply(self, weight: i32) -> i32 {
        match self {
            WeightEdit::Digit(d) => append_digit(weight, d).unwrap_or_else(|| {
                debug!("weight {} cannot take another digit", weight);
                weight
            }),
            WeightEdit::Backspace => weight / 10,
            WeightEdit::Negate if weight > 0 => -weight,
            WeightEdit::Negate => weight,
            WeightEdit::Absolute => weight.saturating_abs(),
        }
    }
}

fn append_digit(weight: i32, digit: u8) -> Option<i32> {
    let digit = i32::from(digit.min(9));
    let shifted = weight.checked_mul(10)?;
    let next = if weight < 0 {
        shifted.checked_sub(digit)?
    } else {
        shifted.checked_add(digit)?
    };
    (next != i32::MIN).then_some(next)
}

/// Apply a sequence of edits starting from `weight`.
pub fn apply_all<I>(weight: i32, edits: I) -> i32
where
    I: IntoIterator<Item = WeightEdit>,
{
    edits.into_iter().fold(weight, |w, edit| edit.apply(w))
}
