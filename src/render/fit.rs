//! Shrinking labels until they fit a pixel width.

use std::sync::OnceLock;

use hyphenation::{Language, Load, Standard};
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

use super::text::{Font, TextMeasurer};
use crate::error::MeasurementError;

pub const ELLIPSIS: &str = "\u{2026}";

/// Event label split so truncation only ever eats into the summary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    /// Bullet and/or start time, kept whole.
    pub prefix: String,
    pub summary: String,
    /// Day fraction of a multi-day event, kept whole.
    pub suffix: Option<String>,
}

impl Label {
    pub fn compose(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}{} {}", self.prefix, self.summary, suffix),
            None => format!("{}{}", self.prefix, self.summary),
        }
    }

    fn truncated(&self, keep: usize) -> String {
        let head: String = self.summary.chars().take(keep).collect();
        format!(
            "{}{}{}{}",
            self.prefix,
            head.trim_end(),
            ELLIPSIS,
            self.suffix.as_deref().unwrap_or("")
        )
    }
}

/// The label as-is if it fits, otherwise the summary shortened one character at a time
/// with an ellipsis before the suffix. Ends at the bare ellipsis if nothing fits.
pub fn fit_label<M: TextMeasurer + ?Sized>(
    measurer: &M,
    label: &Label,
    font: Font,
    max_width: i32,
) -> Result<String, MeasurementError> {
    let full = label.compose();
    if measurer.text_width(&full, font)? <= max_width {
        return Ok(full);
    }

    let mut keep = label.summary.chars().count();
    while keep > 0 {
        keep -= 1;
        let candidate = label.truncated(keep);
        if measurer.text_width(&candidate, font)? <= max_width {
            return Ok(candidate);
        }
    }
    Ok(label.truncated(0))
}

/// Word-wrap the label into at most `max_lines` lines that each fit `max_width`.
///
/// The wrap width starts at the label length and shrinks one column at a time. Words that do
/// not fit are hyphenated at Swedish syllable breaks; text beyond the last line is cut with an
/// ellipsis. Falls back to a single truncated line when no wrap width works.
pub fn wrap_label<M: TextMeasurer + ?Sized>(
    measurer: &M,
    label: &Label,
    font: Font,
    max_width: i32,
    max_lines: usize,
) -> Result<Vec<String>, MeasurementError> {
    let full = label.compose();
    if measurer.text_width(&full, font)? <= max_width {
        return Ok(vec![full]);
    }

    let max_lines = max_lines.max(1);
    let mut columns = full.chars().count();
    while columns > 1 {
        columns -= 1;
        let mut lines = wrap_columns(&full, columns);
        if lines.len() > max_lines {
            lines.truncate(max_lines);
            if let Some(last) = lines.last_mut() {
                last.push_str(ELLIPSIS);
            }
        }
        let mut fits = true;
        for line in &lines {
            if measurer.text_width(line, font)? > max_width {
                fits = false;
                break;
            }
        }
        if fits {
            return Ok(lines);
        }
    }

    Ok(vec![fit_label(measurer, label, font, max_width)?])
}

/// Swedish hyphenation patterns, loaded on first use.
fn hyphenator() -> Option<&'static Standard> {
    static DICTIONARY: OnceLock<Option<Standard>> = OnceLock::new();
    DICTIONARY
        .get_or_init(|| match Standard::from_embedded(Language::Swedish) {
            Ok(dictionary) => Some(dictionary),
            Err(err) => {
                log::warn!("no hyphenation dictionary, splitting only at hyphens: {}", err);
                None
            }
        })
        .as_ref()
}

/// Greedy wrap at `columns` characters per line, hyphenating words that do not fit.
fn wrap_columns(text: &str, columns: usize) -> Vec<String> {
    let splitter = match hyphenator() {
        Some(dictionary) => WordSplitter::Hyphenation(dictionary.clone()),
        None => WordSplitter::HyphenSplitter,
    };
    let options = Options::new(columns.max(1))
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(splitter)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}
