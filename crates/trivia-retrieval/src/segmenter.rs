//! Sentence and paragraph segmentation.
//!
//! Segments are slices of the input, so every returned unit occurs
//! verbatim in the document it was cut from.

/// Splits a document into ordered units.
pub trait Segmenter: Send + Sync {
    /// Units in document order. Blank units are never returned.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Closing characters that may trail sentence-final punctuation.
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}', '\u{bb}'];

/// Opening characters stripped before the abbreviation check.
const OPENERS: &[char] = &['"', '\'', '(', '[', '{', '\u{201c}', '\u{2018}', '\u{ab}'];

/// Words that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e", "inc",
    "ltd", "co", "corp", "dept", "fig", "vol", "approx", "gen", "col", "capt", "lt",
    "sgt", "rev", "gov", "sen", "rep", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec", "a.m", "p.m", "u.s", "u.k",
];

/// Rule-based sentence splitter.
///
/// A sentence ends at `.`, `!` or `?` (plus any trailing closing quotes
/// or brackets) when followed by whitespace or the end of the text. A
/// period after a known abbreviation or a single-letter initial does not
/// end a sentence. A blank line always ends one. Sentences are trimmed.
#[derive(Debug, Clone, Default)]
pub struct SentenceSegmenter;

impl SentenceSegmenter {
    pub fn new() -> Self {
        Self
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Whether the period at the end of `head` belongs to an abbreviation.
fn ends_with_abbreviation(head: &str) -> bool {
    let word = head
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(OPENERS);
    if word.is_empty() {
        return false;
    }

    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        // Single-letter initial, as in "J. Smith"
        if c.is_alphabetic() {
            return true;
        }
    }

    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

impl Segmenter for SentenceSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        let push = |from: usize, to: usize, out: &mut Vec<&'a str>| {
            let sentence = text[from..to].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
        };

        while i < chars.len() {
            let (pos, c) = chars[i];

            if c == '\n' {
                // A blank line is a hard boundary.
                let mut j = i + 1;
                while j < chars.len() && chars[j].1.is_whitespace() && chars[j].1 != '\n' {
                    j += 1;
                }
                if j < chars.len() && chars[j].1 == '\n' {
                    push(start, pos, &mut sentences);
                    start = chars[j].0;
                    i = j;
                    continue;
                }
                i += 1;
                continue;
            }

            if !is_terminator(c) {
                i += 1;
                continue;
            }

            // Consume the whole run of terminators and closers.
            let mut j = i + 1;
            while j < chars.len() && (is_terminator(chars[j].1) || CLOSERS.contains(&chars[j].1)) {
                j += 1;
            }
            let end = chars.get(j).map(|(p, _)| *p).unwrap_or(text.len());
            let at_break = j == chars.len() || chars[j].1.is_whitespace();

            let abbreviated = c == '.'
                && j - i == 1
                && j < chars.len()
                && ends_with_abbreviation(&text[start..pos]);

            if at_break && !abbreviated {
                push(start, end, &mut sentences);
                start = end;
            }
            i = j;
        }

        push(start, text.len(), &mut sentences);
        sentences
    }
}

/// Splits on newlines; blank lines are skipped.
#[derive(Debug, Clone, Default)]
pub struct ParagraphSegmenter;

impl ParagraphSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for ParagraphSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}
