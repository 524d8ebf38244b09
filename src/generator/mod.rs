pub mod import;
pub mod practice;
pub mod samples;
pub mod wrap;

use icu_normalizer::ComposingNormalizerBorrowed;

use crate::mode::Mode;
use crate::session::target::TargetText;

/// Turn raw text into something typeable for `mode`.
///
/// Prose is re-wrapped to `width` columns; code keeps its line breaks.
/// Practice text is generated already laid out and passes through as is.
pub fn normalize(raw: &str, mode: Mode, width: usize) -> TargetText {
    match mode {
        Mode::Prose => TargetText::new(&wrap::wrap_words(&compose(raw), width)),
        Mode::Code => TargetText::new(&prepare_code(&compose(raw))),
        Mode::Practice => TargetText::new(raw),
    }
}

/// NFC so that a precomposed key press can match decomposed source text.
fn compose(raw: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(raw)
        .to_string()
}

/// Keep lines verbatim apart from what a keyboard cannot produce here:
/// `\r` is dropped and tabs become four spaces.
fn prepare_code(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', "    ")
}
