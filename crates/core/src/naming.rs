//! File names derived from template names.

use crate::presets::DEFAULT_TEMPLATE_NAME;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Characters no common filesystem accepts in a file name.
static UNSAFE_FILENAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f\x7f]"#).unwrap());

/// Suffix appended to every generated file name.
pub const OUTPUT_SUFFIX: &str = "_模板.pptx";

/// File name for a deck built from `template_name`, e.g. `"季度汇报_模板.pptx"`.
///
/// The name is NFC-normalized so composed and decomposed input map to the
/// same file. A name that is empty after cleaning uses the default template
/// name.
pub fn output_file_name(template_name: &str) -> String {
    let composed: String = template_name.nfc().collect();
    let cleaned = UNSAFE_FILENAME_REGEX.replace_all(&composed, "_");
    let stem = match cleaned.trim() {
        "" => DEFAULT_TEMPLATE_NAME,
        stem => stem,
    };
    format!("{}{}", stem, OUTPUT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(output_file_name("季度汇报"), "季度汇报_模板.pptx");
        assert_eq!(output_file_name("  Q3 Review  "), "Q3 Review_模板.pptx");
    }

    #[test]
    fn test_unsafe_characters_replaced() {
        assert_eq!(output_file_name("a/b\\c:d"), "a_b_c_d_模板.pptx");
        assert_eq!(output_file_name("what?*<>|\""), "what_______模板.pptx");
        assert_eq!(output_file_name("draft?"), "draft__模板.pptx");
        assert_eq!(output_file_name("tab\there"), "tab_here_模板.pptx");
    }

    #[test]
    fn test_empty_name_falls_back() {
        assert_eq!(output_file_name(""), "我的PPT模板_模板.pptx");
        assert_eq!(output_file_name("   "), "我的PPT模板_模板.pptx");
    }

    #[test]
    fn test_nfc_normalization() {
        // "e" followed by a combining acute accent composes to "é".
        assert_eq!(output_file_name("Cafe\u{301}"), "Caf\u{e9}_模板.pptx");
    }
}
