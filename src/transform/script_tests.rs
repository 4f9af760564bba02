use super::*;
use crate::transform::Highlight;

const DEFAULT: Color = Color::rgb(0xF8, 0xF8, 0xF2);
const STRING: Color = Color::rgb(0xF1, 0xFA, 0x8C);
const COMMENT: Color = Color::rgb(0x62, 0x72, 0xA4);
const KEYWORD: Color = Color::rgb(0xFF, 0x00, 0x00);

fn highlighter(words: &[&str]) -> ScriptHighlighter {
    let keywords = words
        .iter()
        .map(|w| (w.to_string(), KEYWORD))
        .collect();
    ScriptHighlighter::new(DEFAULT, STRING, COMMENT, keywords)
}

/// Color at the transformed position where `needle` starts.
fn color_at_match(result: &Highlighted, needle: &str, occurrence: usize) -> Color {
    let mut from = 0;
    let mut byte_pos = 0;
    for _ in 0..=occurrence {
        byte_pos = result.styled.text[from..]
            .find(needle)
            .map(|p| from + p)
            .expect("needle present");
        from = byte_pos + needle.len();
    }
    let char_pos = result.styled.text[..byte_pos].chars().count();
    result.styled.style_at(char_pos).expect("styled").color
}

#[test]
fn keywords_take_their_dictionary_color() {
    let hl = highlighter(&["let"]);
    let result = hl.highlight("let x = 1");
    assert_eq!(color_at_match(&result, "let", 0), KEYWORD);
    assert_eq!(color_at_match(&result, "x", 0), DEFAULT);
}

#[test]
fn keywords_inside_strings_and_comments_stay_suppressed() {
    let hl = highlighter(&["let"]);
    let result = hl.highlight("let s = \"let\" // let");
    assert_eq!(color_at_match(&result, "let", 0), KEYWORD);
    assert_eq!(color_at_match(&result, "let", 1), STRING);
    assert_eq!(color_at_match(&result, "let", 2), COMMENT);
}

#[test]
fn both_quote_delimiters_use_the_string_color() {
    let hl = highlighter(&[]);
    let result = hl.highlight("a\"b\"c");
    assert_eq!(color_at_match(&result, "\"b", 0), STRING);
    assert_eq!(color_at_match(&result, "b", 0), STRING);
    assert_eq!(color_at_match(&result, "c", 0), DEFAULT);
}

#[test]
fn both_comment_slashes_use_the_comment_color() {
    let hl = highlighter(&[]);
    let result = hl.highlight("x // y");
    let slash = result.styled.text.find("//").unwrap();
    assert_eq!(result.styled.style_at(slash).unwrap().color, COMMENT);
    assert_eq!(result.styled.style_at(slash + 1).unwrap().color, COMMENT);
}

#[test]
fn comments_end_at_the_newline() {
    let hl = highlighter(&["let"]);
    let result = hl.highlight("// let\nlet");
    assert_eq!(color_at_match(&result, "let", 0), COMMENT);
    assert_eq!(color_at_match(&result, "let", 1), KEYWORD);
}

#[test]
fn an_open_string_carries_across_lines() {
    // A string left open at end of line stays open. The original behaves
    // this way (comments reset at newline, strings do not) and the
    // asymmetry is preserved.
    let hl = highlighter(&["val"]);
    let result = hl.highlight("\"abc\nval");
    assert_eq!(color_at_match(&result, "val", 0), STRING);
}

#[test]
fn quotes_inside_comments_do_not_open_strings() {
    let hl = highlighter(&["let"]);
    let result = hl.highlight("// \"\nlet");
    assert_eq!(color_at_match(&result, "let", 0), KEYWORD);
}

#[test]
fn slashes_inside_strings_do_not_open_comments() {
    let hl = highlighter(&["let"]);
    let result = hl.highlight("\"//\" let");
    assert_eq!(color_at_match(&result, "let", 0), KEYWORD);
}

#[test]
fn keyword_lookup_survives_tab_expansion() {
    let hl = highlighter(&["let"]);
    let result = hl.highlight("\tlet x");
    assert_eq!(result.styled.text, "    let x");
    assert_eq!(color_at_match(&result, "let", 0), KEYWORD);
    // The expanded indent maps back to the tab.
    assert_eq!(result.map.transformed_to_original(2), 0);
}

#[test]
fn spans_cover_the_whole_transformed_text() {
    let hl = highlighter(&["let"]);
    let result = hl.highlight("let s = \"a\tb\" // c\nx");
    assert_eq!(result.styled.char_len(), result.map.len());
    assert_eq!(
        result.styled.char_len(),
        result.styled.text.chars().count()
    );
}

#[test]
fn script_highlighting_emits_no_annotations() {
    let hl = highlighter(&["let"]);
    let result = hl.highlight("let x = 1 // ok");
    assert!(result.annotations.is_empty());
}

#[test]
fn replacing_the_dictionary_takes_effect() {
    let mut hl = highlighter(&[]);
    assert_eq!(color_at_match(&hl.highlight("fun"), "fun", 0), DEFAULT);
    hl.set_keywords([("fun".to_string(), KEYWORD)].into_iter().collect());
    assert_eq!(color_at_match(&hl.highlight("fun"), "fun", 0), KEYWORD);
}
