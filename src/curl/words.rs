//! Shell-style word splitting for cURL command lines.
//!
//! Follows the POSIX rules a copy-pasted command relies on: blanks separate
//! words, single quotes are literal, a backslash escapes the next character
//! (inside double quotes too) and adjacent segments glue into one word. An unquoted
//! control operator (`;`, `&`, `|`, `<`, `>`) ends the command.

use winnow::{
    LocatingSlice, ModalResult, Parser,
    combinator::{alt, cut_err, opt, preceded, repeat, terminated},
    error::{StrContext, StrContextValue},
    token::{any, one_of, rest, take_till, take_while},
};

use crate::error::SplitError;

type Input<'a> = LocatingSlice<&'a str>;

const CONTROL_OPERATORS: [char; 5] = [';', '&', '|', '<', '>'];

/// Turns a command string into the ordered list of its words.
pub trait WordSplitter {
    fn split_words(&self, command: &str) -> Result<Vec<String>, SplitError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ShellWords;

impl WordSplitter for ShellWords {
    fn split_words(&self, command: &str) -> Result<Vec<String>, SplitError> {
        command_words
            .parse(LocatingSlice::new(command))
            .map_err(|e| SplitError {
                offset: e.offset(),
                reason: e.inner().to_string().replace('\n', "; "),
            })
    }
}

/// One piece of a word, before the pieces are glued together.
enum Fragment<'a> {
    Literal(&'a str),
    Owned(String),
    Escaped(char),
    Continuation,
}

impl Fragment<'_> {
    fn push_to(self, word: &mut String) {
        match self {
            Fragment::Literal(s) => word.push_str(s),
            Fragment::Owned(s) => word.push_str(&s),
            Fragment::Escaped(c) => word.push(c),
            Fragment::Continuation => {}
        }
    }
}

fn glue(mut word: String, fragment: Fragment<'_>) -> String {
    fragment.push_to(&mut word);
    word
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_word_boundary(c: char) -> bool {
    is_blank(c) || matches!(c, '\'' | '"' | '\\') || CONTROL_OPERATORS.contains(&c)
}

/// Blanks and `\`-newline line continuations between words.
fn blank(s: &mut Input<'_>) -> ModalResult<()> {
    repeat(0.., alt((take_while(1.., is_blank), "\\\r\n", "\\\n"))).parse_next(s)
}

fn single_quoted<'a>(s: &mut Input<'a>) -> ModalResult<&'a str> {
    preceded(
        '\'',
        cut_err(terminated(take_till(0.., '\''), '\''))
            .context(StrContext::Label("single-quoted string"))
            .context(StrContext::Expected(StrContextValue::CharLiteral('\''))),
    )
    .parse_next(s)
}

fn double_quoted_fragment<'a>(s: &mut Input<'a>) -> ModalResult<Fragment<'a>> {
    alt((
        take_till(1.., ['"', '\\']).map(Fragment::Literal),
        preceded('\\', any).map(|c: char| match c {
            '\n' => Fragment::Continuation,
            c => Fragment::Escaped(c),
        }),
    ))
    .parse_next(s)
}

fn double_quoted(s: &mut Input<'_>) -> ModalResult<String> {
    preceded(
        '"',
        cut_err(terminated(
            repeat(0.., double_quoted_fragment).fold(String::new, glue),
            '"',
        ))
        .context(StrContext::Label("double-quoted string"))
        .context(StrContext::Expected(StrContextValue::CharLiteral('"'))),
    )
    .parse_next(s)
}

fn unquoted_fragment<'a>(s: &mut Input<'a>) -> ModalResult<Fragment<'a>> {
    alt((
        take_till(1.., is_word_boundary).map(Fragment::Literal),
        preceded(
            '\\',
            cut_err(any)
                .context(StrContext::Label("escape sequence"))
                .context(StrContext::Expected(StrContextValue::Description(
                    "a character after backslash",
                ))),
        )
        .map(|c: char| match c {
            '\n' => Fragment::Continuation,
            c => Fragment::Escaped(c),
        }),
    ))
    .parse_next(s)
}

fn word(s: &mut Input<'_>) -> ModalResult<String> {
    repeat(
        1..,
        alt((
            single_quoted.map(Fragment::Literal),
            double_quoted.map(Fragment::Owned),
            unquoted_fragment,
        )),
    )
    .fold(String::new, glue)
    .parse_next(s)
}

fn command_words(s: &mut Input<'_>) -> ModalResult<Vec<String>> {
    let words = preceded(blank, repeat(0.., terminated(word, blank))).parse_next(s)?;
    // Whatever follows a control operator belongs to another command.
    opt((one_of(CONTROL_OPERATORS), rest)).void().parse_next(s)?;
    Ok(words)
}

pub fn split_words(command: &str) -> Result<Vec<String>, SplitError> {
    ShellWords.split_words(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::generic_command_parse;
    use rstest::*;

    fn words(expect: &[&str]) -> Vec<String> {
        expect.iter().map(|w| w.to_string()).collect()
    }

    #[rstest]
    #[case("curl https://api.site.com", &["curl", "https://api.site.com"])]
    #[case("  curl\t-k   https://x  ", &["curl", "-k", "https://x"])]
    #[case("curl -H 'Accept: */*' https://x", &["curl", "-H", "Accept: */*", "https://x"])]
    #[case(r#"curl -H "User-Agent: slothy""#, &["curl", "-H", "User-Agent: slothy"])]
    #[case(r#"curl -d 'rakulang "rocks"'"#, &["curl", "-d", r#"rakulang "rocks""#])]
    #[case(r#"curl -d "rakulang 'rocks'""#, &["curl", "-d", "rakulang 'rocks'"])]
    #[case(r#"a'b c'"d""#, &["ab cd"])]
    #[case(r"a\ b", &["a b"])]
    #[case("curl ''", &["curl", ""])]
    fn test_split_words(#[case] input: &str, #[case] expect: &[&str]) {
        generic_command_parse(split_words, input, words(expect));
    }

    #[test]
    fn test_double_quoted_escapes() {
        let input = r#"curl -d "a \"b\" \$c \\ \x""#;
        generic_command_parse(split_words, input, words(&["curl", "-d", r#"a "b" $c \ x"#]));
    }

    #[test]
    fn test_line_continuations() {
        let input = "curl 'https://api.site.com' \\\n  -H 'Accept: */*' \\\r\n  --insecure";
        generic_command_parse(
            split_words,
            input,
            words(&["curl", "https://api.site.com", "-H", "Accept: */*", "--insecure"]),
        );
    }

    #[test]
    fn test_quoted_newlines_are_kept() {
        let input = "curl -d '{\n  \"a\": 1\n}'";
        generic_command_parse(split_words, input, words(&["curl", "-d", "{\n  \"a\": 1\n}"]));
    }

    #[rstest]
    #[case("curl https://x | jq .", &["curl", "https://x"])]
    #[case("curl https://x; echo done", &["curl", "https://x"])]
    #[case("curl https://x > out.json", &["curl", "https://x"])]
    #[case("curl -d 'a=1&b=2' https://x", &["curl", "-d", "a=1&b=2", "https://x"])]
    fn test_control_operators(#[case] input: &str, #[case] expect: &[&str]) {
        generic_command_parse(split_words, input, words(expect));
    }

    #[rstest]
    #[case("curl 'https://x")]
    #[case(r#"curl -H "Accept: */*"#)]
    #[case(r#"curl -d "trailing \"#)]
    #[case(r"curl https://x \")]
    fn test_malformed_quoting(#[case] input: &str) {
        let err = split_words(input).unwrap_err();
        assert!(err.offset <= input.len(), "offset out of range: {err:?}");
        assert!(!err.reason.is_empty(), "missing reason: {err:?}");
    }

    #[test]
    fn test_unterminated_quote_reason() {
        let err = split_words("curl -d 'abc").unwrap_err();
        assert!(err.reason.contains("single-quoted"), "{}", err.reason);
    }
}
