/// Short method flag; `-XPUT` is split into `-X` and `PUT`.
pub const METHOD_FLAG: &str = "-X";

/// Cleans up the words produced by the splitter before the state machine sees them.
pub fn sanitize<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = Vec::new();
    for word in words {
        let word = word.as_ref();
        if word == "\n" {
            continue;
        }

        let mut token = word.trim().to_string();
        if token.contains('\n') {
            token = token.replace('\n', "");
        }

        match token.strip_prefix(METHOD_FLAG) {
            Some(method) if !method.is_empty() => {
                tokens.push(METHOD_FLAG.to_string());
                tokens.push(method.to_string());
            }
            _ => tokens.push(token),
        }
    }
    tokens
}
