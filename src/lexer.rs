use chumsky::prelude::*;

/// Splits a line into its whitespace-delimited words, keeping the byte span
/// of each word for diagnostics. Any run of whitespace separates words;
/// leading and trailing whitespace produces no empty words.
pub fn lexer<'a>()
-> impl Parser<'a, &'a str, Vec<(String, SimpleSpan)>, extra::Err<Simple<'a, char>>> {
    let word = any()
        .filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string());

    let token = word.map_with(|w, e| (w, e.span())).padded();

    token.repeated().collect().padded().then_ignore(end())
}
