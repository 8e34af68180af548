/// Structural email check: `local@domain.tld`, where each of the three parts
/// is one or more characters that are neither whitespace nor `@`.
///
/// Whitespace is the ECMAScript `\s` set, which differs from
/// `char::is_whitespace` on U+0085 (allowed) and U+FEFF (rejected).
pub fn is_valid_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if !is_atom(local) || domain.contains('@') {
        return false;
    }
    // Any dot with a non-empty part on both sides will do.
    domain
        .char_indices()
        .filter(|&(_, ch)| ch == '.')
        .any(|(idx, _)| is_atom(&domain[..idx]) && is_atom(&domain[idx + 1..]))
}

fn is_atom(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|ch| !is_space(ch) && ch != '@')
}

fn is_space(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}
