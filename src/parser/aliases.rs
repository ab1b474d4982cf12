//! Shorthand print lines.
//!
//! ```text
//! p a, b     →  __p(a, b)     // each value with %+v
//! t a, b     →  __t(a, b)     // each value's type
//! ```
//!
//! A line only counts as shorthand when what follows `p`/`t` does not look
//! like an assignment or a call (`p := 1`, `p = 2`, `t (x)` are left alone).

const ALIASES: [(&str, &str); 2] = [("p", "__p"), ("t", "__t")];

fn expand_line(line: &str) -> Option<String> {
    let trimmed = line.trim_start_matches([' ', '\t']);
    ALIASES.iter().find_map(|(alias, helper)| {
        let rest = trimmed.strip_prefix(alias)?;
        let args = rest.trim_start_matches(' ');
        // at least one space, then something that is not `=`, `:` or `(`
        if args.len() == rest.len() {
            return None;
        }
        let first = args.chars().next()?;
        if first.is_whitespace() || matches!(first, '=' | ':' | '(') {
            return None;
        }
        Some(format!("{helper}({args})"))
    })
}

/// Rewrite `p`/`t` lines into helper calls. Line structure is preserved so
/// line numbers stay valid.
pub fn expand_aliases(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    for line in code.split_inclusive('\n') {
        let (body, eol) = match line.strip_suffix('\n') {
            Some(body) => match body.strip_suffix('\r') {
                Some(body) => (body, "\r\n"),
                None => (body, "\n"),
            },
            None => (line, ""),
        };
        match expand_line(body) {
            Some(expanded) => out.push_str(&expanded),
            None => out.push_str(body),
        }
        out.push_str(eol);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_aliases() {
        let test_cases = vec![
            ("p \"hi\"", "__p(\"hi\")"),
            ("p a, b\n", "__p(a, b)\n"),
            ("  t x, 3.5\n", "__t(x, 3.5)\n"),
            ("p   foo(), 2*3", "__p(foo(), 2*3)"),
            ("p := 10\n", "p := 10\n"),
            ("p = 11\n", "p = 11\n"),
            ("p (100)\n", "p (100)\n"),
            ("p\n", "p\n"),
            ("p \n", "p \n"),
            ("pp x\n", "pp x\n"),
            ("print(x)\n", "print(x)\n"),
            ("x := p\n", "x := p\n"),
            ("t.Run()\n", "t.Run()\n"),
        ];

        for (src, expected) in test_cases {
            assert_eq!(expand_aliases(src), expected, "source {src:?}");
        }
    }

    #[test]
    fn test_line_count_is_preserved() {
        let src = "a := 1\n\np a\n\r\nt a\r\nfmt.Println(a)";
        let out = expand_aliases(src);

        assert_eq!(out, "a := 1\n\n__p(a)\n\r\n__t(a)\r\nfmt.Println(a)");
        assert_eq!(out.matches('\n').count(), src.matches('\n').count());
    }
}
