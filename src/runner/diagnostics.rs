//! Reading compiler output: which guessed imports were wrong, and how to
//! show the rest to the user.

/// Compiler-specific knowledge the repair loop needs.
pub trait DiagnosticClassifier {
    /// Package names or import paths that the diagnostics blame on an import
    /// we added ourselves (unused, or clashing with a user declaration).
    fn implicated_imports(&self, diagnostics: &str) -> Vec<String>;

    /// Raw toolchain output as `line:message` strings, noise removed.
    fn translate(&self, diagnostics: &str) -> Vec<String>;
}

/// Diagnostics of the `go` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoClassifier;

/// Printed by `go run` ahead of the compile errors; carries no information.
const BANNER: &str = "# command-line-arguments";

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '/' | '.' | '-')
}

fn unquote(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, '"' | '\'' | '`'))
}

/// The (possibly quoted) name that ends right before `marker` on `line`.
fn name_before<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let head = line[..line.find(marker)?].trim_end();
    let head = head.trim_end_matches(['"', '\'']);
    let start = head
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_name_char(c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let name = unquote(&head[start..]);
    (!name.is_empty()).then_some(name)
}

/// The double-quoted string right after `marker` on `line`.
fn quoted_after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let idx = line.find(marker)? + marker.len();
    let rest = line[idx..].trim_start().strip_prefix('"')?;
    rest.split_once('"').map(|(name, _)| name)
}

/// Split `file:line[ctx]:msg`, `file:line:col:msg` or `file:line:msg` into
/// the line number and the message. `file` is empty or names a `.go` file;
/// anything else (say, a `key:1:value` line the program printed) is left
/// untouched.
fn split_location(line: &str) -> Option<(&str, &str)> {
    for (i, _) in line.match_indices(':') {
        let file = &line[..i];
        if file.contains(char::is_whitespace) {
            return None;
        }
        if !file.is_empty() && !file.ends_with(".go") {
            continue;
        }
        let rest = &line[i + 1..];
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            continue;
        }
        let (num, after) = rest.split_at(digits);

        let msg = if let Some(ctx) = after.strip_prefix('[') {
            ctx.split_once("]:")?.1
        } else if let Some(msg) = after.strip_prefix(':') {
            let col = msg.len() - msg.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            match msg[col..].strip_prefix(':') {
                Some(tail) if col > 0 => tail,
                _ => msg,
            }
        } else {
            continue;
        };
        return Some((num, msg));
    }
    None
}

impl DiagnosticClassifier for GoClassifier {
    fn implicated_imports(&self, diagnostics: &str) -> Vec<String> {
        let mut names = Vec::new();
        for line in diagnostics.lines() {
            let found = name_before(line, " redeclared as imported package name")
                .or_else(|| quoted_after(line, "imported and not used:"))
                .or_else(|| name_before(line, " imported and not used"))
                .or_else(|| name_before(line, " redeclared in this block"))
                .or_else(|| name_before(line, " already declared through import of"));
            if let Some(name) = found {
                names.push(name.to_string());
            }
        }
        names
    }

    fn translate(&self, diagnostics: &str) -> Vec<String> {
        diagnostics
            .lines()
            .filter(|l| !l.trim().is_empty() && !l.starts_with(BANNER))
            .map(|l| match split_location(l) {
                Some((line, msg)) => format!("{line}:{msg}"),
                None => l.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicated_imports() {
        let test_cases = vec![
            (":3: fmt redeclared as imported package name", vec!["fmt"]),
            (":1: imported and not used: \"os\"", vec!["os"]),
            ("./gore_eval.go:4:8: \"math/rand\" imported and not used", vec!["math/rand"]),
            (":7:2: time redeclared in this block", vec!["time"]),
            (":7:2: 'sort' redeclared in this block", vec!["sort"]),
            (":4:6: path already declared through import of package path (\"path\")", vec!["path"]),
            (":2:6: undefined: x", vec![]),
            (
                "# command-line-arguments\n:1: imported and not used: \"strings\"\n:5: path redeclared as imported package name",
                vec!["strings", "path"],
            ),
        ];

        for (diag, expected) in test_cases {
            assert_eq!(GoClassifier.implicated_imports(diag), expected, "diagnostics {diag:?}");
        }
    }

    #[test]
    fn test_translate_locations() {
        let test_cases = vec![
            (":3[/tmp/gore_eval.go:12]: undefined: x", "3: undefined: x"),
            ("./gore_eval.go:3:5: undefined: x", "3: undefined: x"),
            (":14:2: declared and not used: y", "14: declared and not used: y"),
            ("/tmp/gore_eval.go:9: syntax error", "9: syntax error"),
            ("C:\\tmp\\gore_eval.go:2:1: bad", "2: bad"),
            ("panic: runtime error: index out of range [5]", "panic: runtime error: index out of range [5]"),
            ("\t/tmp/gore_eval.go:5 +0x1d", "\t/tmp/gore_eval.go:5 +0x1d"),
            ("exit status 2", "exit status 2"),
            ("key:1:value", "key:1:value"),
            ("main.go.bak:3: not a source", "main.go.bak:3: not a source"),
        ];

        for (raw, expected) in test_cases {
            assert_eq!(GoClassifier.translate(raw), vec![expected], "raw {raw:?}");
        }
    }

    #[test]
    fn test_program_output_is_not_rewritten() {
        assert_eq!(
            GoClassifier.translate("key:1:value\npanic: boom\n./gore_eval.go:7: oops"),
            vec!["key:1:value", "panic: boom", "7: oops"]
        );
    }

    #[test]
    fn test_translate_drops_banner_and_blank_lines() {
        let raw = "# command-line-arguments\n./gore_eval.go:2:1: undefined: foo\n\n:4:3: undefined: bar\n";
        assert_eq!(
            GoClassifier.translate(raw),
            vec!["2: undefined: foo", "4: undefined: bar"]
        );
    }
}
