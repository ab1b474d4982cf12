//! Builds the final `package main` compilation unit from a partition.

use crate::model::Partition;

/// Needed by the `__p`/`__t` helpers, so it is always requested.
pub const SUPPORT_IMPORT: &str = "fmt";

const HELPERS: &str = r#"
func __p(values ...interface{}) {
	for _, v := range values {
		fmt.Printf("%+v\n", v)
	}
}

func __t(values ...interface{}) {
	for _, v := range values {
		fmt.Printf("%T\n", v)
	}
}
"#;

/// True when the source already declares its own package and must be run
/// as written.
pub fn has_package_clause(src: &str) -> bool {
    src.trim_start()
        .strip_prefix("package")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

/// Wrap a partitioned snippet into one compilable file: imports, top-level
/// declarations, a `main` holding the body, then the print helpers.
pub fn assemble(partition: &Partition) -> String {
    let mut src = String::from("package main\n");

    for path in &partition.imports {
        src.push_str(&format!("import \"{path}\"\n"));
    }

    src.push_str(&partition.top_level);
    if !partition.top_level.is_empty() && !partition.top_level.ends_with('\n') {
        src.push('\n');
    }

    src.push_str("func main() {\n");
    src.push_str(&partition.body);
    if !partition.body.is_empty() && !partition.body.ends_with('\n') {
        src.push('\n');
    }
    src.push_str("}\n");

    src.push_str(HELPERS);
    src
}
