//! Guessing which standard packages a snippet uses.
//!
//! Any `name.` where `name` is the last element of a standard package path is
//! taken as a package reference. This over-approximates (a local variable
//! called `path` looks like package `path`); the runner removes wrong guesses
//! once the compiler complains about them.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use crate::model::ImportSet;

#[rustfmt::skip]
const STD_PACKAGES: &[&str] = &[
    "archive/tar", "archive/zip", "bufio", "bytes", "compress/bzip2",
    "compress/flate", "compress/gzip", "compress/lzw", "compress/zlib",
    "container/heap", "container/list", "container/ring", "context", "crypto",
    "crypto/aes", "crypto/cipher", "crypto/des", "crypto/dsa", "crypto/ecdsa",
    "crypto/elliptic", "crypto/hmac", "crypto/md5", "crypto/rc4", "crypto/rsa",
    "crypto/sha1", "crypto/sha256", "crypto/sha512", "crypto/subtle", "crypto/tls",
    "crypto/x509", "crypto/x509/pkix", "database/sql", "database/sql/driver",
    "debug/dwarf", "debug/elf", "debug/gosym", "debug/macho", "debug/pe",
    "encoding/ascii85", "encoding/asn1", "encoding/base32", "encoding/base64",
    "encoding/binary", "encoding/csv", "encoding/gob", "encoding/hex",
    "encoding/json", "encoding/pem", "encoding/xml", "errors", "expvar", "flag",
    "fmt", "go/ast", "go/build", "go/doc", "go/parser", "go/printer", "go/token",
    "hash", "hash/adler32", "hash/crc32", "hash/crc64", "hash/fnv", "html",
    "image", "image/color", "image/draw", "image/gif", "image/jpeg", "image/png",
    "index/suffixarray", "io", "io/ioutil", "log", "log/syslog", "math",
    "math/big", "math/bits", "math/cmplx", "math/rand", "mime", "mime/multipart",
    "net", "net/http", "net/http/cgi", "net/http/fcgi", "net/http/httputil",
    "net/http/pprof", "net/mail", "net/rpc", "net/rpc/jsonrpc", "net/smtp",
    "net/textproto", "net/url", "os", "os/exec", "os/signal", "os/user", "path",
    "path/filepath", "reflect", "regexp", "regexp/syntax", "runtime",
    "runtime/cgo", "runtime/debug", "slices", "sort", "strconv", "strings",
    "sync", "sync/atomic", "syscall", "text/scanner", "text/tabwriter",
    "text/template", "text/template/parse", "time", "unicode", "unicode/utf16",
    "unicode/utf8", "unsafe",
];

/// Short name (last path element) → canonical import path. Built once, read-only.
static STD_TABLE: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    STD_PACKAGES
        .iter()
        .map(|&path| (path.rsplit('/').next().unwrap_or(path), path))
        .collect()
});

/// Canonical path for a package short name. `extra` holds user-configured
/// entries and is only consulted when the standard table has no match.
pub fn lookup<'a>(name: &str, extra: &'a BTreeMap<String, String>) -> Option<&'a str> {
    if let Some(&path) = STD_TABLE.get(name) {
        return Some(path);
    }
    extra.get(name).map(String::as_str)
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Every `qualifier.` candidate in `text`: at a word boundary, starting with a
/// lowercase ASCII letter, at least two characters long.
pub fn qualifiers(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < bytes.len() {
            let start = i;
            if !is_word(bytes[i]) {
                i += 1;
                continue;
            }
            while i < bytes.len() && is_word(bytes[i]) {
                i += 1;
            }
            let word = &text[start..i];
            let followed_by_dot = bytes.get(i) == Some(&b'.');
            if followed_by_dot && word.len() >= 2 && bytes[start].is_ascii_lowercase() {
                return Some(word);
            }
        }
        None
    })
}

/// Record the import path of every known package referenced in `text`.
pub fn infer(text: &str, extra: &BTreeMap<String, String>, imports: &mut ImportSet) {
    for name in qualifiers(text) {
        if let Some(path) = lookup(name, extra) {
            imports.insert(path.to_string());
        }
    }
}
