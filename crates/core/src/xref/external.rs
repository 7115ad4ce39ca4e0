//! External API symbol resolution.
//!
//! Symbol references bypass local resolution entirely: the URL is derived
//! from the symbol text alone, with no filesystem access and no failure
//! path. Class members share the page of their class, so the link template
//! works for any depth of the symbol path.

use super::ResolvedLink;

/// URL template root for C++ API symbols (namespace A).
const CC_API_BASE: &str = "https://www.tensorflow.org/api_docs/cc/class/";

/// URL template root for Python API symbols (namespace B).
const PY_API_BASE: &str = "https://www.tensorflow.org/api_docs/python/";

/// Resolves a `tensorflow::`-namespaced C++ symbol.
///
/// The symbol is lower-cased and `::` becomes `/` in the URL; the display
/// label keeps the original casing, wrapped as inline code.
pub fn cpp_symbol_link(symbol: &str) -> ResolvedLink {
    let url = format!(
        "{}{}",
        CC_API_BASE,
        symbol.to_lowercase().replace("::", "/")
    );
    ResolvedLink {
        url,
        label: code_label(symbol),
    }
}

/// Resolves a `tf.`/`tfdbg.`-namespaced Python symbol.
///
/// Dots become `/` in the URL; casing is preserved.
pub fn py_symbol_link(symbol: &str) -> ResolvedLink {
    let url = format!("{}{}", PY_API_BASE, symbol.replace('.', "/"));
    ResolvedLink {
        url,
        label: code_label(symbol),
    }
}

fn code_label(symbol: &str) -> String {
    format!("<code>{}</code>", html_escape::encode_text(symbol))
}
