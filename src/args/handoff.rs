//! Hand-off builder — the comma-delimited string read by the launch framework.
//!
//! ```text
//! mode=acscript[,appcpath=<paths>][,arg=<encoded>]...[,client=<kind>=<encoded>]
//! ```

const SEP: char = ',';

/// Builder for the framework hand-off string.
#[derive(Debug, Clone)]
pub struct Handoff {
    items: Vec<String>,
}

impl Handoff {
    /// Start with the mode keyword.
    pub fn new(mode: &str) -> Self {
        Self {
            items: vec![format!("mode={}", mode)],
        }
    }

    /// Framework class path additions, when present.
    pub fn with_appcpath(mut self, appcpath: Option<&str>) -> Self {
        if let Some(paths) = appcpath.filter(|p| !p.is_empty()) {
            self.items.push(format!("appcpath={}", encode_arg(paths)));
        }
        self
    }

    /// One `arg=` item per framework-stream token, in order.
    pub fn with_args<'a>(mut self, args: impl IntoIterator<Item = &'a String>) -> Self {
        self.items
            .extend(args.into_iter().map(|a| format!("arg={}", encode_arg(a))));
        self
    }

    /// The resolved identity clause, if any.
    pub fn with_identity(mut self, clause: Option<String>) -> Self {
        self.items.extend(clause);
        self
    }

    pub fn build(self) -> String {
        self.items.join(&SEP.to_string())
    }
}

/// Escape the characters that would break the comma-delimited layout or
/// the surrounding command line.
pub fn encode_arg(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len());
    for c in arg.chars() {
        match c {
            '%' | ',' => out.push_str(&format!("%{:02X}", c as u32)),
            c if c.is_ascii_whitespace() => out.push_str(&format!("%{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Reverse of [`encode_arg`]. Malformed escapes are kept literally.
pub fn decode_arg(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(b) = decoded {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Split a hand-off string back into `(key, value)` items, decoding `arg`,
/// `appcpath` and `client` values.
pub fn parse_handoff(handoff: &str) -> Vec<(String, String)> {
    handoff
        .split(SEP)
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once('=') {
            Some((key @ ("arg" | "appcpath" | "client"), value)) => {
                (key.to_string(), decode_arg(value))
            }
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (item.to_string(), String::new()),
        })
        .collect()
}
