//! Prefix table used to compact IRIs into prefixed names

use ldwizard_vocab::namespaces;

/// Ordered prefix → namespace bindings
///
/// Bindings keep declaration order, which is also the order of the
/// `@prefix` lines in the output. A name is bound at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixMap {
    entries: Vec<(String, String)>,
}

impl PrefixMap {
    /// Create an empty prefix map
    pub fn new() -> Self {
        Self::default()
    }

    /// The starting set: the empty prefix bound to `base_iri`, then the
    /// well-known namespaces (xsd, rdf, rdfs, schema, ...)
    pub fn well_known(base_iri: &str) -> Self {
        let mut map = Self::new();
        map.insert("", base_iri);
        for (prefix, namespace) in namespaces::WELL_KNOWN {
            map.insert(*prefix, *namespace);
        }
        map
    }

    /// Bind `prefix`, replacing the namespace if the name is already bound
    pub fn insert(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        let prefix = prefix.into();
        let namespace = namespace.into();
        match self.entries.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = namespace,
            None => self.entries.push((prefix, namespace)),
        }
    }

    /// Bind `prefix` only if the name is still free; returns whether it was added
    pub fn insert_if_absent(&mut self, prefix: &str, namespace: &str) -> bool {
        if self.get(prefix).is_some() {
            return false;
        }
        self.entries.push((prefix.to_string(), namespace.to_string()));
        true
    }

    /// Add prefixes discovered in a parsed document under their own names,
    /// skipping names that are already bound
    pub fn merge_discovered<'a, I>(&mut self, discovered: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (prefix, namespace) in discovered {
            if !self.insert_if_absent(prefix, namespace) {
                tracing::debug!(prefix, namespace, "discovered prefix already bound");
            }
        }
    }

    /// Namespace bound to `prefix`
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, ns)| ns.as_str())
    }

    /// Iterate over bindings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact `iri` to `prefix:local`
    ///
    /// The longest matching namespace wins; on equal length the earlier
    /// declaration wins. Returns `None` when no namespace matches or the
    /// remainder is not a valid Turtle local name.
    pub fn compact(&self, iri: &str) -> Option<String> {
        let mut best: Option<(&str, &str)> = None;
        for (prefix, namespace) in &self.entries {
            if namespace.is_empty() || !iri.starts_with(namespace.as_str()) {
                continue;
            }
            if best.map_or(true, |(_, ns)| namespace.len() > ns.len()) {
                best = Some((prefix.as_str(), namespace.as_str()));
            }
        }

        let (prefix, namespace) = best?;
        let local = &iri[namespace.len()..];
        is_valid_local_name(local).then(|| format!("{prefix}:{local}"))
    }
}

fn is_pn_chars_u(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_pn_chars(c: char) -> bool {
    is_pn_chars_u(c) || c == '-' || c.is_ascii_digit() || c == '\u{00B7}'
}

/// Check that `local` can be written unescaped after `prefix:` in Turtle
///
/// Accepts the PN_LOCAL production including `%XX` percent escapes, but not
/// backslash escapes. The empty string is valid.
pub fn is_valid_local_name(local: &str) -> bool {
    let chars: Vec<char> = local.chars().collect();
    if chars.last() == Some(&'.') {
        return false;
    }

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '%' {
            let hex = |j: usize| chars.get(j).is_some_and(|h| h.is_ascii_hexdigit());
            if !(hex(i + 1) && hex(i + 2)) {
                return false;
            }
            i += 3;
            continue;
        }

        let ok = if i == 0 {
            is_pn_chars_u(c) || c == ':' || c.is_ascii_digit()
        } else {
            is_pn_chars(c) || c == '.' || c == ':'
        };
        if !ok {
            return false;
        }
        i += 1;
    }
    true
}
