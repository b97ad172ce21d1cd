//! Helpers for `{path.to.token}` reference expressions.

/// Whether the entire string is a single reference expression.
pub fn is_reference(value: &str) -> bool {
    let v = value.trim();
    if !(v.starts_with('{') && v.ends_with('}') && v.len() > 2) {
        return false;
    }
    let inner = &v[1..v.len() - 1];
    !inner.is_empty() && !inner.contains('{') && !inner.contains('}')
}

/// Whether the string contains at least one reference expression anywhere.
pub fn uses_references(value: &str) -> bool {
    let Some(open) = value.find('{') else {
        return false;
    };
    match value[open + 1..].find('}') {
        Some(close) => close > 0,
        None => false,
    }
}

/// Path segments of a full-string reference (`"{a.b.c}"` → `["a", "b", "c"]`).
pub fn split_reference(value: &str) -> Option<Vec<String>> {
    if !is_reference(value) {
        return None;
    }
    let v = value.trim();
    Some(v[1..v.len() - 1].split('.').map(str::to_string).collect())
}

/// Every reference expression embedded in the string, in order of occurrence,
/// as dotted paths without braces.
pub fn reference_paths(value: &str) -> Vec<String> {
    let mut refs = Vec::new();
    let mut rest = value;
    while let Some(open) = rest.find('{') {
        let tail = &rest[open + 1..];
        let Some(close) = tail.find('}') else { break };
        if close > 0 {
            refs.push(tail[..close].to_string());
        }
        rest = &tail[close + 1..];
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_reference_detection() {
        assert!(is_reference("{color.primary}"));
        assert!(is_reference(" {space.sm} "));
        assert!(!is_reference("{space.sm} * 2"));
        assert!(!is_reference("plain"));
        assert!(!is_reference("{}"));
        assert!(!is_reference("{a{b}}"));
    }

    #[test]
    fn embedded_reference_detection() {
        assert!(uses_references("{space.sm} * 2"));
        assert!(uses_references("calc({a.b} + {c.d})"));
        assert!(!uses_references("16px"));
        assert!(!uses_references("{}"));
    }

    #[test]
    fn splits_segments() {
        assert_eq!(
            split_reference("{color.palette.blue.500}"),
            Some(vec![
                "color".into(),
                "palette".into(),
                "blue".into(),
                "500".into()
            ])
        );
        assert_eq!(split_reference("{a.b} + 1"), None);
    }

    #[test]
    fn collects_embedded_paths() {
        assert_eq!(
            reference_paths("{space.sm} * 2 + {space.xs}"),
            vec!["space.sm".to_string(), "space.xs".to_string()]
        );
        assert!(reference_paths("none here").is_empty());
    }
}
