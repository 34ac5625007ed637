//! Turning raw message text into a command lookup.

/// Outcome of prefix-aware command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// First whitespace-delimited token after optional prefix stripping.
    /// Empty when the body held nothing but whitespace.
    pub name: String,
    pub args: Vec<String>,
    /// Whether the trimmed body started with the configured prefix.
    pub has_prefix: bool,
}

/// Parse `raw` against the configured `prefix`.
///
/// The body is trimmed, checked for the literal prefix at position 0 (and
/// stripped of exactly that many characters when present), then split on
/// runs of whitespace. No case folding; registry lookup stays
/// case-sensitive.
#[must_use]
pub fn resolve(raw: &str, prefix: &str) -> ResolvedCommand {
    let trimmed = raw.trim();
    let has_prefix = trimmed.starts_with(prefix);
    let rest = if has_prefix {
        &trimmed[prefix.len()..]
    } else {
        trimmed
    };

    let mut tokens = rest.split_whitespace().map(str::to_string);
    let name = tokens.next().unwrap_or_default();
    let args: Vec<String> = tokens.collect();

    ResolvedCommand {
        name,
        args,
        has_prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_command_with_arg() {
        let r = resolve("/ping foo", "/");
        assert_eq!(r.name, "ping");
        assert_eq!(r.args, vec!["foo"]);
        assert!(r.has_prefix);
    }

    #[test]
    fn bare_command_keeps_name_and_args() {
        let r = resolve("ping foo", "/");
        assert_eq!(r.name, "ping");
        assert_eq!(r.args, vec!["foo"]);
        assert!(!r.has_prefix);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let r = resolve("   /ping foo   ", "/");
        assert!(r.has_prefix);
        assert_eq!(r.name, "ping");
        assert_eq!(r.args, vec!["foo"]);
    }

    #[test]
    fn splits_on_whitespace_runs() {
        let r = resolve("/echo  a \t b   c", "/");
        assert_eq!(r.args, vec!["a", "b", "c"]);
    }

    #[test]
    fn multi_character_prefix() {
        let r = resolve("!!deploy now", "!!");
        assert!(r.has_prefix);
        assert_eq!(r.name, "deploy");
        assert_eq!(r.args, vec!["now"]);
    }

    #[test]
    fn prefix_alone_yields_empty_name() {
        let r = resolve("/", "/");
        assert!(r.has_prefix);
        assert_eq!(r.name, "");
        assert!(r.args.is_empty());
    }

    #[test]
    fn blank_body_yields_empty_name() {
        let r = resolve("   ", "/");
        assert!(!r.has_prefix);
        assert_eq!(r.name, "");
        assert!(r.args.is_empty());
    }

    #[test]
    fn prefix_not_at_start_is_not_stripped() {
        let r = resolve("hey/ping", "/");
        assert!(!r.has_prefix);
        assert_eq!(r.name, "hey/ping");
    }

    #[test]
    fn no_case_folding() {
        assert_eq!(resolve("/Ping", "/").name, "Ping");
    }

    #[test]
    fn argument_order_preserved() {
        let r = resolve("/echo one two three", "/");
        assert_eq!(r.args, vec!["one", "two", "three"]);
    }
}
