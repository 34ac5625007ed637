/// Expand `${ENV_VAR}` placeholders in raw config text.
///
/// Unresolvable or malformed placeholders are left as written.
pub fn substitute_env(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expansion with an injectable variable lookup, so tests never have to
/// mutate the process environment.
fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    },
                }
                rest = &after[end + 1..];
            },
            // "${}" or no closing brace: keep the text as written.
            _ => {
                out.push_str("${");
                rest = after;
            },
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "GW_TOKEN" => Some("s3cret".to_string()),
            "GW_PORT" => Some("8080".to_string()),
            _ => None,
        }
    }

    #[test]
    fn expands_set_variable() {
        assert_eq!(expand_with("token = \"${GW_TOKEN}\"", lookup), "token = \"s3cret\"");
    }

    #[test]
    fn expands_multiple_placeholders() {
        assert_eq!(
            expand_with("${GW_TOKEN}:${GW_PORT}", lookup),
            "s3cret:8080"
        );
    }

    #[test]
    fn preserves_unset_variable() {
        assert_eq!(expand_with("${GW_MISSING}", lookup), "${GW_MISSING}");
    }

    #[test]
    fn preserves_unclosed_placeholder() {
        assert_eq!(expand_with("tail ${GW_TOKEN", lookup), "tail ${GW_TOKEN");
    }

    #[test]
    fn preserves_empty_placeholder() {
        assert_eq!(expand_with("a${}b", lookup), "a${}b");
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(substitute_env("no placeholders here"), "no placeholders here");
    }
}
