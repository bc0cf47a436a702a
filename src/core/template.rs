//! Title templates with `$placeholder$` substitution

use once_cell::sync::Lazy;
use regex::Regex;

/// Default title template
pub const DEFAULT_TEMPLATE: &str = "[$namespace$] [$time$] [$level$] [$tracker$] [$label$]";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\w+)\$").expect("placeholder pattern is valid"));

static EMPTY_BRACKETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*\]|【\s*】").expect("bracket pattern is valid"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Values substituted into a title template
#[derive(Debug, Clone, Default)]
pub struct TitleFields {
    pub namespace: String,
    pub time: String,
    pub level: String,
    pub tracker: String,
    pub label: String,
}

impl TitleFields {
    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "namespace" => Some(&self.namespace),
            "time" => Some(&self.time),
            "level" => Some(&self.level),
            "tracker" => Some(&self.tracker),
            "label" => Some(&self.label),
            _ => None,
        }
    }
}

/// Remove empty `[]` / `【】` pairs, collapse whitespace and trim.
pub fn remove_empty_brackets(text: &str) -> String {
    let stripped = EMPTY_BRACKETS.replace_all(text, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Render a title.
///
/// `$key$` placeholders are substituted (unknown keys stay verbatim), then
/// decoration left empty is dropped.
pub fn render_title(template: &str, fields: &TitleFields) -> String {
    let substituted = PLACEHOLDER.replace_all(template, |caps: &regex::Captures<'_>| {
        fields
            .lookup(&caps[1])
            .map(str::to_string)
            .unwrap_or_else(|| caps[0].to_string())
    });
    remove_empty_brackets(&substituted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_collapses_brackets() {
        let fields = TitleFields {
            namespace: "X".into(),
            ..Default::default()
        };
        let title = render_title("[$namespace$] [$label$]", &fields);
        assert_eq!(title, "[X]");
        assert!(!title.contains("[]"));
    }

    #[test]
    fn test_full_default_template() {
        let fields = TitleFields {
            namespace: "App".into(),
            time: "2025-01-08 10:30:45".into(),
            level: "WARN".into(),
            tracker: "run() main.rs:3".into(),
            label: "net|retry".into(),
        };
        assert_eq!(
            render_title(DEFAULT_TEMPLATE, &fields),
            "[App] [2025-01-08 10:30:45] [WARN] [run() main.rs:3] [net|retry]"
        );
    }

    #[test]
    fn test_fullwidth_brackets_collapse() {
        let fields = TitleFields {
            namespace: "N".into(),
            ..Default::default()
        };
        assert_eq!(render_title("【$namespace$】 【$level$】 done", &fields), "【N】 done");
    }

    #[test]
    fn test_unknown_placeholder_is_kept() {
        let fields = TitleFields {
            namespace: "api".into(),
            ..Default::default()
        };
        assert_eq!(render_title("$namespace$ $user$", &fields), "api $user$");
    }

    #[test]
    fn test_whitespace_only_brackets_removed() {
        assert_eq!(remove_empty_brackets("  [ ]  a   [\t] b  "), "a b");
    }
}
