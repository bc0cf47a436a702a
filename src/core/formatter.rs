//! Rendering of titles and console arguments for each target

use super::call_stack::CallStackInfo;
use super::color::{level_emoji, parse_color, resolve_color, TIMER_EMOJI};
use super::log_level::LogLevel;
use super::message::Messages;
use super::options::{LogOptions, StyleDefaults, Target};
use super::sink::ConsoleArg;
use super::style::Style;
use super::template::{render_title, TitleFields};
use chrono::{DateTime, Local};
use colored::{ColoredString, Colorize};

/// Everything needed to render one call
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub namespace: &'a str,
    pub level: LogLevel,
    pub call_site: &'a CallStackInfo,
    /// Call style already merged over the logger defaults
    pub style: &'a Style,
    pub options: &'a LogOptions,
    pub source_location_visible: bool,
    pub now: DateTime<Local>,
}

/// A rendered call: the undecorated title (used for recording) and the
/// console arguments for the configured target.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub title: String,
    pub color: Option<String>,
    pub args: Vec<ConsoleArg>,
}

impl<'a> RenderContext<'a> {
    fn color(&self) -> Option<String> {
        resolve_color(
            self.style.color.as_deref(),
            self.level,
            &self.options.level_colors,
            self.namespace,
            self.options.color,
        )
    }

    /// Title text with emoji prefix, before any target decoration
    pub fn plain_title(&self) -> String {
        let fields = TitleFields {
            namespace: self.namespace.to_string(),
            time: self.options.timestamp_format.format(&self.now),
            level: self.level.title().to_string(),
            tracker: self.call_site.tracker(self.source_location_visible),
            label: self.style.label_text(),
        };
        let title = render_title(&self.options.formatter, &fields);
        with_emoji(self.options.emoji, level_emoji(self.level), &title)
    }

    /// Timer titles omit the time, level and tracker so `time` and
    /// `time_end` calls from different places pair up by namespace and
    /// labels.
    pub fn timer_title(&self) -> String {
        let fields = TitleFields {
            namespace: self.namespace.to_string(),
            label: self.style.label_text(),
            ..Default::default()
        };
        let title = render_title(&self.options.formatter, &fields);
        with_emoji(self.options.emoji, TIMER_EMOJI, &title)
    }

    /// Render a log call for the configured target
    pub fn render_log(&self, messages: &Messages) -> Rendered {
        self.render(self.plain_title(), messages)
    }

    /// Decorate an already rendered title and attach messages
    pub fn render(&self, title: String, messages: &Messages) -> Rendered {
        let color = self.color();
        let args = match self.options.target {
            Target::Terminal => terminal_args(&title, color.as_deref(), self.style, messages),
            Target::Browser => {
                let css = browser_css(self.style, color.as_deref(), &self.options.style);
                browser_args(&title, &css, messages)
            }
        };
        Rendered { title, color, args }
    }
}

fn with_emoji(enabled: bool, emoji: &str, title: &str) -> String {
    if enabled {
        format!("{} {}", emoji, title).trim_end().to_string()
    } else {
        title.to_string()
    }
}

/// Apply colour and emphasis to a title with ANSI sequences
pub fn terminal_title(title: &str, color: Option<&str>, style: &Style) -> String {
    let mut painted: ColoredString = title.normal();
    if let Some(color) = color.and_then(parse_color) {
        painted = painted.color(color);
    }
    if let Some(bg) = style.bg_color.as_deref().and_then(parse_color) {
        painted = painted.on_color(bg);
    }
    if style.bold {
        painted = painted.bold();
    }
    if style.italic {
        painted = painted.italic();
    }
    if style.underline {
        painted = painted.underline();
    }
    if style.strikethrough {
        painted = painted.strikethrough();
    }
    if style.dim {
        painted = painted.dimmed();
    }
    if style.inverse {
        painted = painted.reversed();
    }

    let rendered = painted.to_string();
    // colored has no overline; SGR 53 / 55
    if style.overline && colored::control::SHOULD_COLORIZE.should_colorize() {
        format!("\x1b[53m{}\x1b[55m", rendered)
    } else {
        rendered
    }
}

/// Styled title first, then each message value untouched
pub fn terminal_args(
    title: &str,
    color: Option<&str>,
    style: &Style,
    messages: &Messages,
) -> Vec<ConsoleArg> {
    let mut args = Vec::with_capacity(messages.len() + 1);
    args.push(ConsoleArg::Text(terminal_title(title, color, style)));
    args.extend(messages.values().iter().cloned().map(ConsoleArg::Value));
    args
}

/// CSS declarations for a browser console title
pub fn browser_css(style: &Style, color: Option<&str>, defaults: &StyleDefaults) -> String {
    let mut css = format!(
        "padding: {}; font-weight: {}; font-size: {}px;",
        defaults.padding,
        if style.bold {
            "bold"
        } else {
            defaults.font_weight.as_str()
        },
        defaults.font_size
    );
    if let Some(color) = color {
        css.push_str(&format!(" color: {};", color));
    }
    if let Some(bg) = style.bg_color.as_deref() {
        css.push_str(&format!(" background-color: {};", bg));
    }
    if style.italic {
        css.push_str(" font-style: italic;");
    }

    let decorations: Vec<&str> = [
        (style.underline, "underline"),
        (style.strikethrough, "line-through"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    if !decorations.is_empty() {
        css.push_str(&format!(" text-decoration: {};", decorations.join(" ")));
    }
    css
}

/// `%` would be read as a format directive by the console
fn escape_directives(text: &str) -> String {
    text.replace('%', "%%")
}

/// Build the `%c`/`%o` format string and its arguments.
///
/// String messages are styled like the title; any other value is passed as
/// an `%o` object argument.
pub fn browser_args(title: &str, css: &str, messages: &Messages) -> Vec<ConsoleArg> {
    let mut format = format!("%c{}", escape_directives(title));
    let mut rest = vec![ConsoleArg::Text(css.to_string())];

    for value in messages.values() {
        match value.as_str() {
            Some(text) => {
                format.push_str(&format!(" %c{}", escape_directives(text)));
                rest.push(ConsoleArg::Text(css.to_string()));
            }
            None => {
                format.push_str(" %o");
                rest.push(ConsoleArg::Value(value.clone()));
            }
        }
    }

    let mut args = Vec::with_capacity(rest.len() + 1);
    args.push(ConsoleArg::Text(format));
    args.extend(rest);
    args
}

/// Two-part format string: the styled title, then a blank whose CSS
/// background is the image
pub fn browser_image_args(title: &str, title_css: &str, image_css: &str) -> Vec<ConsoleArg> {
    vec![
        ConsoleArg::Text(format!("%c{} %c ", escape_directives(title))),
        ConsoleArg::Text(title_css.to_string()),
        ConsoleArg::Text(image_css.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
    }

    fn context<'a>(
        options: &'a LogOptions,
        style: &'a Style,
        call_site: &'a CallStackInfo,
    ) -> RenderContext<'a> {
        RenderContext {
            namespace: "App",
            level: LogLevel::Info,
            call_site,
            style,
            options,
            source_location_visible: false,
            now: fixed_now(),
        }
    }

    #[test]
    fn test_plain_title_with_emoji_and_labels() {
        let options = LogOptions::default();
        let style = Style {
            labels: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        let site = CallStackInfo {
            file_name: "main.rs".into(),
            function_name: "run".into(),
            line_number: "9".into(),
            location: "src/main.rs:9:5".into(),
        };
        let title = context(&options, &style, &site).plain_title();
        assert_eq!(
            title,
            "ℹ️ [App] [2025-01-08 10:30:45] [INFO] [run() main.rs:9] [a|b]"
        );
    }

    #[test]
    fn test_title_without_emoji_or_call_site() {
        let options = LogOptions {
            emoji: false,
            ..Default::default()
        };
        let style = Style::default();
        let site = CallStackInfo::default();
        let title = context(&options, &style, &site).plain_title();
        assert_eq!(title, "[App] [2025-01-08 10:30:45] [INFO]");
    }

    #[test]
    fn test_timer_title_is_stable() {
        let options = LogOptions::default();
        let style = Style {
            labels: vec!["load".into()],
            ..Default::default()
        };
        let site = CallStackInfo::default();
        let title = context(&options, &style, &site).timer_title();
        assert_eq!(title, "⏱️ [App] [load]");
    }

    #[test]
    fn test_browser_args_mix_strings_and_values() {
        let messages = Messages::new().with("hello").with(json!({"id": 1}));
        let args = browser_args("[App]", "color: red;", &messages);
        assert_eq!(args[0], ConsoleArg::Text("%c[App] %chello %o".into()));
        assert_eq!(args[1], ConsoleArg::Text("color: red;".into()));
        assert_eq!(args[2], ConsoleArg::Text("color: red;".into()));
        assert_eq!(args[3], ConsoleArg::Value(json!({"id": 1})));
    }

    #[test]
    fn test_browser_args_escape_percent() {
        let args = browser_args("[App]", "", &Messages::from("100%"));
        assert_eq!(args[0], ConsoleArg::Text("%c[App] %c100%%".into()));
    }

    #[test]
    fn test_browser_css() {
        let style = Style {
            bold: true,
            italic: true,
            underline: true,
            strikethrough: true,
            bg_color: Some("#000".into()),
            ..Default::default()
        };
        let css = browser_css(&style, Some("#90EE90"), &StyleDefaults::default());
        assert_eq!(
            css,
            "padding: 5px; font-weight: bold; font-size: 12px; color: #90EE90; \
             background-color: #000; font-style: italic; text-decoration: underline line-through;"
        );

        let plain = browser_css(&Style::default(), None, &StyleDefaults::default());
        assert_eq!(plain, "padding: 5px; font-weight: 500; font-size: 12px;");
    }

    #[test]
    fn test_terminal_args_keep_values_separate() {
        colored::control::set_override(false);
        let messages = Messages::new().with("x").with(json!([1, 2]));
        let args = terminal_args("[App]", Some("red"), &Style::default(), &messages);
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], ConsoleArg::Text("[App]".into()));
        assert_eq!(args[2], ConsoleArg::Value(json!([1, 2])));
    }
}
