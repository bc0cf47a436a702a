//! Human-facing notices: the creation banner and debug alerts

use super::call_stack::CallStackInfo;
use super::options::Language;

const BANNER_WIDTH: usize = 60;

const BANNER_ART: [&str; 3] = [
    "░█▀█░█▀█░█▄█░█▀▀░█▀▀░█▀█░█▀█░█▀▀░█▀▀",
    "░█░█░█▀█░█░█░█▀▀░▀▀█░█▀▀░█▀█░█░░░█▀▀",
    "░▀░▀░▀░▀░▀░▀░▀▀▀░▀▀▀░▀░░░▀░▀░▀▀▀░▀▀▀",
];

/// Center `text` between `|` borders on a line of [`BANNER_WIDTH`] columns
fn banner_line(text: &str) -> String {
    let inner = BANNER_WIDTH - 2;
    let len = text.chars().count();
    if len >= inner {
        return format!("|{}|", text);
    }
    let blank = inner - len;
    format!(
        "|{}{}{}|",
        " ".repeat(blank / 2),
        text,
        " ".repeat(blank - blank / 2)
    )
}

/// ASCII frame announcing a new logger
pub fn creation_banner(namespace: &str, version: &str) -> String {
    let title = if namespace.is_empty() {
        "Created Successfully!".to_string()
    } else {
        format!("{} | Created Successfully!", namespace)
    };

    let mut lines = vec![
        format!(".{}.", "-".repeat(BANNER_WIDTH - 2)),
        banner_line(&title),
        banner_line(""),
    ];
    lines.extend(BANNER_ART.iter().map(|art| banner_line(art)));
    lines.push(banner_line(""));
    lines.push(banner_line(&format!("v{}", version)));
    lines.push(format!("'{}'", "-".repeat(BANNER_WIDTH - 2)));
    lines.join("\n")
}

struct AlertLabels {
    time: &'static str,
    namespace: &'static str,
    label: &'static str,
    file_name: &'static str,
    function_name: &'static str,
    location: &'static str,
}

fn alert_labels(language: Language) -> AlertLabels {
    match language {
        Language::En => AlertLabels {
            time: "Time",
            namespace: "Namespace",
            label: "Label",
            file_name: "File Name",
            function_name: "Function Name",
            location: "Source Location",
        },
        Language::Cn => AlertLabels {
            time: "时间",
            namespace: "命名空间",
            label: "标签",
            file_name: "文件名",
            function_name: "函数名",
            location: "源码位置",
        },
    }
}

/// Summary shown when a debug call raises an alert
pub fn debug_alert_text(
    language: Language,
    time: &str,
    namespace: &str,
    labels: &[String],
    call_site: &CallStackInfo,
) -> String {
    let l = alert_labels(language);
    format!(
        "{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}",
        l.time,
        time,
        l.namespace,
        namespace,
        l.label,
        labels.join("|"),
        l.file_name,
        call_site.file_name,
        l.function_name,
        call_site.function_name,
        l.location,
        call_site.location
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_lines_have_fixed_width() {
        let banner = creation_banner("Shop", "1.2.3");
        for line in banner.lines() {
            assert_eq!(line.chars().count(), BANNER_WIDTH, "{:?}", line);
        }
        assert!(banner.contains("Shop | Created Successfully!"));
        assert!(banner.contains("v1.2.3"));
    }

    #[test]
    fn test_debug_alert_text_is_localised() {
        let site = CallStackInfo {
            file_name: "cart.rs".into(),
            function_name: "checkout".into(),
            line_number: "12".into(),
            location: "src/cart.rs:12:5".into(),
        };
        let labels = vec!["a".to_string(), "b".to_string()];

        let en = debug_alert_text(Language::En, "2025-01-08 10:30:45", "Shop", &labels, &site);
        assert_eq!(
            en,
            "Time: 2025-01-08 10:30:45\nNamespace: Shop\nLabel: a|b\nFile Name: cart.rs\n\
             Function Name: checkout\nSource Location: src/cart.rs:12:5"
        );

        let cn = debug_alert_text(Language::Cn, "t", "Shop", &[], &site);
        assert!(cn.starts_with("时间: t\n命名空间: Shop\n标签: \n"));
    }
}
