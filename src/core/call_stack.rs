//! Call-site resolution from stack traces
//!
//! Both the live Rust backtrace and traces coming from foreign hosts are
//! reduced to one line grammar before parsing:
//!
//! ```text
//! at <function> (<path>:<line>:<col>)
//! at <path>:<line>:<col>
//! ```
//!
//! so a single pair of patterns covers URL frames and filesystem frames
//! without branching on the platform.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::panic::Location;

/// Frames between the resolver's own frame and the public logging method's
/// caller: the resolver, `Logger::print`, and the public method itself.
pub const BASE_CALL_DEPTH: usize = 3;

static NAMED_FRAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^at\s+(.+?)\s+\((.+):(\d+):(\d+)\)$").expect("named frame pattern is valid")
});

static ANONYMOUS_FRAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^at\s+(.+):(\d+):(\d+)$").expect("anonymous frame pattern is valid")
});

static NUMBERED_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+:\s+(.+)$").expect("numbered symbol pattern is valid"));

static SYMBOL_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"::h[0-9a-f]{16}$").expect("symbol hash pattern is valid"));

/// Resolved call-site. Unknown parts are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallStackInfo {
    pub file_name: String,
    pub function_name: String,
    pub line_number: String,
    /// Raw `path:line:col` of the frame
    pub location: String,
}

impl CallStackInfo {
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty()
            && self.function_name.is_empty()
            && self.line_number.is_empty()
            && self.location.is_empty()
    }

    /// Build from a `#[track_caller]` location
    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            file_name: extract_file_name(location.file()),
            function_name: String::new(),
            line_number: location.line().to_string(),
            location: format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            ),
        }
    }

    /// Render the `$tracker$` text
    ///
    /// `fn() file:line` when everything is known, `file:line` without a
    /// function, `fn():line` without a file, and empty otherwise. With
    /// `with_location`, the raw location is appended after ` | `.
    pub fn tracker(&self, with_location: bool) -> String {
        let has_fn = !self.function_name.is_empty();
        let has_file = !self.file_name.is_empty();
        let has_line = !self.line_number.is_empty();

        let tracker = match (has_fn, has_file, has_line) {
            (true, true, true) => format!(
                "{}() {}:{}",
                self.function_name, self.file_name, self.line_number
            ),
            (false, true, true) => format!("{}:{}", self.file_name, self.line_number),
            (true, false, true) => format!("{}():{}", self.function_name, self.line_number),
            _ => String::new(),
        };

        if with_location && !self.location.is_empty() {
            format!("{} | {}", tracker, self.location)
        } else {
            tracker
        }
    }
}

/// Resolve the caller of a public logging method from the live stack.
///
/// `skip_depth` walks further out past wrapper functions. When symbols are
/// unavailable and no frames are skipped, `fallback` fills file and line.
#[inline(never)]
pub fn resolve(skip_depth: usize, fallback: Option<&Location<'_>>) -> CallStackInfo {
    let trace = capture_marker();
    let info = resolve_trace(&trace, skip_depth);
    match fallback {
        Some(location) if info.file_name.is_empty() && skip_depth == 0 => {
            let mut from_caller = CallStackInfo::from_location(location);
            from_caller.function_name = info.function_name;
            from_caller
        }
        _ => info,
    }
}

/// Resolve a raw trace text.
///
/// The first line is the error header and is dropped; frame
/// `BASE_CALL_DEPTH + skip_depth` of the remainder is parsed. Out of range
/// yields an empty [`CallStackInfo`].
pub fn resolve_trace(trace: &str, skip_depth: usize) -> CallStackInfo {
    let index = BASE_CALL_DEPTH.saturating_add(skip_depth);
    trace
        .lines()
        .skip(1)
        .nth(index)
        .map(parse_frame)
        .unwrap_or_default()
}

/// Parse one `at ...` frame line
pub fn parse_frame(line: &str) -> CallStackInfo {
    let line = line.trim();

    if let Some(caps) = NAMED_FRAME.captures(line) {
        let path = &caps[2];
        return CallStackInfo {
            file_name: extract_file_name(path),
            function_name: strip_symbol_hash(&caps[1]).to_string(),
            line_number: caps[3].to_string(),
            location: format!("{}:{}:{}", path, &caps[3], &caps[4]),
        };
    }

    if let Some(caps) = ANONYMOUS_FRAME.captures(line) {
        let path = &caps[1];
        return CallStackInfo {
            file_name: extract_file_name(path),
            function_name: String::new(),
            line_number: caps[2].to_string(),
            location: format!("{}:{}:{}", path, &caps[2], &caps[3]),
        };
    }

    CallStackInfo::default()
}

/// Bare file name of a URL, POSIX or Windows path
pub fn extract_file_name(full_path: &str) -> String {
    if full_path.is_empty() {
        return String::new();
    }

    let lowered = full_path.to_ascii_lowercase();
    let is_url = ["http://", "https://", "file://"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme));

    let path = if is_url {
        let after_scheme = &full_path[full_path.find("://").map_or(0, |i| i + 3)..];
        let pathname = after_scheme.find('/').map_or("", |i| &after_scheme[i..]);
        let end = pathname.find(['?', '#']).unwrap_or(pathname.len());
        &pathname[..end]
    } else {
        full_path
    };

    path.rsplit(['/', '\\']).next().unwrap_or_default().to_string()
}

fn strip_symbol_hash(symbol: &str) -> &str {
    match SYMBOL_HASH.find(symbol) {
        Some(m) => &symbol[..m.start()],
        None => symbol,
    }
}

/// Capture the live stack, normalised to the shared frame grammar.
///
/// The output starts with an `Error` header followed by the frames above
/// this function, so its first frame is [`resolve`].
#[inline(never)]
fn capture_marker() -> String {
    let rendered = Backtrace::force_capture().to_string();
    let frames = normalise_rust_backtrace(&rendered);

    let marker = frames
        .iter()
        .position(|frame| frame.contains("call_stack::capture_marker"));

    let mut out = String::from("Error");
    if let Some(marker) = marker {
        for frame in &frames[marker + 1..] {
            out.push('\n');
            out.push_str(frame);
        }
    }
    out
}

/// Turn `std::backtrace` output into one `at ...` line per symbol.
///
/// Frames look like `  3: crate::module::function` followed by an optional
/// `at path:line:col` line; inlined symbols of the same frame appear on
/// their own unnumbered lines.
pub fn normalise_rust_backtrace(rendered: &str) -> Vec<String> {
    let mut frames: Vec<(String, Option<String>)> = Vec::new();

    for raw in rendered.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(last) = frames.last_mut() {
                last.1 = Some(location.trim().to_string());
            }
            continue;
        }
        let symbol = match NUMBERED_SYMBOL.captures(line) {
            Some(caps) => caps[1].to_string(),
            None => line.to_string(),
        };
        frames.push((symbol, None));
    }

    frames
        .into_iter()
        .map(|(symbol, location)| match location {
            Some(location) => format!("at {} ({})", strip_symbol_hash(&symbol), location),
            None => format!("at {}", strip_symbol_hash(&symbol)),
        })
        .collect()
}
