//! Notification text rendering.
//!
//! Templates are plain strings carrying a single literal placeholder,
//! [`REMAINING_TOKEN`], replaced with the remaining time formatted as
//! `MM:SS`. Color markup uses `&`-prefixed legacy codes, translated to
//! their `§` form at render time.

/// Placeholder replaced with the formatted remaining time.
pub const REMAINING_TOKEN: &str = "{REMAINING}";

/// Alternate color-code marker accepted in templates.
const COLOR_MARKER: char = '&';

/// Section sign emitted for translated color codes.
const COLOR_CHAR: char = '\u{00A7}';

/// Legacy color/format code characters (case-insensitive).
const COLOR_CODES: &str = "0123456789abcdefklmnorx";

/// Format remaining seconds as `MM:SS`.
///
/// Minutes are not clamped to a 60-minute wheel: 3700 seconds renders as
/// `"61:40"`.
pub fn format_remaining(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Translate `&`-prefixed color codes to their `§` form.
///
/// Only a `&` immediately followed by a valid code character is
/// translated; any other `&` passes through untouched.
pub fn translate_color_codes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == COLOR_MARKER {
            match chars.peek() {
                Some(&next) if COLOR_CODES.contains(next.to_ascii_lowercase()) => {
                    out.push(COLOR_CHAR);
                    out.push(next);
                    chars.next();
                }
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Render a template: substitute the remaining-time token, then translate
/// color markup.
pub fn render_template(template: &str, lead_secs: u32) -> String {
    let substituted = template.replace(REMAINING_TOKEN, &format_remaining(lead_secs));
    translate_color_codes(&substituted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_two_minutes_five_seconds() {
        assert_eq!(format_remaining(125), "02:05");
    }

    #[test]
    fn format_zero() {
        assert_eq!(format_remaining(0), "00:00");
    }

    #[test]
    fn format_does_not_clamp_minutes() {
        assert_eq!(format_remaining(3700), "61:40");
        assert_eq!(format_remaining(7200), "120:00");
    }

    #[test]
    fn format_pads_single_digits() {
        assert_eq!(format_remaining(61), "01:01");
        assert_eq!(format_remaining(9), "00:09");
    }

    #[test]
    fn substitutes_remaining_token() {
        assert_eq!(render_template("down in {REMAINING}", 90), "down in 01:30");
    }

    #[test]
    fn substitutes_every_occurrence() {
        assert_eq!(
            render_template("{REMAINING}/{REMAINING}", 60),
            "01:00/01:00"
        );
    }

    #[test]
    fn template_without_token_passes_through() {
        assert_eq!(render_template("save your work", 60), "save your work");
    }

    #[test]
    fn translates_color_codes() {
        assert_eq!(translate_color_codes("&cAlert"), "\u{00A7}cAlert");
        assert_eq!(translate_color_codes("&lBold&r"), "\u{00A7}lBold\u{00A7}r");
    }

    #[test]
    fn preserves_code_case() {
        assert_eq!(translate_color_codes("&CAlert"), "\u{00A7}CAlert");
    }

    #[test]
    fn leaves_invalid_codes_alone() {
        assert_eq!(translate_color_codes("a & b"), "a & b");
        assert_eq!(translate_color_codes("&zworth"), "&zworth");
        assert_eq!(translate_color_codes("trailing &"), "trailing &");
    }

    #[test]
    fn renders_markup_and_token_together() {
        assert_eq!(
            render_template("&cShutdown in {REMAINING}", 125),
            "\u{00A7}cShutdown in 02:05"
        );
    }
}
