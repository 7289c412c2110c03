//! Assertion helpers tuned to command output.
//!
//! All helpers panic with a readable message on failure, so they work with
//! the standard test harness and with `#[should_panic]`.

use std::fmt::{Debug, Display};
use std::ops::Add;

/// Width both strings are cut to in [`assert_match`] failure messages.
pub const MATCH_CUTOFF: usize = 100;

/// Shortens `s` to `cutoff` characters plus a `[N more characters]` note.
///
/// Strings shorter than `cutoff + 15` characters are returned unchanged, so
/// the note never makes the output longer than the original.
pub fn truncate_string(s: &str, cutoff: usize) -> String {
    let len = s.chars().count();
    if len < cutoff + 15 {
        return s.to_string();
    }
    let head: String = s.chars().take(cutoff).collect();
    format!("{}[{} more characters]", head, len - cutoff)
}

/// Builds the failure message used by [`assert_cmd_success`].
///
/// The exit value is shown through its `Display` text, or `None`. A line
/// holding only `]` is padded to `] ` so the message cannot end a bracketed
/// block in streamed test results.
pub fn cmd_success_message<E: Display>(exit: &Option<E>, out: &str, err: &str, msg: &str) -> String {
    let exit = match exit {
        Some(e) => e.to_string(),
        None => "None".to_string(),
    };
    format!("exit[{}] stdout[{}] stderr[{}]: {}", exit, out, err, msg).replace("\n]\n", "\n] \n")
}

/// Asserts that a command succeeded (`exit` is `None`).
#[track_caller]
pub fn assert_cmd_success<E: Display>(exit: &Option<E>, out: &str, err: &str, msg: &str) {
    if exit.is_some() {
        panic!("{}", cmd_success_message(exit, out, err, msg));
    }
}

/// Asserts that a command failed (`val` is not `None`).
#[track_caller]
pub fn assert_cmd_fail<T>(val: &Option<T>, msg: &str) {
    if val.is_none() {
        panic!("unexpectedly None: {}", msg);
    }
}

/// Asserts that `needle` occurs in `base`.
///
/// Without a message, both strings are shown cut to [`MATCH_CUTOFF`]
/// characters.
#[track_caller]
pub fn assert_match(base: &str, needle: &str, msg: Option<&str>) {
    if base.contains(needle) {
        return;
    }
    match msg {
        Some(msg) => panic!("{}", msg),
        None => panic!(
            "{:?} is not in {:?}",
            truncate_string(needle, MATCH_CUTOFF),
            truncate_string(base, MATCH_CUTOFF)
        ),
    }
}

/// Asserts that `val1` lies strictly within `delta` of `val2`.
///
/// Works for plain numbers (`assert_within(100, 105, 10, "")`) and for
/// timestamps with a duration delta.
#[track_caller]
pub fn assert_within<T, D>(val1: T, val2: T, delta: D, msg: &str)
where
    T: Add<D, Output = T> + PartialOrd + Copy + Debug,
    D: Copy + Debug,
{
    let above = val1 + delta > val2;
    let below = val2 + delta > val1;
    if !(above && below) {
        if msg.is_empty() {
            panic!("{:?} is not within {:?} of {:?}", val1, delta, val2);
        }
        panic!("{}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};

    // ===========================================
    // truncate_string
    // ===========================================

    #[test]
    fn truncate_leaves_short_strings() {
        assert_eq!(truncate_string("hello", 100), "hello");
        let s = "x".repeat(114);
        assert_eq!(truncate_string(&s, 100), s);
    }

    #[test]
    fn truncate_at_threshold() {
        let s = "x".repeat(115);
        assert_eq!(
            truncate_string(&s, 100),
            format!("{}[15 more characters]", "x".repeat(100))
        );
    }

    #[test]
    fn truncate_long_string() {
        let s: String = (0..200).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let expected = format!("{}[100 more characters]", &s[..100]);
        assert_eq!(truncate_string(&s, 100), expected);
    }

    #[test]
    fn truncate_counts_characters() {
        let s = "é".repeat(200);
        let truncated = truncate_string(&s, 100);
        assert!(truncated.starts_with(&"é".repeat(100)));
        assert!(truncated.ends_with("[100 more characters]"));
    }

    // ===========================================
    // assert_cmd_success / assert_cmd_fail
    // ===========================================

    #[test]
    fn success_passes_for_none() {
        assert_cmd_success(&None::<String>, "out", "", "");
    }

    #[test]
    #[should_panic(expected = "exit[boom] stdout[out] stderr[err]: context")]
    fn success_panics_for_some() {
        assert_cmd_success(&Some("boom"), "out", "err", "context");
    }

    #[test]
    fn success_message_pads_closing_bracket_lines() {
        let msg = cmd_success_message(&Some(1), "a\n]\nb", "", "");
        assert_eq!(msg, "exit[1] stdout[a\n] \nb] stderr[]: ");
    }

    #[test]
    fn success_message_pads_every_occurrence() {
        let msg = cmd_success_message(&None::<String>, "\n]\n", "x\n]\ny", "");
        assert!(!msg.contains("\n]\n"));
        assert_eq!(msg.matches("\n] \n").count(), 2);
    }

    #[test]
    fn success_message_shows_error_text() {
        let exit = Some(crate::cli::CommandError::Failed("user already exists: bob".to_string()));
        let msg = cmd_success_message(&exit, "", "ERROR: user already exists: bob\n", "");
        assert!(msg.starts_with("exit[user already exists: bob] stdout[]"), "{msg}");

        let msg = cmd_success_message(&None::<String>, "ok", "", "");
        assert!(msg.starts_with("exit[None]"));
    }

    #[test]
    fn fail_passes_for_some() {
        assert_cmd_fail(&Some("error"), "");
    }

    #[test]
    #[should_panic(expected = "unexpectedly None: should have failed")]
    fn fail_panics_for_none() {
        assert_cmd_fail(&None::<String>, "should have failed");
    }

    // ===========================================
    // assert_match
    // ===========================================

    #[test]
    fn match_finds_substring() {
        assert_match("User 'bob' added successfully", "added", None);
    }

    #[test]
    #[should_panic(expected = "\"missing\" is not in \"haystack\"")]
    fn match_default_message() {
        assert_match("haystack", "missing", None);
    }

    #[test]
    #[should_panic(expected = "[100 more characters]")]
    fn match_truncates_long_base() {
        assert_match(&"y".repeat(200), "z", None);
    }

    #[test]
    #[should_panic(expected = "custom")]
    fn match_custom_message() {
        assert_match("haystack", "missing", Some("custom"));
    }

    // ===========================================
    // assert_within
    // ===========================================

    #[test]
    fn within_passes_inside_delta() {
        assert_within(100, 105, 10, "");
        assert_within(105, 100, 10, "");
        assert_within(1.0, 1.05, 0.1, "");
    }

    #[test]
    #[should_panic(expected = "100 is not within 10 of 120")]
    fn within_fails_outside_delta() {
        assert_within(100, 120, 10, "");
    }

    #[test]
    #[should_panic]
    fn within_is_strict() {
        assert_within(100, 110, 10, "");
    }

    #[test]
    #[should_panic(expected = "too far")]
    fn within_fails_below() {
        assert_within(120, 100, 10, "too far");
    }

    #[test]
    fn within_timestamps() {
        let now = Utc::now();
        assert_within(now, now + TimeDelta::seconds(2), TimeDelta::seconds(5), "");
    }

    #[test]
    fn within_unsigned_near_zero() {
        assert_within(0u32, 3, 5, "");
    }
}
