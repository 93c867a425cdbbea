//! Human-readable clock formats used by the caption encoders.
//!
//! The core carries timestamps as raw (possibly negative) milliseconds;
//! formatting is purely a display concern. Negative timestamps are shown
//! as zero here, since none of the caption formats can express them.

/// Format milliseconds as `M:SS` (minutes unpadded, seconds two-digit).
pub fn format_minutes(ms: i64) -> String {
    let total_s = ms.max(0) / 1000;
    format!("{}:{:02}", total_s / 60, total_s % 60)
}

/// Format milliseconds as an SRT cue timestamp (`HH:MM:SS,mmm`).
pub fn format_srt_clock(ms: i64) -> String {
    let (h, m, s, millis) = clock_parts(ms);
    format!("{h:02}:{m:02}:{s:02},{millis:03}")
}

/// Format milliseconds as a WebVTT cue timestamp (`HH:MM:SS.mmm`).
pub fn format_vtt_clock(ms: i64) -> String {
    let (h, m, s, millis) = clock_parts(ms);
    format!("{h:02}:{m:02}:{s:02}.{millis:03}")
}

fn clock_parts(ms: i64) -> (i64, i64, i64, i64) {
    let total_ms = ms.max(0);
    let millis = total_ms % 1000;
    let total_s = total_ms / 1000;
    let s = total_s % 60;
    let total_m = total_s / 60;
    (total_m / 60, total_m % 60, s, millis)
}
