// 🗓️ iCalendar Writer - EventDescriptors → RFC 5545 text
//
// Floating local times (no TZID), CRLF line endings, 75-octet folding.
// Output depends only on the descriptors and the given DTSTAMP.

use chrono::{DateTime, Utc};

use crate::projector::{EventDescriptor, LocalDateTime};

pub const PRODID: &str = "-//hijri-anniversaries//lunar anniversary projection//EN";

const CRLF: &str = "\r\n";
const MAX_LINE_OCTETS: usize = 75;

/// Render a full VCALENDAR with one VEVENT (and VALARM) per descriptor
///
/// `stamp` becomes every DTSTAMP. Pass a fixed value for byte-stable output.
pub fn render_calendar(events: &[EventDescriptor], stamp: DateTime<Utc>) -> String {
    let mut out = String::new();
    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();

    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{}", PRODID));
    push_line(&mut out, "CALSCALE:GREGORIAN");
    push_line(&mut out, "METHOD:PUBLISH");

    for event in events {
        push_event(&mut out, event, &dtstamp);
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

fn push_event(out: &mut String, event: &EventDescriptor, dtstamp: &str) {
    let summary = escape_text(&event.title);

    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("UID:{}", escape_text(&event.uid)));
    push_line(out, &format!("DTSTAMP:{}", dtstamp));
    push_line(out, &format!("DTSTART:{}", format_local(&event.start)));
    push_line(out, &format!("DTEND:{}", format_local(&event.end)));
    push_line(out, &format!("SUMMARY:{}", summary));
    push_line(out, "BEGIN:VALARM");
    push_line(out, "ACTION:DISPLAY");
    push_line(out, &format!("DESCRIPTION:{}", summary));
    push_line(out, &format!("TRIGGER:-PT{}M", event.alarm.minutes_before));
    push_line(out, "END:VALARM");
    push_line(out, "END:VEVENT");
}

/// `YYYYMMDDTHHMMSS`, floating (no `Z`, no TZID)
pub fn format_local(time: &LocalDateTime) -> String {
    format!(
        "{:04}{:02}{:02}T{:02}{:02}00",
        time.date.year(),
        time.date.month(),
        time.date.day(),
        time.hour,
        time.minute
    )
}

/// TEXT escaping (RFC 5545 §3.3.11)
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Fold a content line at 75 octets without splitting a UTF-8 character
///
/// Continuation lines start with a single space, which counts toward the limit.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut used = 0;

    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > MAX_LINE_OCTETS {
            folded.push_str(CRLF);
            folded.push(' ');
            used = 1;
        }
        folded.push(c);
        used += width;
    }

    folded
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(&fold_line(line));
    out.push_str(CRLF);
}
