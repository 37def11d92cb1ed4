// End-to-end: CSV file → load → project → iCalendar

use chrono::{TimeZone, Utc};
use std::io::Write;

use hijri_anniversaries::{
    load_anniversaries, project, render_calendar, CorrelationPoint, LunarDate,
    ProjectionConfig, SolarDate,
};

fn write_table(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn reference() -> CorrelationPoint {
    CorrelationPoint::new(
        SolarDate::new(2020, 3, 26).unwrap(),
        LunarDate::parse("1441-08-02").unwrap(),
    )
}

#[test]
fn test_single_anniversary_on_reference_day() {
    let table = write_table("name,day,month,year,uid\nReference,02,08,1441,ref\n");
    let report = load_anniversaries(table.path()).unwrap();
    assert!(report.is_clean());

    let events = project(&reference(), &report.anniversaries, &ProjectionConfig::default());

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].end.date, SolarDate::new(2020, 3, 26).unwrap());
    assert_eq!(events[0].start.date, SolarDate::new(2020, 3, 25).unwrap());
    assert_eq!(events[0].uid, "ref-2020");
}

#[test]
fn test_full_pipeline_renders_every_match() {
    let table = write_table(
        "name, warasDay, warasMonth, warasYear\n\
         Grandmother, 01, 01, 1400\n\
         Grandfather, 01, 01, 1410\n\
         Broken, 30, 02, 1400\n",
    );
    let report = load_anniversaries(table.path()).unwrap();
    assert_eq!(report.anniversaries.len(), 2);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].line, 4);

    let events = project(&reference(), &report.anniversaries, &ProjectionConfig::default());
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "Grandmother");
    assert_eq!(events[1].title, "Grandfather");

    // 1442-01-01 is 146 schematic days after 1441-08-02
    let expected = SolarDate::new(2020, 8, 19).unwrap();
    assert!(events.iter().all(|e| e.end.date == expected));

    let stamp = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let ics = render_calendar(&events, stamp);
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
    assert_eq!(ics.matches("BEGIN:VALARM").count(), 2);
    assert!(ics.contains("DTSTART:20200818T180000\r\n"));
    assert!(ics.contains("DTEND:20200819T180000\r\n"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let table = write_table("name,day,month\nA,10,09\nB,29,12\nC,10,09\n");
    let config = ProjectionConfig::new().with_span_years(5);
    let stamp = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();

    let render = || {
        let report = load_anniversaries(table.path()).unwrap();
        let events = project(&reference(), &report.anniversaries, &config);
        render_calendar(&events, stamp)
    };

    let first = render();
    let second = render();
    assert!(first.contains("BEGIN:VEVENT"));
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_uids_distinguish_years() {
    let table = write_table("name,day,month,uid\nYearly,02,08,yearly\n");
    let report = load_anniversaries(table.path()).unwrap();
    let config = ProjectionConfig::new().with_span_years(3);

    let events = project(&reference(), &report.anniversaries, &config);
    let uids: Vec<&str> = events.iter().map(|e| e.uid.as_str()).collect();

    // Every 354 days: 2020-03-26, 2021-03-15, 2022-03-04, 2023-02-21
    assert_eq!(uids, vec!["yearly-2020", "yearly-2021", "yearly-2022", "yearly-2023"]);
}
