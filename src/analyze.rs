use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Timelike};
use std::time::Instant;
use tracing::{debug, info};

use crate::parse::LogRow;
use crate::patterns::Patterns;
use crate::stats::{AnalysisResult, BrowserTally, HourHistogram, ImageHits};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn find_image_hits(rows: &[LogRow], patterns: &Patterns) -> Result<ImageHits> {
    let mut hits = ImageHits::default();

    for (index, row) in rows.iter().enumerate() {
        let path = row.path().with_context(|| format!("Row {}", index + 1))?;
        hits.total_hits += 1;
        if patterns.is_image(path) {
            hits.image_hits += 1;
        }
    }

    debug!(
        component = "image_hits",
        image_hits = hits.image_hits,
        total_hits = hits.total_hits,
        "Counted image requests"
    );
    Ok(hits)
}

/// Rows whose user agent matches none of the known tokens are not counted.
pub fn tally_browsers(rows: &[LogRow], patterns: &Patterns) -> Result<BrowserTally> {
    let mut tally = BrowserTally::default();
    let mut unmatched = 0u64;

    for (index, row) in rows.iter().enumerate() {
        let user_agent = row.user_agent().with_context(|| format!("Row {}", index + 1))?;
        match patterns.classify_browser(user_agent) {
            Some(browser) => tally.record(browser),
            None => unmatched += 1,
        }
    }

    debug!(
        component = "browser_tally",
        classified = tally.total(),
        unmatched,
        "Tallied browsers"
    );
    Ok(tally)
}

pub fn parse_hour(timestamp: &str) -> Result<u32> {
    let parsed = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).with_context(|| {
        format!(
            "Timestamp {:?} does not match format {}",
            timestamp, TIMESTAMP_FORMAT
        )
    })?;
    Ok(parsed.hour())
}

pub fn hourly_hits(rows: &[LogRow]) -> Result<HourHistogram> {
    let mut hours = HourHistogram::default();

    for (index, row) in rows.iter().enumerate() {
        let hour = row
            .timestamp()
            .and_then(parse_hour)
            .with_context(|| format!("Row {}", index + 1))?;
        hours.record(hour);
    }

    Ok(hours)
}

/// Runs all three analyses. Nothing is returned unless every one succeeds.
pub fn analyze_log(rows: &[LogRow]) -> Result<AnalysisResult> {
    let start_time = Instant::now();
    info!(action = "start", component = "analysis", row_count = rows.len(), "Analyzing log rows");

    let patterns = Patterns::compile()?;
    let images = find_image_hits(rows, &patterns)?;
    let browsers = tally_browsers(rows, &patterns)?;
    let hours = hourly_hits(rows)?;

    info!(
        action = "complete",
        component = "analysis",
        duration_ms = start_time.elapsed().as_millis(),
        "Analysis completed"
    );
    Ok(AnalysisResult {
        images,
        browsers,
        hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Browser;
    use pretty_assertions::assert_eq;

    fn row(path: &str, timestamp: &str, user_agent: &str) -> LogRow {
        LogRow::new(vec![
            path.to_string(),
            timestamp.to_string(),
            user_agent.to_string(),
        ])
    }

    #[test]
    fn image_hits_are_case_sensitive() {
        let rows = vec![
            row("/a.jpg", "2024-01-01 00:00:00", "x"),
            row("/b.html", "2024-01-01 00:00:00", "x"),
            row("/c.PNG", "2024-01-01 00:00:00", "x"),
        ];
        let hits = find_image_hits(&rows, &Patterns::compile().unwrap()).unwrap();

        assert_eq!(
            hits,
            ImageHits {
                image_hits: 1,
                total_hits: 3
            }
        );
        assert_eq!(format!("{:.2}", hits.percentage()), "33.33");
    }

    #[test]
    fn image_and_non_image_hits_sum_to_total() {
        let paths = ["/a.gif", "/b.png", "/c", "/d.jpeg", "/e.jpg", "/f.gif.txt"];
        let rows: Vec<LogRow> = paths.iter().map(|p| row(p, "t", "ua")).collect();
        let patterns = Patterns::compile().unwrap();

        let hits = find_image_hits(&rows, &patterns).unwrap();
        let non_image = paths.iter().filter(|p| !patterns.is_image(p)).count() as u64;

        assert_eq!(hits.image_hits, 3);
        assert_eq!(hits.image_hits + non_image, hits.total_hits);
        assert_eq!(hits.percentage(), 50.0);
    }

    #[test]
    fn chrome_safari_agent_counts_as_chrome() {
        let rows = vec![
            row("/", "2024-01-01 00:00:00", "Mozilla/5.0 Firefox/88"),
            row("/", "2024-01-01 00:00:00", "Mozilla/5.0 Chrome/91 Safari/537"),
        ];
        let tally = tally_browsers(&rows, &Patterns::compile().unwrap()).unwrap();

        assert_eq!(tally.count(Browser::Firefox), 1);
        assert_eq!(tally.count(Browser::Chrome), 1);
        assert_eq!(tally.count(Browser::Safari), 0);
        assert_eq!(tally.most_popular(), Browser::Firefox);
    }

    #[test]
    fn unmatched_agents_count_nowhere() {
        let rows = vec![
            row("/", "t", "curl/8.0"),
            row("/", "t", "MSIE 8.0"),
            row("/", "t", "Wget"),
        ];
        let tally = tally_browsers(&rows, &Patterns::compile().unwrap()).unwrap();

        assert_eq!(tally.total(), 1);
        assert_eq!(tally.most_popular(), Browser::InternetExplorer);
    }

    #[test]
    fn histogram_counts_by_hour() {
        let rows = vec![
            row("/", "2024-01-01 00:15:00", "x"),
            row("/", "2024-01-01 00:45:00", "x"),
            row("/", "2024-01-01 23:59:59", "x"),
        ];
        let hours = hourly_hits(&rows).unwrap();

        assert_eq!(hours.count(0), 2);
        assert_eq!(hours.count(23), 1);
        assert_eq!(hours.total(), rows.len() as u64);
        for hour in 1..23 {
            assert_eq!(hours.count(hour), 0);
        }
    }

    #[test]
    fn wrong_timestamp_format_fails() {
        let err = parse_hour("01/01/2024 00:15:00").unwrap_err();
        assert!(err.to_string().contains("01/01/2024 00:15:00"));
        assert!(parse_hour("2024-01-01 00:15").is_err());
        assert!(parse_hour("2024-01-01T00:15:00").is_err());
        assert_eq!(parse_hour("2024-06-30 17:00:01").unwrap(), 17);
    }

    #[test]
    fn missing_field_aborts_with_row_number() {
        let rows = vec![
            row("/a.jpg", "2024-01-01 00:00:00", "Firefox"),
            LogRow::new(vec!["/b.jpg".to_string()]),
        ];
        let err = tally_browsers(&rows, &Patterns::compile().unwrap()).unwrap_err();

        assert_eq!(err.to_string(), "Row 2");
        assert!(format!("{:#}", err).contains("user agent"));
    }

    #[test]
    fn analyze_log_fails_as_a_whole() {
        let rows = vec![
            row("/a.jpg", "2024-01-01 00:00:00", "Firefox"),
            row("/b.jpg", "01/01/2024 00:15:00", "Firefox"),
        ];
        assert!(analyze_log(&rows).is_err());
    }

    #[test]
    fn empty_dataset() {
        let result = analyze_log(&[]).unwrap();

        assert_eq!(result.images.percentage(), 0.0);
        assert_eq!(result.browsers.most_popular(), Browser::Firefox);
        assert_eq!(result.hours.total(), 0);
    }
}
