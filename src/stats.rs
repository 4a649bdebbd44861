use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Firefox,
    Chrome,
    InternetExplorer,
    Safari,
}

impl Browser {
    /// Tally order. Ties for most popular go to the earliest entry.
    pub const ALL: [Browser; 4] = [
        Browser::Firefox,
        Browser::Chrome,
        Browser::InternetExplorer,
        Browser::Safari,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Browser::Firefox => "Firefox",
            Browser::Chrome => "Chrome",
            Browser::InternetExplorer => "Internet Explorer",
            Browser::Safari => "Safari",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageHits {
    pub image_hits: u64,
    pub total_hits: u64,
}

impl ImageHits {
    /// Percentage of hits that were images; 0.0 when there were no hits.
    pub fn percentage(&self) -> f64 {
        if self.total_hits == 0 {
            return 0.0;
        }
        self.image_hits as f64 / self.total_hits as f64 * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserTally {
    counts: [u64; 4],
}

impl BrowserTally {
    pub fn record(&mut self, browser: Browser) {
        self.counts[browser.index()] += 1;
    }

    pub fn count(&self, browser: Browser) -> u64 {
        self.counts[browser.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Highest count wins; on a tie (including all zero) the first browser in
    /// `Browser::ALL` wins.
    pub fn most_popular(&self) -> Browser {
        let mut best = Browser::ALL[0];
        for browser in Browser::ALL {
            if self.count(browser) > self.count(best) {
                best = browser;
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (Browser, u64)> + '_ {
        Browser::ALL.into_iter().map(|b| (b, self.count(b)))
    }
}

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourHistogram {
    counts: [u64; HOURS_PER_DAY],
}

impl HourHistogram {
    pub fn record(&mut self, hour: u32) {
        self.counts[hour as usize] += 1;
    }

    pub fn count(&self, hour: u32) -> u64 {
        self.counts[hour as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Every hour 0..24 in ascending order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(hour, count)| (hour as u32, *count))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub images: ImageHits,
    pub browsers: BrowserTally,
    pub hours: HourHistogram,
}
