use clap::Parser;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "weblog-stats",
    about = "Summarize a web server access log: image share, top browser and hourly hits",
    version,
    long_about = None
)]
pub struct Args {
    /// URL to the access log (http, https or file)
    #[arg(short, long)]
    pub url: Url,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn url_flag_is_required() {
        assert!(Args::try_parse_from(["weblog-stats"]).is_err());
    }

    #[test]
    fn rejects_strings_that_are_not_urls() {
        assert!(Args::try_parse_from(["weblog-stats", "--url", "not a url"]).is_err());
    }

    #[test]
    fn parses_long_and_short_forms() {
        let long = Args::try_parse_from(["weblog-stats", "--url", "http://example.com/log.csv"])
            .unwrap();
        let short = Args::try_parse_from(["weblog-stats", "-u", "file:///tmp/log.csv"]).unwrap();

        assert_eq!(long.url.as_str(), "http://example.com/log.csv");
        assert_eq!(short.url.scheme(), "file");
    }
}
