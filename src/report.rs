use std::io::{self, Write};

use crate::stats::AnalysisResult;

pub fn print_analysis_results<W: Write>(result: &AnalysisResult, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Image requests account for {:.2}% of all requests.",
        result.images.percentage()
    )?;
    writeln!(
        out,
        "The most popular browser is {}.",
        result.browsers.most_popular()
    )?;

    for (hour, count) in result.hours.iter() {
        writeln!(out, "Hour {:02} has {} hits.", hour, count)?;
    }

    out.flush()
}
