use core::fmt;

use crate::{Error, Histogram};

/// The narrowest supported terminal. Rendering does not attempt to squeeze
/// into fewer columns.
const MIN_COLUMNS: usize = 80;

impl Histogram {
    /// Render the histogram as an ASCII bar chart fitting within `columns`
    /// terminal columns.
    ///
    /// Each nonzero bucket becomes one row showing its lower boundary, a bar
    /// scaled so the largest count spans the available width, and the count.
    /// A run of empty buckets between displayed rows collapses to a single
    /// `~` marker row. A histogram with no bucketed samples renders as
    /// `"Empty histogram"`.
    pub fn render(&self, columns: usize) -> Result<String, Error> {
        if columns < MIN_COLUMNS {
            return Err(Error::InvalidColumns);
        }

        let mut displayed = Vec::new();
        let mut max_count = 0;
        let mut total = 0;

        for (index, bucket) in self.iter().enumerate() {
            if bucket.count() == 0 {
                continue;
            }
            max_count = max_count.max(bucket.count());
            total += bucket.count();
            displayed.push((index, bucket));
        }

        if displayed.is_empty() {
            return Ok("Empty histogram".to_string());
        }

        let last = displayed[displayed.len() - 1];
        let value_width = last
            .1
            .lower()
            .to_string()
            .len()
            .max("value".len())
            .max("Total".len());
        let count_width = total.to_string().len().max("count".len());
        let max_bar_width =
            columns.saturating_sub(value_width + " |".len() + "| ".len() + count_width);

        // how many observations one fill character represents; clamped so a
        // bar never exceeds the available width
        let weight = (max_count as f64 / max_bar_width as f64).max(1.0);

        let rule = "-".repeat(max_bar_width);
        let mut out = String::new();
        out.push_str(&row("value", &rule, "count", value_width, count_width));

        // seeded so the first displayed bucket never reads as a gap
        let mut prev_index = displayed[0].0.wrapping_sub(1);
        for (index, bucket) in &displayed {
            // collapse a run of skipped buckets to a single marker row
            if *index != prev_index.wrapping_add(1) {
                out.push_str(&skip_row(value_width));
            }
            prev_index = *index;

            let fill = (bucket.count() as f64 / weight) as usize;
            let mut bar = "@".repeat(fill);
            bar.push_str(&" ".repeat(max_bar_width - fill));
            out.push_str(&row(
                &bucket.lower().to_string(),
                &bar,
                &bucket.count().to_string(),
                value_width,
                count_width,
            ));
        }

        if last.0 != self.config.total_buckets() - 1 {
            out.push_str(&skip_row(value_width));
        }

        out.push_str(&row(
            "Total",
            &rule,
            &total.to_string(),
            value_width,
            count_width,
        ));

        Ok(out)
    }
}

fn row(value: &str, bar: &str, count: &str, value_width: usize, count_width: usize) -> String {
    format!("{value:>value_width$} |{bar}| {count:>count_width$}\n")
}

fn skip_row(value_width: usize) -> String {
    format!("{:>value_width$} ~\n", "")
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(MIN_COLUMNS).map_err(|_| fmt::Error)?)
    }
}
