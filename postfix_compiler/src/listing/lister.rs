//! Paginated, line-wrapping printer

use super::{ListingError, OutputSink};
use crate::config::compile_time::listing::*;
use std::io::Write;

/// Page geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingLimits {
    pub print_line_length: usize,
    /// Wrap search looks back at most `back_track_length - 1` characters
    pub back_track_length: usize,
    pub lines_per_page: usize,
    pub continuation_indent: usize,
}

impl Default for ListingLimits {
    fn default() -> Self {
        Self {
            print_line_length: MAX_PRINT_LINE_LENGTH,
            back_track_length: MAX_BACK_TRACK_LENGTH,
            lines_per_page: MAX_LINES_PER_PAGE,
            continuation_indent: CONTINUATION_INDENT,
        }
    }
}

/// Writes lines with page headers, wrapping long lines at a space when one
/// is close enough to the right margin.
pub struct Lister<W: Write> {
    writer: W,
    source_name: String,
    date: String,
    limits: ListingLimits,
    paginate: bool,
    page_number: u32,
    line_count: usize,
}

impl<W: Write> Lister<W> {
    pub fn new(writer: W, source_name: &str) -> Self {
        let date = chrono::Local::now()
            .format("%a %b %e %H:%M:%S %Y")
            .to_string();

        Self {
            writer,
            source_name: source_name.to_string(),
            date,
            limits: ListingLimits::default(),
            paginate: true,
            page_number: 0,
            // The first printed line starts page 1
            line_count: MAX_LINES_PER_PAGE,
        }
    }

    /// Fixed header date instead of the current time
    pub fn with_date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub fn with_pagination(mut self, enabled: bool) -> Self {
        self.paginate = enabled;
        self
    }

    /// Line length is raised to at least 1 and the back-track window is
    /// capped at the line length, so every wrap makes progress
    pub fn with_limits(mut self, limits: ListingLimits) -> Self {
        let print_line_length = limits.print_line_length.max(1);
        self.limits = ListingLimits {
            print_line_length,
            back_track_length: limits.back_track_length.min(print_line_length),
            ..limits
        };
        self.line_count = limits.lines_per_page;
        self
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn print_page_header(&mut self) -> Result<(), ListingError> {
        self.page_number += 1;
        write!(
            self.writer,
            "\x0cPage {}   {}   {}\n\n",
            self.page_number, self.source_name, self.date
        )?;
        Ok(())
    }

    /// Count one physical output line, starting a new page when full
    fn begin_physical_line(&mut self) -> Result<(), ListingError> {
        if !self.paginate {
            return Ok(());
        }

        self.line_count += 1;
        if self.line_count > self.limits.lines_per_page {
            self.print_page_header()?;
            self.line_count = 1;
        }
        Ok(())
    }

    /// Index where an overlong line is cut
    fn wrap_point(&self, chars: &[char]) -> usize {
        let mut split = self.limits.print_line_length;
        let mut steps = 1;
        while split > 1 && chars[split] != ' ' && steps < self.limits.back_track_length {
            split -= 1;
            steps += 1;
        }
        split
    }
}

impl<W: Write> OutputSink for Lister<W> {
    fn print_line(&mut self, line: &str) -> Result<(), ListingError> {
        let chars: Vec<char> = line.chars().collect();
        let indent = " ".repeat(self.limits.continuation_indent);
        let mut rest: &[char] = &chars;
        let mut prefix = "";

        loop {
            self.begin_physical_line()?;

            if rest.len() <= self.limits.print_line_length {
                let tail: String = rest.iter().collect();
                writeln!(self.writer, "{}{}", prefix, tail)?;
                return Ok(());
            }

            let split = self.wrap_point(rest);
            let head: String = rest[..split].iter().collect();
            writeln!(self.writer, "{}{}", prefix, head)?;

            rest = &rest[split..];
            prefix = &indent;
        }
    }

    fn flush(&mut self) -> Result<(), ListingError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE: &str = "Thu Oct 15 12:00:00 2026";

    fn render<F>(paginate: bool, limits: ListingLimits, f: F) -> String
    where
        F: FnOnce(&mut Lister<Vec<u8>>),
    {
        let mut lister = Lister::new(Vec::new(), "exprs.txt")
            .with_date(DATE)
            .with_limits(limits)
            .with_pagination(paginate);
        f(&mut lister);
        String::from_utf8(lister.into_inner()).unwrap()
    }

    #[test]
    fn test_first_line_gets_page_header() {
        let out = render(true, ListingLimits::default(), |l| {
            l.print_line(">> a b +").unwrap();
        });

        assert_eq!(
            out,
            format!("\x0cPage 1   exprs.txt   {}\n\n>> a b +\n", DATE)
        );
    }

    #[test]
    fn test_new_page_after_page_length() {
        let limits = ListingLimits {
            lines_per_page: 2,
            ..ListingLimits::default()
        };
        let out = render(true, limits, |l| {
            for line in ["one", "two", "three"] {
                l.print_line(line).unwrap();
            }
            assert_eq!(l.page_number(), 2);
        });

        assert_eq!(out.matches('\x0c').count(), 2);
        assert!(out.contains("two\n\x0cPage 2   exprs.txt"));
    }

    #[test]
    fn test_no_headers_without_pagination() {
        let out = render(false, ListingLimits::default(), |l| {
            l.print_line("a").unwrap();
            l.print_line("b").unwrap();
        });
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn test_wrap_at_space_within_back_track() {
        // Space 5 characters before the margin
        let line = format!("{} {}", "a".repeat(75), "b".repeat(20));
        let out = render(false, ListingLimits::default(), |l| {
            l.print_line(&line).unwrap();
        });

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "a".repeat(75));
        assert_eq!(lines[1], format!("         {}", "b".repeat(20)));
    }

    #[test]
    fn test_hard_cut_without_nearby_space() {
        let line = "x".repeat(100);
        let out = render(false, ListingLimits::default(), |l| {
            l.print_line(&line).unwrap();
        });

        let lines: Vec<&str> = out.lines().collect();
        // No space found: cut after backing up 25 characters
        assert_eq!(lines[0].len(), 55);
        assert_eq!(lines[1], format!("        {}", "x".repeat(45)));
    }

    #[test]
    fn test_remainder_wraps_again() {
        let line = "y".repeat(200);
        let out = render(false, ListingLimits::default(), |l| {
            l.print_line(&line).unwrap();
        });

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1..].iter().all(|l| l.starts_with("        y")));
        let total: usize = lines.iter().map(|l| l.trim_start().len()).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn test_back_track_longer_than_line() {
        let limits = ListingLimits {
            print_line_length: 4,
            back_track_length: 26,
            ..ListingLimits::default()
        };
        let out = render(false, limits, |l| {
            l.print_line("abcdefghij").unwrap();
        });

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "a");
        let total: usize = lines.iter().map(|l| l.trim_start().len()).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_zero_line_length_still_terminates() {
        let limits = ListingLimits {
            print_line_length: 0,
            ..ListingLimits::default()
        };
        let out = render(false, limits, |l| {
            l.print_line(" ab").unwrap();
        });

        assert_eq!(out.lines().count(), 3);
        assert!(out.ends_with("b\n"));
    }

    #[test]
    fn test_wrapped_lines_count_toward_page() {
        let limits = ListingLimits {
            lines_per_page: 2,
            ..ListingLimits::default()
        };
        let out = render(true, limits, |l| {
            l.print_line(&"z".repeat(100)).unwrap();
            l.print_line("next").unwrap();
        });

        assert!(out.contains("\x0cPage 2   exprs.txt"));
        assert!(out.ends_with("next\n"));
    }
}
