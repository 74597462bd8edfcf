//! Trace files in, completion records out.
//!
//! A trace is one job per line, `id, arrival time, job time`. Output is one
//! line per completed job, `id, completion time`.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use super::{CompletionRecord, Job, Sim, SimReport};
use crate::{
    config::SimConfig,
    error::{Result, SimError},
};

/// Parse one trace record. `None` for anything that is not exactly three
/// comma-separated unsigned integers.
pub fn parse_record(line: &str) -> Option<Job> {
    let mut fields = line.split(',').map(str::trim);
    let id = fields.next()?.parse().ok()?;
    let arrival_time = fields.next()?.parse().ok()?;
    let job_time = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Job::new(id, arrival_time, job_time))
}

/// Read every record up to the first malformed line.
///
/// A malformed line ends the trace only if nothing but blank lines follows
/// it; otherwise the trace is rejected.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();
    let mut end_of_input: Option<usize> = None;

    for (index, line) in reader.lines().enumerate() {
        let record = match line {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => parse_record(&line),
            // Not UTF-8, so not a record either
            Err(err) if err.kind() == ErrorKind::InvalidData => None,
            Err(err) => return Err(err.into()),
        };
        if let Some(bad) = end_of_input {
            return Err(SimError::MalformedTrace { line: bad });
        }

        match record {
            Some(job) => jobs.push(job),
            None => end_of_input = Some(index + 1),
        }
    }

    if let Some(line) = end_of_input {
        tracing::warn!(line, "Trace ended at a malformed record");
    }
    Ok(jobs)
}

pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<Job>> {
    let file = File::open(path.as_ref())?;
    read_trace(BufReader::new(file))
}

/// Order records by job id; jobs sharing an id keep completion order.
pub fn sort_by_id(records: &mut [CompletionRecord]) {
    records.sort_by_key(|record| (record.id, record.completion_time));
}

pub fn write_completions<W: Write>(mut out: W, records: &[CompletionRecord]) -> Result<()> {
    for record in records {
        writeln!(out, "{}, {}", record.id, record.completion_time)?;
    }
    out.flush()?;
    Ok(())
}

/// Load the trace, simulate it, and write the output file.
pub fn run_trace(config: &SimConfig) -> Result<SimReport> {
    let jobs = load_trace(&config.trace_path)?;
    tracing::info!(
        trace = %config.trace_path.display(),
        jobs = jobs.len(),
        "Trace loaded"
    );

    let report = Sim::new(config.policy, jobs)?.run()?;

    let mut records = report.completions.clone();
    if config.sort_output {
        sort_by_id(&mut records);
    }
    let out = BufWriter::new(File::create(&config.out_path)?);
    write_completions(out, &records)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_or_without_spaces() {
        assert_eq!(parse_record("1, 0, 5"), Some(Job::new(1, 0, 5)));
        assert_eq!(parse_record("7,12,3"), Some(Job::new(7, 12, 3)));
        assert_eq!(parse_record("  2 ,  4 , 9  "), Some(Job::new(2, 4, 9)));
    }

    #[test]
    fn rejects_short_long_and_signed_records() {
        assert_eq!(parse_record("1, 0"), None);
        assert_eq!(parse_record("1, 0, 5, 6"), None);
        assert_eq!(parse_record("1, -3, 5"), None);
        assert_eq!(parse_record("id, arrival, time"), None);
    }

    #[test]
    fn malformed_tail_is_end_of_input() {
        let text = "1, 0, 5\n2, 0, 3\n3, 1\n\n";
        let jobs = read_trace(text.as_bytes()).unwrap();
        assert_eq!(jobs, [Job::new(1, 0, 5), Job::new(2, 0, 3)]);
    }

    #[test]
    fn blank_lines_between_records_are_skipped() {
        let text = "1, 0, 5\n\n2, 4, 1\n";
        assert_eq!(read_trace(text.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn records_after_garbage_are_an_error() {
        let text = "1, 0, 5\nbogus\n2, 3, 1\n";
        let err = read_trace(text.as_bytes()).unwrap_err();
        assert!(matches!(err, SimError::MalformedTrace { line: 2 }));
    }

    #[test]
    fn undecodable_tail_is_end_of_input() {
        let bytes: &[u8] = b"1, 0, 5\n\xff\xfe\x00\n";
        assert_eq!(read_trace(bytes).unwrap(), [Job::new(1, 0, 5)]);
    }

    #[test]
    fn records_after_undecodable_line_are_an_error() {
        let bytes: &[u8] = b"1, 0, 5\n\xff\n2, 3, 1\n";
        let err = read_trace(bytes).unwrap_err();
        assert!(matches!(err, SimError::MalformedTrace { line: 2 }));
    }

    #[test]
    fn writes_one_line_per_record() {
        let records = [
            CompletionRecord {
                id: 3,
                arrival_time: 0,
                job_time: 1,
                completion_time: 1,
            },
            CompletionRecord {
                id: 1,
                arrival_time: 0,
                job_time: 4,
                completion_time: 5,
            },
        ];
        let mut sorted = records;
        sort_by_id(&mut sorted);

        let mut out = Vec::new();
        write_completions(&mut out, &sorted).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1, 5\n3, 1\n");
    }
}
