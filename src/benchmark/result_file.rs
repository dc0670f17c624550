//! Binary result file of a benchmark run.
//!
//! # Layout
//!
//! Little-endian, no header, no padding:
//!
//! | field                 | type          |
//! |-----------------------|---------------|
//! | execution time (s)    | `f64`         |
//! | saved count `n`       | `i32`         |
//! | eccentricities        | `n × f64`     |
//! | mean anomalies        | `n × f64`     |
//! | eccentric anomalies   | `n × f64`     |
//! | iteration counts      | `n × i32`     |
//!
//! The file is written with [`write_results`] / [`write_to`] and read back with
//! [`read_results`] / [`ResultRecord::from_bytes`]. An optional CSV export of the
//! saved solutions is provided by [`write_csv`].
use std::fs::{self, File};
use std::io::{BufWriter, Write};

use camino::Utf8Path;
use nom::{
    multi::count,
    number::complete::{le_f64, le_i32},
    IResult,
};
use serde::Serialize;

use crate::{benchmark::bench_run::BenchReport, kepler_errors::KeplerError};

type ParseError<'a> = nom::error::Error<&'a [u8]>;

/// Size of the `f64` time and `i32` count preceding the arrays.
const HEADER_LEN: usize = 8 + 4;

/// Size of one saved solution: three `f64` and one `i32`.
const SOLUTION_LEN: usize = 3 * 8 + 4;

/// In-memory content of a result file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub execution_time_sec: f64,
    pub eccentricities: Vec<f64>,
    pub mean_anomalies: Vec<f64>,
    pub eccentric_anomalies: Vec<f64>,
    pub iterations: Vec<i32>,
}

/// Byte length of the arrays of `n` solutions, `None` on overflow.
fn body_len(n: usize) -> Option<usize> {
    n.checked_mul(SOLUTION_LEN)
}

impl ResultRecord {
    pub fn saved_count(&self) -> usize {
        self.eccentricities.len()
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, execution_time_sec) = le_f64(input)?;
        let (input, n_save) = le_i32(input)?;
        let n = usize::try_from(n_save).map_err(|_| {
            nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Verify))
        })?;
        let body = body_len(n).ok_or_else(|| {
            nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::TooLarge))
        })?;

        // Reject short inputs before allocating the arrays
        if input.len() < body {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Eof,
            )));
        }

        let (input, eccentricities) = count(le_f64::<_, ParseError<'_>>, n)(input)?;
        let (input, mean_anomalies) = count(le_f64::<_, ParseError<'_>>, n)(input)?;
        let (input, eccentric_anomalies) = count(le_f64::<_, ParseError<'_>>, n)(input)?;
        let (input, iterations) = count(le_i32::<_, ParseError<'_>>, n)(input)?;
        Ok((
            input,
            ResultRecord {
                execution_time_sec,
                eccentricities,
                mean_anomalies,
                eccentric_anomalies,
                iterations,
            },
        ))
    }

    /// Decode a complete result file; trailing bytes are rejected.
    pub fn from_bytes(input: &[u8]) -> Result<Self, KeplerError> {
        let (rest, record) = Self::parse(input).map_err(|e| match e {
            nom::Err::Failure(err) if err.code == nom::error::ErrorKind::TooLarge => {
                KeplerError::InvalidResultFile("saved count too large".to_string())
            }
            nom::Err::Failure(_) => {
                KeplerError::InvalidResultFile("negative saved count".to_string())
            }
            _ => KeplerError::InvalidResultFile(format!(
                "truncated file ({} bytes)",
                input.len()
            )),
        })?;
        if !rest.is_empty() {
            return Err(KeplerError::InvalidResultFile(format!(
                "{} trailing bytes",
                rest.len()
            )));
        }
        Ok(record)
    }

    /// Encoded size of a record holding `n` solutions.
    pub fn encoded_len(n: usize) -> usize {
        HEADER_LEN + n * SOLUTION_LEN
    }

    /// Encode the record into `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), KeplerError> {
        let n_save = i32::try_from(self.saved_count()).map_err(|_| {
            KeplerError::InvalidResultFile(format!(
                "too many saved solutions ({})",
                self.saved_count()
            ))
        })?;

        writer.write_all(&self.execution_time_sec.to_le_bytes())?;
        writer.write_all(&n_save.to_le_bytes())?;
        for v in self
            .eccentricities
            .iter()
            .chain(&self.mean_anomalies)
            .chain(&self.eccentric_anomalies)
        {
            writer.write_all(&v.to_le_bytes())?;
        }
        for it in &self.iterations {
            writer.write_all(&it.to_le_bytes())?;
        }
        Ok(())
    }
}

/// Number of saved solutions of `report`, checking that its four sample vectors agree.
fn saved_len(report: &BenchReport) -> Result<usize, KeplerError> {
    let n = report.eccentricities.len();
    let lens = [
        report.mean_anomalies.len(),
        report.eccentric_anomalies.len(),
        report.iterations.len(),
    ];
    if lens.iter().any(|&l| l != n) {
        return Err(KeplerError::InvalidResultFile(format!(
            "mismatched saved vectors (e: {n}, M: {}, E: {}, iterations: {})",
            lens[0], lens[1], lens[2]
        )));
    }
    Ok(n)
}

impl TryFrom<&BenchReport> for ResultRecord {
    type Error = KeplerError;

    fn try_from(report: &BenchReport) -> Result<Self, Self::Error> {
        saved_len(report)?;
        let iterations = report
            .iterations
            .iter()
            .map(|&it| {
                i32::try_from(it).map_err(|_| {
                    KeplerError::InvalidResultFile(format!(
                        "iteration count {it} does not fit in i32"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResultRecord {
            execution_time_sec: report.execution_time_sec,
            eccentricities: report.eccentricities.clone(),
            mean_anomalies: report.mean_anomalies.clone(),
            eccentric_anomalies: report.eccentric_anomalies.clone(),
            iterations,
        })
    }
}

/// Encode the saved part of `report` into `writer`.
pub fn write_to<W: Write>(writer: &mut W, report: &BenchReport) -> Result<(), KeplerError> {
    ResultRecord::try_from(report)?.write_to(writer)
}

/// Write the result file of `report` at `path`.
pub fn write_results(path: &Utf8Path, report: &BenchReport) -> Result<(), KeplerError> {
    let record = ResultRecord::try_from(report)?;
    let mut out = BufWriter::new(File::create(path)?);
    record.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}

/// Read back a result file.
pub fn read_results(path: &Utf8Path) -> Result<ResultRecord, KeplerError> {
    let bytes = fs::read(path)?;
    ResultRecord::from_bytes(&bytes)
}

#[derive(Debug, Serialize)]
struct SavedSolution {
    eccentricity: f64,
    mean_anomaly: f64,
    eccentric_anomaly: f64,
    iterations: u32,
}

/// Export the saved solutions of `report` as CSV into `writer`.
pub fn write_csv_to<W: Write>(writer: W, report: &BenchReport) -> Result<(), KeplerError> {
    saved_len(report)?;
    let mut csv_writer = csv::Writer::from_writer(writer);
    let rows = report
        .eccentricities
        .iter()
        .zip(&report.mean_anomalies)
        .zip(&report.eccentric_anomalies)
        .zip(&report.iterations);
    for (((&eccentricity, &mean_anomaly), &eccentric_anomaly), &iterations) in rows {
        csv_writer.serialize(SavedSolution {
            eccentricity,
            mean_anomaly,
            eccentric_anomaly,
            iterations,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export the saved solutions of `report` as CSV at `path`.
pub fn write_csv(path: &Utf8Path, report: &BenchReport) -> Result<(), KeplerError> {
    write_csv_to(File::create(path)?, report)
}
