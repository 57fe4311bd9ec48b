//! Line-oriented readers for the two aligned input streams.
//!
//! Kinematics: one event per line,
//! `px1g,py1g,pz1g,px2g,py2g,pz2g,px1r,py1r,pz1r,px2r,py2r,pz2r,code1,code2,reco`.
//! Weights: whitespace-separated reals, any number per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ec_core::{Error, EventRecord, RecordSource, Result, ThreeMomentum, WeightSource};

/// Number of comma-separated fields in a kinematic record.
pub const KINEMATIC_FIELDS: usize = 15;

/// Streaming reader of [`EventRecord`]s. Blank lines are skipped.
#[derive(Debug)]
pub struct KinematicStreamReader<R> {
    reader: R,
    line: String,
    line_no: usize,
}

impl KinematicStreamReader<BufReader<File>> {
    /// Open a kinematics file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> KinematicStreamReader<R> {
    /// Wrap an already opened source.
    pub fn new(reader: R) -> Self {
        Self { reader, line: String::new(), line_no: 0 }
    }

    /// 1-based number of the last line read.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> RecordSource for KinematicStreamReader<R> {
    fn next_record(&mut self) -> Result<Option<EventRecord>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }
            return parse_record(text, self.line_no).map(Some);
        }
    }
}

/// Parse one kinematic line. `line_no` is only used in error messages.
pub fn parse_record(text: &str, line_no: usize) -> Result<EventRecord> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() != KINEMATIC_FIELDS {
        return Err(Error::parse(
            line_no,
            format!("expected {KINEMATIC_FIELDS} fields, found {}", fields.len()),
        ));
    }

    let mut p = [0.0_f64; 12];
    for (i, (slot, field)) in p.iter_mut().zip(&fields).enumerate() {
        let v: f64 = field.parse().map_err(|_| {
            Error::parse(line_no, format!("field {}: '{field}' is not a number", i + 1))
        })?;
        if !v.is_finite() {
            return Err(Error::parse(line_no, format!("field {}: '{field}' is not finite", i + 1)));
        }
        *slot = v;
    }

    let code = |i: usize| -> Result<i32> {
        let field = fields[i];
        field.parse().map_err(|_| {
            Error::parse(line_no, format!("field {}: '{field}' is not a particle code", i + 1))
        })
    };
    let codes = [code(12)?, code(13)?];

    let reco_ok = match fields[14] {
        "0" => false,
        "1" => true,
        other => {
            return Err(Error::parse(line_no, format!("reco flag must be 0 or 1, found '{other}'")));
        }
    };

    Ok(EventRecord {
        generated: [ThreeMomentum::new(p[0], p[1], p[2]), ThreeMomentum::new(p[3], p[4], p[5])],
        reconstructed: [
            ThreeMomentum::new(p[6], p[7], p[8]),
            ThreeMomentum::new(p[9], p[10], p[11]),
        ],
        codes,
        reco_ok,
    })
}

/// Streaming reader of raw efficiencies.
#[derive(Debug)]
pub struct WeightStreamReader<R> {
    reader: R,
    line: String,
    line_no: usize,
    pending: std::vec::IntoIter<String>,
}

impl WeightStreamReader<BufReader<File>> {
    /// Open a weights file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> WeightStreamReader<R> {
    /// Wrap an already opened source.
    pub fn new(reader: R) -> Self {
        Self { reader, line: String::new(), line_no: 0, pending: Vec::new().into_iter() }
    }
}

impl<R: BufRead> WeightSource for WeightStreamReader<R> {
    fn next_weight(&mut self) -> Result<Option<f64>> {
        loop {
            if let Some(token) = self.pending.next() {
                return token
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| Error::parse(self.line_no, format!("'{token}' is not a number")));
            }
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            self.pending =
                self.line.split_whitespace().map(str::to_owned).collect::<Vec<_>>().into_iter();
        }
    }
}
