// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Problem instance loader for the maintenance scheduling domain.
//!
//! Instances are small line-oriented text files:
//!
//! ```raw
//! Franjas: 4                      // number of time slots (any label, or a bare number)
//! 5x5                             // grid rows x columns
//! STD:(0,1) (1,0) (1,1)           // standard bays
//! SPC:(0,3) (2,1)                 // specialist bays
//! PRK:(0,0) (0,2)                 // parking stands
//! 1-JMB-T-2-2                     // id-category-restricted-type1-type2, one per line
//! 2-STD-F-3-0
//! ```
//!
//! The first five lines are mandatory and a missing or unreadable header is
//! an error. Inside the coordinate lists whitespace is ignored entirely, so
//! `(0, 1) (1, 0)` and `(0,1)(1,0)` are the same list. Individual malformed
//! coordinates and malformed aircraft lines are skipped with a warning on the
//! `log` facade; the remaining data is still loaded. Range checks (negative
//! or out-of-grid coordinates, duplicate ids) are left to `build_model`,
//! which reports them as typed errors.

use crate::{
    fleet::{AircraftCategory, AircraftSpec},
    model::{Model, ModelError, build_model},
};
use log::warn;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// The error type for the instance loading process.
#[derive(Debug, thiserror::Error)]
pub enum InstanceLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input: missing {section} on line {line}")]
    MissingLine { line: usize, section: &'static str },
    #[error("line {line}: could not read the number of time slots from '{content}'")]
    InvalidHorizon { line: usize, content: String },
    #[error("line {line}: expected grid dimensions as '<rows>x<cols>', found '{content}'")]
    InvalidDimensions { line: usize, content: String },
}

/// A parsed, not yet validated, problem description.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Instance {
    pub horizon: usize,
    pub rows: usize,
    pub cols: usize,
    pub standard_bays: Vec<(i64, i64)>,
    pub specialist_bays: Vec<(i64, i64)>,
    pub parkings: Vec<(i64, i64)>,
    pub aircraft: Vec<AircraftSpec>,
}

impl Instance {
    /// Validates the description and builds the model.
    ///
    /// # Errors
    ///
    /// See [`build_model`].
    #[inline]
    pub fn build(&self) -> Result<Model, ModelError> {
        build_model(
            self.rows,
            self.cols,
            &self.standard_bays,
            &self.specialist_bays,
            &self.parkings,
            &self.aircraft,
            self.horizon,
        )
    }
}

/// Reader for the line-oriented instance format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstanceLoader;

impl InstanceLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Instance, InstanceLoadError> {
        let mut lines = Lines::new(rdr);

        let (line, content) = lines.next_required("number of time slots")?;
        let horizon = parse_horizon(&content)
            .ok_or(InstanceLoadError::InvalidHorizon { line, content })?;

        let (line, content) = lines.next_required("grid dimensions")?;
        let (rows, cols) = parse_dimensions(&content)
            .ok_or(InstanceLoadError::InvalidDimensions { line, content })?;

        let (_, content) = lines.next_required("standard bay list")?;
        let standard_bays = parse_coordinates(&content);
        let (_, content) = lines.next_required("specialist bay list")?;
        let specialist_bays = parse_coordinates(&content);
        let (_, content) = lines.next_required("parking list")?;
        let parkings = parse_coordinates(&content);

        let mut aircraft = Vec::new();
        while let Some((line, content)) = lines.next_line()? {
            if content.trim().is_empty() {
                continue;
            }
            match parse_aircraft(&content) {
                Some(spec) => aircraft.push(spec),
                None => warn!("Skipping invalid aircraft line {}: '{}'", line, content.trim()),
            }
        }

        Ok(Instance {
            horizon,
            rows,
            cols,
            standard_bays,
            specialist_bays,
            parkings,
            aircraft,
        })
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance, InstanceLoadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, InstanceLoadError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Instance, InstanceLoadError> {
        self.from_reader(s.as_bytes())
    }
}

/// Line reader that tracks 1-based line numbers.
struct Lines<R> {
    rdr: R,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self { rdr, line: 0 }
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>, InstanceLoadError> {
        let mut buf = String::new();
        if self.rdr.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed_len);
        Ok(Some((self.line, buf)))
    }

    fn next_required(
        &mut self,
        section: &'static str,
    ) -> Result<(usize, String), InstanceLoadError> {
        self.next_line()?.ok_or(InstanceLoadError::MissingLine {
            line: self.line + 1,
            section,
        })
    }
}

/// `Franjas: 4` or `4`.
fn parse_horizon(content: &str) -> Option<usize> {
    let value = content.split_once(':').map_or(content, |(_, rest)| rest);
    value.trim().parse().ok()
}

/// `5x5`.
fn parse_dimensions(content: &str) -> Option<(usize, usize)> {
    let (rows, cols) = content.trim().split_once(['x', 'X'])?;
    Some((rows.trim().parse().ok()?, cols.trim().parse().ok()?))
}

/// `STD:(0,1) (1, 0)` into `[(0, 1), (1, 0)]`, skipping malformed entries.
fn parse_coordinates(content: &str) -> Vec<(i64, i64)> {
    let body = content.split_once(':').map_or(content, |(_, rest)| rest);
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();

    let mut out = Vec::new();
    for token in compact.split(")(") {
        let token = token.trim_matches(|c| c == '(' || c == ')');
        if token.is_empty() {
            continue;
        }
        match parse_coordinate(token) {
            Some(coordinate) => out.push(coordinate),
            None => warn!("Skipping invalid coordinate '{}'", token),
        }
    }
    out
}

fn parse_coordinate(token: &str) -> Option<(i64, i64)> {
    let (row, col) = token.split_once(',')?;
    Some((row.parse().ok()?, col.parse().ok()?))
}

/// `1-JMB-T-2-2`.
fn parse_aircraft(content: &str) -> Option<AircraftSpec> {
    let parts: Vec<&str> = content.trim().split('-').map(str::trim).collect();
    let [id, category, restricted, type1, type2] = parts.as_slice() else {
        return None;
    };

    let category = match *category {
        "STD" => AircraftCategory::Standard,
        "JMB" => AircraftCategory::Jumbo,
        _ => return None,
    };
    let restricted = match *restricted {
        "T" => true,
        "F" => false,
        _ => return None,
    };

    Some(AircraftSpec::new(
        id.parse().ok()?,
        category,
        restricted,
        type1.parse().ok()?,
        type2.parse().ok()?,
    ))
}
