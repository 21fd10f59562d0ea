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

use hangar_csp::validation::Violation;
use hangar_model::{loading::InstanceLoadError, model::ModelError};
use thiserror::Error;

pub(crate) type HangarResult<T> = Result<T, HangarError>;

#[derive(Error, Debug)]
pub(crate) enum HangarError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The instance file could not be read, more details: {0}")]
    InvalidInstance(#[from] InstanceLoadError),
    #[error("The instance does not describe a valid model, more details: {0}")]
    InvalidModel(#[from] ModelError),
    #[error("Solution {index} breaks a rule: {violation}")]
    InvalidSolution { index: usize, violation: Violation },
}

impl HangarError {
    pub(crate) fn invalid_solution(index: usize, violation: Violation) -> Self {
        Self::InvalidSolution { index, violation }
    }
}
