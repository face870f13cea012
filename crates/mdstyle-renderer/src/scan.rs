//! Line-scanning state machine for block extents.
//!
//! Block rules whose body runs "until the next marker" (alerts, footnote
//! definitions, slide sections) describe their terminators with a
//! classifier, and [`BlockScanner`] walks the lines:
//!
//! ```text
//! InBlock --Body--> InBlock
//! InBlock --Close--> Done(Closed)         closing line consumed
//! InBlock --Boundary--> AtBoundary --> Done(Boundary)   line left for the next rule
//! InBlock --end of input--> Done(EndOfInput)
//! ```
//!
//! Lines inside fenced or indented code are always body.

use crate::fence::CodeTracker;

/// How the scanner classifies a line outside code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineClass {
    /// Part of the body.
    Body,
    /// Ends the block; the line is consumed with it.
    Close,
    /// Ends the block; the line starts whatever comes next.
    Boundary,
}

/// Scanner state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// Accumulating body lines.
    InBlock,
    /// A boundary line was seen and is not consumed.
    AtBoundary,
    /// Scanning finished.
    Done(Terminator),
}

/// Why a block ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminator {
    /// A closing line was consumed.
    Closed,
    /// The next line starts another block.
    Boundary,
    /// Input ran out.
    EndOfInput,
}

/// Result of scanning one block body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extent {
    /// Number of body lines.
    pub body_lines: usize,
    /// Number of lines consumed (body plus a consumed closing line).
    pub consumed: usize,
    /// Why scanning stopped.
    pub terminator: Terminator,
}

/// Walks lines following a block's opening line.
pub struct BlockScanner<F> {
    classify: F,
    code: CodeTracker,
    state: ScanState,
    body_lines: usize,
}

impl<F: Fn(&str) -> LineClass> BlockScanner<F> {
    /// Create a scanner with a terminator classifier.
    pub fn new(classify: F) -> Self {
        Self {
            classify,
            code: CodeTracker::new(),
            state: ScanState::InBlock,
            body_lines: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feed one line and return the new state.
    pub fn step(&mut self, line: &str) -> ScanState {
        self.state = match self.state {
            ScanState::InBlock => {
                let class = if self.code.would_be_code(line) {
                    LineClass::Body
                } else {
                    (self.classify)(line)
                };
                match class {
                    LineClass::Body => {
                        self.code.update(line);
                        self.body_lines += 1;
                        ScanState::InBlock
                    }
                    LineClass::Close => ScanState::Done(Terminator::Closed),
                    LineClass::Boundary => ScanState::AtBoundary,
                }
            }
            ScanState::AtBoundary => ScanState::Done(Terminator::Boundary),
            done @ ScanState::Done(_) => done,
        };
        self.state
    }

    /// Scan `lines` until the block ends.
    pub fn scan(mut self, lines: &[&str]) -> Extent {
        for line in lines {
            if self.step(line) != ScanState::InBlock {
                break;
            }
        }
        let terminator = match self.state {
            ScanState::InBlock => Terminator::EndOfInput,
            ScanState::AtBoundary => Terminator::Boundary,
            ScanState::Done(t) => t,
        };
        let consumed = match terminator {
            Terminator::Closed => self.body_lines + 1,
            Terminator::Boundary | Terminator::EndOfInput => self.body_lines,
        };
        Extent {
            body_lines: self.body_lines,
            consumed,
            terminator,
        }
    }
}

/// Scan a block body with the given classifier.
pub fn scan_extent(lines: &[&str], classify: impl Fn(&str) -> LineClass) -> Extent {
    BlockScanner::new(classify).scan(lines)
}
