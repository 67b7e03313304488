use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Information,
}

/// Editor position. Both fields are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    /// `character` value meaning end of line.
    pub const EOL: u32 = u32::MAX;

    pub fn new(line: usize, character: usize) -> Self {
        Position {
            line: line as u32,
            character: character.min(Self::EOL as usize) as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// The whole of line `line`.
    pub fn line(line: usize) -> Self {
        Range::from_col(line, 0)
    }

    /// From column `col` to the end of line `line`.
    pub fn from_col(line: usize, col: usize) -> Self {
        Range {
            start: Position::new(line, col),
            end: Position {
                line: line as u32,
                character: Position::EOL,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(range: Range, message: String) -> Self {
        Diagnostic {
            range,
            message,
            severity: Severity::Error,
        }
    }

    pub fn warning(range: Range, message: String) -> Self {
        Diagnostic {
            range,
            message,
            severity: Severity::Warning,
        }
    }

    pub fn information(range: Range, message: String) -> Self {
        Diagnostic {
            range,
            message,
            severity: Severity::Information,
        }
    }

    /// 0-based line the diagnostic starts on.
    pub fn line(&self) -> usize {
        self.range.start.line as usize
    }
}

// ----------------------------------------------------------------------------
// Problem budget

/// Upper bound on the diagnostics one analysis run may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemBudget {
    count: usize,
    limit: usize,
}

impl ProblemBudget {
    pub fn new(limit: usize) -> Self {
        ProblemBudget { count: 0, limit }
    }

    pub fn is_exhausted(&self) -> bool {
        self.count >= self.limit
    }

    /// Consume one unit. Returns false once the limit is reached.
    pub fn take(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.count += 1;
        true
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Diagnostics of one run, collected against a shared budget.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    budget: ProblemBudget,
    list: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(limit: usize) -> Self {
        Diagnostics {
            budget: ProblemBudget::new(limit),
            list: vec![],
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.budget.is_exhausted()
    }

    /// Add a diagnostic if the budget allows it.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        if !self.budget.take() {
            log::trace!("budget exhausted, dropped: {}", diag.message);
            return false;
        }
        self.list.push(diag);
        true
    }

    /// Add a diagnostic regardless of the budget.
    pub fn push_unbudgeted(&mut self, diag: Diagnostic) {
        self.list.push(diag);
    }

    pub fn budget(&self) -> &ProblemBudget {
        &self.budget
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.list
    }
}
