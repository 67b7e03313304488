use log::{debug, info};

use crate::check::{logic, spelling, syntax};
use crate::config::Settings;
use crate::diag::{Diagnostic, Diagnostics};
use crate::memory::{materialize, MemoryImage};
use crate::source::{normalize, SourceLine};
use crate::symbols::{resolve, Resolved};

/// Everything one analysis run produced. Built fresh for every document snapshot.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub lines: Vec<SourceLine>,
    /// Label tables. `unused` is final, operand references already removed.
    pub resolved: Resolved,
    pub memory: MemoryImage,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn run(text: &str, settings: &Settings) -> Self {
        info!("analyzing {} lines", text.split('\n').count());

        let lines = normalize(text);
        let mut resolved = resolve(&lines);
        let memory = materialize(&lines, &resolved.symbols, &mut resolved.unused);

        let mut out = Diagnostics::new(settings.max_number_of_problems);
        spelling::check(&lines, &mut out);
        debug!("spelling: budget used {}", out.budget().count());
        syntax::check(&lines, &memory, &mut out);
        debug!("syntax: budget used {}", out.budget().count());
        logic::check(&lines, &memory, &resolved, &mut out);
        debug!("logic: budget used {}", out.budget().count());

        let diagnostics = out.into_vec();
        info!("{} diagnostics", diagnostics.len());
        Analysis {
            lines,
            resolved,
            memory,
            diagnostics,
        }
    }
}

/// Diagnose a whole document.
pub fn analyze(text: &str, settings: &Settings) -> Vec<Diagnostic> {
    Analysis::run(text, settings).diagnostics
}
