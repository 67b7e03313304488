use std::collections::HashMap;

use arch::{parse_address, Keyword, Mri, Rri, MEMORY_SIZE};

use crate::diag::{Diagnostic, Diagnostics, Range};
use crate::memory::{Cell, MemoryImage};
use crate::source::{SourceLine, Stmt};
use crate::symbols::Resolved;

pub fn check(
    lines: &[SourceLine],
    memory: &MemoryImage,
    resolved: &Resolved,
    out: &mut Diagnostics,
) {
    check_org(lines, out);
    check_memory(memory, out);
    report_labels(resolved, out);
}

// ----------------------------------------------------------------------------
// ORG

fn check_org(lines: &[SourceLine], out: &mut Diagnostics) {
    // address -> 1-based line of the first ORG placing code there
    let mut seen: HashMap<usize, usize> = HashMap::new();
    for line in lines {
        if out.is_exhausted() {
            break;
        }
        let operand = match line.stmt() {
            Stmt::End => break,
            Stmt::Org(Some(operand)) => operand,
            _ => continue,
        };
        let Some(addr) = parse_address(operand.text) else {
            continue;
        };
        match seen.get(&addr) {
            Some(first) => {
                let col = line.words().first().map(|w| w.col).unwrap_or(0);
                out.push(Diagnostic::error(
                    Range::from_col(line.idx(), col),
                    format!(
                        "ORG Instructions duplicate at line `{}`, the code placed there will be overwritten.",
                        first
                    ),
                ));
            }
            None => {
                seen.insert(addr, line.no());
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Memory image

fn check_memory(memory: &MemoryImage, out: &mut Diagnostics) {
    for addr in 0..MEMORY_SIZE {
        if out.is_exhausted() {
            break;
        }
        let cell = memory.get(addr);
        if cell.is_end() {
            break;
        }
        let line = memory.line_of(addr).unwrap_or(1).saturating_sub(1);

        match cell {
            Cell::Instruction {
                mri,
                address,
                indirect,
            } => {
                if !points_to_literal(memory, *address, *indirect) {
                    out.push(Diagnostic::warning(
                        Range::line(line),
                        format!("{} instruction pointing to an invalid memory address.", mri),
                    ));
                }
            }
            Cell::Verbatim(_) if cell.mnemonic() == Some(Keyword::Rri(Rri::HLT)) && addr >= 2 => {
                if is_unreachable_halt(memory.get(addr - 1), memory.get(addr - 2)) {
                    out.push(Diagnostic::warning(
                        Range::line(line),
                        "HLT instruction can't be reached, the previous instruction always branches away."
                            .to_string(),
                    ));
                }
            }
            _ => {}
        }
    }
}

/// The operand, after at most one indirection, holds a DEC or HEX literal.
fn points_to_literal(memory: &MemoryImage, address: usize, indirect: bool) -> bool {
    let target = if indirect {
        memory
            .get(address)
            .literal()
            .and_then(|pointer| usize::try_from(pointer).ok())
            .filter(|addr| *addr < MEMORY_SIZE)
    } else {
        Some(address)
    };
    target.is_some_and(|addr| memory.get(addr).literal().is_some())
}

/// A branch right before HLT that nothing can skip over.
fn is_unreachable_halt(prev: &Cell, before_prev: &Cell) -> bool {
    let branches = matches!(prev.mnemonic(), Some(Keyword::Mri(m)) if Mri::is_branch(m));
    let skipped = before_prev.mnemonic().is_some_and(|kw| kw.is_skip());
    branches && !skipped
}

// ----------------------------------------------------------------------------
// Labels

/// Label findings from pass 1 and 2. Reported whatever the budget says.
fn report_labels(resolved: &Resolved, out: &mut Diagnostics) {
    for dup in resolved.duplicates.values() {
        out.push_unbudgeted(Diagnostic::warning(
            Range::line(dup.line),
            format!(
                "Duplicate label `{}`, previously declared at address {}.",
                dup.label, dup.previous
            ),
        ));
    }
    for (label, line) in &resolved.unused {
        out.push_unbudgeted(Diagnostic::information(
            Range::line(*line),
            format!("Unused label: {}, it is never referenced as an operand.", label),
        ));
    }
    for (label, line) in &resolved.invalid {
        out.push_unbudgeted(Diagnostic::error(
            Range::line(*line),
            format!(
                "Invalid label `{}`: use 1 to 3 letters or digits, starting with a letter, and not a keyword.",
                label
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Severity;
    use crate::memory::materialize;
    use crate::source::normalize;
    use crate::symbols::resolve;

    fn run(text: &str) -> Vec<Diagnostic> {
        let lines = normalize(text);
        let mut resolved = resolve(&lines);
        let memory = materialize(&lines, &resolved.symbols, &mut resolved.unused);
        let mut out = Diagnostics::new(100);
        check(&lines, &memory, &resolved, &mut out);
        out.into_vec()
    }

    #[test]
    fn duplicate_org_cites_first_line() {
        let diags = run("ORG 100\nCLA\nORG 200\nCMA\nORG 0100\nHLT\nEND");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].line(), 4);
        assert!(diags[0].message.starts_with("ORG Instructions duplicate at line `1`"));
    }

    #[test]
    fn mri_must_reach_a_literal() {
        let diags = run("LDA A\nADD B\nSTA P I\nISZ Q I\nHLT\nA, DEC 1\nB, CLA\nP, HEX 5\nQ, HEX 6\nEND");
        // B holds an instruction. P points at A, Q points at B.
        let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "ADD instruction pointing to an invalid memory address.",
                "ISZ instruction pointing to an invalid memory address.",
            ]
        );
        assert_eq!(diags[0].line(), 1);
        assert_eq!(diags[1].line(), 3);
    }

    #[test]
    fn indirect_pointer_out_of_memory() {
        let diags = run("LDA P I\nHLT\nP, DEC -1\nEND");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.starts_with("LDA instruction pointing"));
    }

    #[test]
    fn halt_after_unconditional_branch() {
        let diags = run("CLA\nBUN X\nHLT\nX, DEC 0\nEND");
        assert!(diags
            .iter()
            .any(|d| d.message.starts_with("HLT instruction can't be reached") && d.line() == 2));

        let diags = run("SZA\nBUN X\nHLT\nX, DEC 0\nEND");
        assert!(!diags.iter().any(|d| d.message.starts_with("HLT instruction")));

        let diags = run("BUN X\nHLT\nX, DEC 0\nEND");
        assert!(!diags.iter().any(|d| d.message.starts_with("HLT instruction")));
    }

    #[test]
    fn label_findings() {
        let diags = run("A, CLA\nA, CMA\nLONG, INC\nB, HLT\nEND");
        let found: Vec<_> = diags.iter().map(|d| (d.severity, d.line())).collect();
        assert_eq!(
            found,
            vec![
                (Severity::Warning, 1),
                (Severity::Information, 1),
                (Severity::Information, 3),
                (Severity::Error, 2),
            ]
        );
        assert_eq!(
            diags[0].message,
            "Duplicate label `A`, previously declared at address 0."
        );
    }
}
