use color_print::{cformat, cprintln};

use crate::analyze::Analysis;
use crate::complete::{CompletionItem, CompletionKind};
use crate::diag::{Diagnostic, Severity};
use crate::memory::Cell;

/// Print a diagnostic with the offending source line.
pub fn print_diag(diag: &Diagnostic, file: &str, analysis: &Analysis) {
    match diag.severity {
        Severity::Error => cprintln!("<red,bold>error</>: {}", diag.message),
        Severity::Warning => cprintln!("<yellow,bold>warn</>: {}", diag.message),
        Severity::Information => cprintln!("<green,bold>note</>: {}", diag.message),
    }

    let idx = diag.line();
    let raw = analysis.lines.get(idx).map(|l| l.raw()).unwrap_or("");
    cprintln!("     <blue>--></> <underline>{}:{}</>", file, idx + 1);
    cprintln!("      <blue>|</>");
    cprintln!(" <blue>{:>4} |</> {}", idx + 1, raw);
    cprintln!("      <blue>|</>");
}

pub fn print_completion(item: &CompletionItem) {
    let label = match item.kind {
        CompletionKind::Keyword => cformat!("<red>{:<4}</>", item.label),
        CompletionKind::Value => cformat!("<green>{:<4}</>", item.label),
    };
    cprintln!("{} <blue>{}</> {}", label, item.detail, item.documentation);
}

/// Listing of every source line with the address it was placed at.
pub fn print_dump(path: &str, analysis: &Analysis) {
    let mut addr_of = vec![None; analysis.lines.len()];
    for (addr, line_no) in analysis.memory.written() {
        if let Some(slot) = addr_of.get_mut(line_no - 1) {
            *slot = Some(addr);
        }
    }

    println!("+------+------+--------------------+----------------------------------+");
    println!("| {:<68} |", path);
    println!("+------+------+--------------------+----------------------------------+");
    for (line, addr) in analysis.lines.iter().zip(&addr_of) {
        let (addr, cell) = match addr {
            Some(addr) => {
                let cell = analysis.memory.get(*addr);
                let text = cell.to_string();
                let cell = match cell {
                    Cell::Unresolved { .. } => cformat!("<r,u>{:<18}</>", text),
                    _ => cformat!("<y>{:<18}</>", text),
                };
                (cformat!("<green>{:03X}</>", addr), cell)
            }
            None => ("   ".to_string(), " ".repeat(18)),
        };
        println!("| {:>4} | {}  | {} | {}", line.no(), addr, cell, line.raw());
    }
    println!("+------+------+--------------------+----------------------------------+");

    if analysis.resolved.symbols.is_empty() {
        return;
    }
    println!("Labels:");
    for (name, symbol) in analysis.resolved.symbols.iter() {
        cprintln!(
            "  <g>{:<3}</> = <y>0x{:03X}</> (line {})",
            name,
            symbol.address,
            symbol.line + 1
        );
    }
}
