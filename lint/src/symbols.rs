use arch::{is_reserved, parse_address};
use indexmap::IndexMap;
use log::{debug, trace};

use crate::source::{SourceLine, Stmt, Word};

// ----------------------------------------------------------------------------
// Location counter

/// Address the next word is placed at.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocationCounter(usize);

impl LocationCounter {
    pub fn get(&self) -> usize {
        self.0
    }

    /// Apply an ORG operand. An invalid or missing address leaves the counter as is.
    pub fn org(&mut self, operand: Option<Word>) {
        if let Some(addr) = operand.and_then(|w| parse_address(w.text)) {
            self.0 = addr;
        }
    }

    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

// ----------------------------------------------------------------------------
// Symbol table

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub address: usize,
    /// 0-based line of the declaration.
    pub line: usize,
}

#[derive(Debug, Default, Clone)]
pub struct SymbolTable(IndexMap<String, Symbol>);

impl SymbolTable {
    pub fn insert(&mut self, name: String, symbol: Symbol) -> Option<Symbol> {
        self.0.insert(name, symbol)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.0.get(name)
    }

    pub fn get_address(&self, name: &str) -> Option<usize> {
        self.0.get(name).map(|s| s.address)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Symbol)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A label declared again after it already had an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub label: String,
    pub previous: usize,
    /// 0-based line of the redeclaration.
    pub line: usize,
}

/// Output of the first pass.
#[derive(Debug, Default, Clone)]
pub struct Resolved {
    pub symbols: SymbolTable,
    /// Keyed by the address of the redeclaration.
    pub duplicates: IndexMap<usize, Duplicate>,
    /// Label -> declaring line. Emptied as operands reference them.
    pub unused: IndexMap<String, usize>,
    /// Malformed label -> line.
    pub invalid: IndexMap<String, usize>,
}

/// Labels are one to three alphanumerics starting with a letter, and not a mnemonic.
pub fn is_valid_label(label: &str) -> bool {
    let mut chars = label.chars();
    let head_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    head_ok
        && label.chars().count() <= 3
        && chars.all(|c| c.is_ascii_alphanumeric())
        && !is_reserved(label)
}

// ----------------------------------------------------------------------------
// Pass 1

/// Assign an address to every label.
pub fn resolve(lines: &[SourceLine]) -> Resolved {
    let mut resolved = Resolved::default();
    let mut lc = LocationCounter::default();

    for line in lines {
        let stmt = line.stmt();
        match stmt {
            Stmt::Blank => continue,
            Stmt::Org(operand) => {
                lc.org(operand);
                continue;
            }
            Stmt::End => break,
            _ => {}
        }

        if let Some(label) = line.label() {
            if is_valid_label(label) {
                let symbol = Symbol {
                    address: lc.get(),
                    line: line.idx(),
                };
                if let Some(prev) = resolved.symbols.insert(label.to_string(), symbol) {
                    trace!("label {} redeclared at line {}", label, line.no());
                    resolved.duplicates.insert(
                        lc.get(),
                        Duplicate {
                            label: label.to_string(),
                            previous: prev.address,
                            line: line.idx(),
                        },
                    );
                }
                trace!("label {} = {}", label, lc.get());
                resolved.unused.insert(label.to_string(), line.idx());
            } else {
                resolved.invalid.insert(label.to_string(), line.idx());
            }
        }
        lc.advance();
    }

    debug!(
        "pass 1: {} labels, {} duplicate, {} invalid",
        resolved.symbols.len(),
        resolved.duplicates.len(),
        resolved.invalid.len()
    );
    resolved
}
