use std::fmt;

use arch::{parse_address, parse_decimal, parse_hex, Keyword, Mri, Pseudo, INDIRECT, MEMORY_SIZE};
use indexmap::IndexMap;
use log::{debug, trace, warn};

use crate::source::{SourceLine, Stmt};
use crate::symbols::{LocationCounter, SymbolTable};

// ----------------------------------------------------------------------------
// Cell

/// One word of the simulated memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    /// MRI with its operand resolved to an address.
    Instruction {
        mri: Mri,
        address: usize,
        indirect: bool,
    },
    /// MRI whose operand is neither a known label nor an address.
    /// `line` is 1-based.
    Unresolved {
        mri: Mri,
        token: String,
        line: usize,
    },
    /// Any other line, trimmed, label included.
    Verbatim(String),
}

impl Cell {
    /// Words after the label, for verbatim cells.
    pub fn body_words(&self) -> Vec<&str> {
        match self {
            Cell::Verbatim(text) => {
                let body = text.split_once(',').map(|(_, b)| b).unwrap_or(text);
                body.split_whitespace().collect()
            }
            _ => vec![],
        }
    }

    pub fn mnemonic(&self) -> Option<Keyword> {
        match self {
            Cell::Empty => None,
            Cell::Instruction { mri, .. } | Cell::Unresolved { mri, .. } => Some(Keyword::Mri(*mri)),
            Cell::Verbatim(_) => self.body_words().first().and_then(|w| Keyword::parse(w)),
        }
    }

    /// Value of a `DEC n` or `HEX n` cell.
    pub fn literal(&self) -> Option<i16> {
        match self.body_words()[..] {
            ["DEC", value] => parse_decimal(value),
            ["HEX", value] => parse_hex(value),
            _ => None,
        }
    }

    pub fn is_end(&self) -> bool {
        self.mnemonic() == Some(Keyword::Pseudo(Pseudo::END))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Instruction {
                mri,
                address,
                indirect,
            } => {
                write!(f, "{} {}", mri, address)?;
                if *indirect {
                    write!(f, " {}", INDIRECT)?;
                }
                Ok(())
            }
            Cell::Unresolved { mri, token, line } => write!(f, "{} ?{}@{}", mri, token, line),
            Cell::Verbatim(text) => write!(f, "{}", text),
        }
    }
}

// ----------------------------------------------------------------------------
// Memory image

#[derive(Debug, Clone)]
pub struct MemoryImage {
    cells: Vec<Cell>,
    /// Address -> 1-based source line.
    lines: IndexMap<usize, usize>,
}

static EMPTY: Cell = Cell::Empty;

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryImage {
    pub fn new() -> Self {
        MemoryImage {
            cells: vec![Cell::Empty; MEMORY_SIZE],
            lines: IndexMap::new(),
        }
    }

    /// Out of range addresses read as empty.
    pub fn get(&self, addr: usize) -> &Cell {
        self.cells.get(addr).unwrap_or(&EMPTY)
    }

    /// 1-based source line that produced the word at `addr`.
    pub fn line_of(&self, addr: usize) -> Option<usize> {
        self.lines.get(&addr).copied()
    }

    /// Written addresses in the order they were written.
    pub fn written(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.lines.iter().map(|(addr, line)| (*addr, *line))
    }

    fn write(&mut self, addr: usize, cell: Cell, line: usize) {
        if addr >= MEMORY_SIZE {
            warn!("line {}: address {} is outside memory, dropped", line, addr);
            return;
        }
        self.cells[addr] = cell;
        self.lines.insert(addr, line);
    }
}

// ----------------------------------------------------------------------------
// Pass 2

/// Lay the program out in memory. Labels referenced by an operand are removed from `unused`.
pub fn materialize(
    lines: &[SourceLine],
    symbols: &SymbolTable,
    unused: &mut IndexMap<String, usize>,
) -> MemoryImage {
    let mut memory = MemoryImage::new();
    let mut lc = LocationCounter::default();

    for line in lines {
        let cell = match line.stmt() {
            Stmt::Blank => continue,
            Stmt::Org(operand) => {
                lc.org(operand);
                continue;
            }
            Stmt::End => break,
            Stmt::Mri {
                mri,
                operand,
                indirect,
            } => match symbols.get_address(operand.text) {
                Some(address) => {
                    if unused.shift_remove(operand.text).is_some() {
                        trace!("label {} referenced at line {}", operand.text, line.no());
                    }
                    Cell::Instruction {
                        mri,
                        address,
                        indirect,
                    }
                }
                None => match parse_address(operand.text) {
                    Some(address) => Cell::Instruction {
                        mri,
                        address,
                        indirect,
                    },
                    None => Cell::Unresolved {
                        mri,
                        token: operand.text.to_string(),
                        line: line.no(),
                    },
                },
            },
            Stmt::Other => Cell::Verbatim(line.code().trim().to_string()),
        };
        memory.write(lc.get(), cell, line.no());
        lc.advance();
    }

    debug!("pass 2: {} words written", memory.lines.len());
    memory
}
