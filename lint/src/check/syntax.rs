use arch::{parse_address, parse_decimal, parse_hex, Io, Keyword, Pseudo, Rri, INDIRECT, MEMORY_SIZE};
use strum::IntoEnumIterator;

use crate::diag::{Diagnostic, Diagnostics, Range};
use crate::memory::{Cell, MemoryImage};
use crate::source::SourceLine;

pub fn check(lines: &[SourceLine], memory: &MemoryImage, out: &mut Diagnostics) {
    check_lines(lines, out);
    check_memory(memory, out);
}

// ----------------------------------------------------------------------------
// Source lines

fn check_lines(lines: &[SourceLine], out: &mut Diagnostics) {
    let mut end_seen = false;
    let mut hlt_seen = false;

    let mut iter = lines.iter();
    while let Some(line) = iter.next() {
        if out.is_exhausted() {
            break;
        }
        let words = line.words();
        let Some(head) = words.first() else {
            continue;
        };
        let operand = words.get(1);
        let operand_col = operand.unwrap_or(head).col;

        match Keyword::parse(head.text) {
            Some(Keyword::Pseudo(Pseudo::ORG)) => match operand {
                None => {
                    out.push(Diagnostic::error(
                        Range::from_col(line.idx(), head.col),
                        "Missing ORG address.".to_string(),
                    ));
                }
                Some(op) if parse_address(op.text).is_none() || words.len() > 2 => {
                    out.push(Diagnostic::error(
                        Range::from_col(line.idx(), head.col),
                        "Invalid ORG address.".to_string(),
                    ));
                }
                Some(_) => {}
            },
            Some(Keyword::Pseudo(Pseudo::DEC)) => {
                if operand.and_then(|w| parse_decimal(w.text)).is_none() {
                    out.push(Diagnostic::warning(
                        Range::from_col(line.idx(), operand_col),
                        "Invalid decimal value.".to_string(),
                    ));
                }
            }
            Some(Keyword::Pseudo(Pseudo::HEX)) => {
                if operand.and_then(|w| parse_hex(w.text)).is_none() {
                    out.push(Diagnostic::warning(
                        Range::from_col(line.idx(), operand_col),
                        "Invalid hexadecimal value.".to_string(),
                    ));
                }
            }
            Some(Keyword::Pseudo(Pseudo::END)) => {
                end_seen = true;
                for rest in iter.by_ref().filter(|l| !l.is_blank()) {
                    out.push(Diagnostic::information(
                        Range::line(rest.idx()),
                        "This line is ignored by the assembler, it comes after END.".to_string(),
                    ));
                }
                break;
            }
            Some(Keyword::Rri(Rri::HLT)) => hlt_seen = true,
            Some(Keyword::Mri(_)) => {
                if let Some(modifier) = words.get(2) {
                    if modifier.text != INDIRECT {
                        out.push(Diagnostic::warning(
                            Range::from_col(line.idx(), modifier.col),
                            "Invalid IMA keyword.".to_string(),
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    let last = lines.len().saturating_sub(1);
    if !end_seen {
        out.push(Diagnostic::error(
            Range::line(last),
            "Missing END instruction.".to_string(),
        ));
    }
    if !hlt_seen {
        out.push(Diagnostic::error(
            Range::line(last),
            "Missing HLT instruction will generate an infinite-loop.".to_string(),
        ));
    }
}

// ----------------------------------------------------------------------------
// Memory image

fn check_memory(memory: &MemoryImage, out: &mut Diagnostics) {
    let mut addr = 0;
    while addr < MEMORY_SIZE && !out.is_exhausted() {
        let cell = memory.get(addr);
        if cell.is_end() {
            break;
        }
        // Cells mentioning ORG move the scan. Only forward jumps are taken.
        if let Some(target) = org_jump(cell) {
            if target > addr {
                addr = target;
                continue;
            }
        }

        match cell {
            Cell::Unresolved { token, line, .. } => {
                out.push(Diagnostic::warning(
                    Range::line(line.saturating_sub(1)),
                    format!("Unresolved label `{}`.", token),
                ));
            }
            Cell::Verbatim(_) => {
                let line = memory.line_of(addr).unwrap_or(1).saturating_sub(1);
                let words = cell.body_words();
                let rri = Rri::iter().map(<&str>::from);
                if loosely_matches(&words, rri) && !words_are::<Rri>(&words) {
                    out.push(Diagnostic::error(
                        Range::line(line),
                        "Invalid RRI instruction syntax.".to_string(),
                    ));
                }
                let io = Io::iter().map(<&str>::from);
                if loosely_matches(&words, io) && !words_are::<Io>(&words) {
                    out.push(Diagnostic::error(
                        Range::line(line),
                        "Invalid IO instruction syntax.".to_string(),
                    ));
                }
            }
            _ => {}
        }
        addr += 1;
    }
}

/// Address named by the word after the first word containing `ORG`.
/// Reads leading hex digits only.
fn org_jump(cell: &Cell) -> Option<usize> {
    let text = cell.to_string();
    let mut words = text.split_whitespace().skip_while(|w| !w.contains("ORG"));
    words.next()?;
    let digits: String = words
        .next()?
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect();
    usize::from_str_radix(&digits, 16).ok()
}

fn loosely_matches<'a>(words: &[&str], mut mnemonics: impl Iterator<Item = &'a str>) -> bool {
    mnemonics.any(|m| words.iter().any(|w| w.contains(m)))
}

/// Exactly one word, and it is a mnemonic of `T`.
fn words_are<T: std::str::FromStr>(words: &[&str]) -> bool {
    matches!(words, [word] if word.parse::<T>().is_ok())
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
        check(&lines, &memory, &mut out);
        out.into_vec()
    }

    fn messages(diags: &[Diagnostic]) -> Vec<&str> {
        diags.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn clean_program() {
        let diags = run("ORG 10\nLDA A\nADD B I\nHLT\nA, DEC -3\nB, HEX 7FFF\nEND");
        assert!(diags.is_empty(), "{:?}", diags);
    }

    #[test]
    fn org_operands() {
        let diags = run("ORG\nORG 1000\nORG 10 20\nORG ZZ\nHLT\nEND");
        assert_eq!(
            messages(&diags),
            vec![
                "Missing ORG address.",
                "Invalid ORG address.",
                "Invalid ORG address.",
                "Invalid ORG address."
            ]
        );
        assert!(diags.iter().all(|d| d.severity == Severity::Error));
        assert_eq!(diags[1].line(), 1);
    }

    #[test]
    fn literal_ranges() {
        let diags = run("DEC 40000\nDEC -32768\nHEX 8000\nHEX -8000\nHEX 1G\nDEC\nHLT\nEND");
        assert_eq!(
            messages(&diags),
            vec![
                "Invalid decimal value.",
                "Invalid hexadecimal value.",
                "Invalid hexadecimal value.",
                "Invalid decimal value."
            ]
        );
        assert_eq!(diags[0].range, Range::from_col(0, 4));
        assert_eq!(diags[3].range, Range::from_col(5, 0));
    }

    #[test]
    fn code_after_end_is_reported_once_per_line() {
        let diags = run("HLT\nEND\nCLA\n\n/ note\nCMA");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].range, Range::line(2));
        assert_eq!(diags[1].range, Range::line(5));
        assert!(diags.iter().all(|d| d.severity == Severity::Information));
    }

    #[test]
    fn missing_end_and_hlt_at_last_line() {
        let diags = run("CLA\nCMA");
        assert_eq!(
            messages(&diags),
            vec![
                "Missing END instruction.",
                "Missing HLT instruction will generate an infinite-loop."
            ]
        );
        assert!(diags.iter().all(|d| d.line() == 1));
    }

    #[test]
    fn ima_modifier() {
        let diags = run("LDA 10 J\nLDA 10 I\nHLT\nEND");
        assert_eq!(messages(&diags), vec!["Invalid IMA keyword."]);
        assert_eq!(diags[0].range, Range::from_col(0, 7));
    }

    #[test]
    fn unresolved_labels() {
        let diags = run("LDA NOP\nHLT\nEND");
        assert_eq!(messages(&diags), vec!["Unresolved label `NOP`."]);
        assert_eq!(diags[0].line(), 0);
    }

    #[test]
    fn malformed_register_and_io_words() {
        let diags = run("CLA 5\nSPAN\nX, INC\nOUT OUT\nHLT\nEND");
        assert_eq!(
            messages(&diags),
            vec![
                "Invalid RRI instruction syntax.",
                "Invalid RRI instruction syntax.",
                "Invalid IO instruction syntax."
            ]
        );
        assert_eq!(diags[2].line(), 3);
    }

    #[test]
    fn org_mention_in_memory_moves_the_scan() {
        // ORGX is not a directive, so it lands in memory and the scan jumps to 0x20.
        let diags = run("ORGX 20\nCLA 1\nHLT\nEND");
        assert!(!messages(&diags).contains(&"Invalid RRI instruction syntax."));

        let cell = Cell::Verbatim("ORGX 20".to_string());
        assert_eq!(org_jump(&cell), Some(32));
        assert_eq!(org_jump(&Cell::Verbatim("ORGX".to_string())), None);
    }

    #[test]
    fn backward_org_mention_does_not_loop() {
        let diags = run("CLA\nORGY 0\nCLA 1\nHLT\nEND");
        assert!(messages(&diags).contains(&"Invalid RRI instruction syntax."));
    }
}
