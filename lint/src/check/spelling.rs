use arch::{Keyword, Pseudo};

use crate::diag::{Diagnostic, Diagnostics, Range};
use crate::source::SourceLine;

/// Flag words that are not mnemonics. Stops at END.
///
/// The checked word is the mnemonic itself when it takes an operand,
/// otherwise the last word on the line.
pub fn check(lines: &[SourceLine], out: &mut Diagnostics) {
    for line in lines {
        if out.is_exhausted() {
            break;
        }
        let words = line.words();
        let (Some(head), Some(last)) = (words.first(), words.last()) else {
            continue;
        };
        let word = match Keyword::parse(head.text) {
            Some(kw) if kw.takes_operand() => head,
            _ => last,
        };
        match Keyword::parse(word.text) {
            Some(Keyword::Pseudo(Pseudo::END)) => break,
            Some(_) => {}
            None => {
                out.push(Diagnostic::warning(
                    Range::from_col(line.idx(), word.col),
                    format!("Invalid keyword: `{}`", word.text),
                ));
            }
        }
    }
}
