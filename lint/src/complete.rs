use arch::{Keyword, VOCABULARY};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::diag::Position;
use crate::source::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionKind {
    Keyword,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: String,
    pub documentation: String,
}

impl CompletionItem {
    fn keyword(kw: &Keyword) -> Self {
        let detail = match kw.code() {
            Some(code) => format!("{} 0x{:04X}", kw.class(), code),
            None => kw.class().to_string(),
        };
        CompletionItem {
            label: kw.name().to_string(),
            kind: CompletionKind::Keyword,
            detail,
            documentation: kw.description().to_string(),
        }
    }

    fn label(name: &str, line_no: usize) -> Self {
        CompletionItem {
            label: name.to_string(),
            kind: CompletionKind::Value,
            detail: "Label".to_string(),
            documentation: format!("Declared at line {}.", line_no),
        }
    }
}

/// Candidates for the word under the cursor: declared labels, then mnemonics.
pub fn complete(text: &str, position: Position) -> Vec<CompletionItem> {
    let lines = normalize(text);
    let Some(current) = lines.get(position.line as usize) else {
        return vec![];
    };

    let before: String = current
        .raw()
        .chars()
        .take(position.character as usize)
        .collect();
    let body = before.split_once(',').map(|(_, b)| b).unwrap_or(&before);
    let typed = if body.ends_with(char::is_whitespace) {
        ""
    } else {
        body.split_whitespace().last().unwrap_or("")
    };
    let preceding = body.split_whitespace().count() - usize::from(!typed.is_empty());
    let in_operand = preceding >= 1;

    let mut items = vec![];
    let mut seen = IndexSet::new();
    for line in &lines {
        let Some(label) = line.label() else {
            continue;
        };
        if label.is_empty() || !seen.insert(label) {
            continue;
        }
        if in_operand && !matches(label, typed) {
            continue;
        }
        items.push(CompletionItem::label(label, line.no()));
    }
    items.extend(
        VOCABULARY
            .iter()
            .filter(|kw| matches(kw.name(), typed))
            .map(CompletionItem::keyword),
    );
    items
}

fn matches(candidate: &str, typed: &str) -> bool {
    candidate
        .to_ascii_uppercase()
        .contains(&typed.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "ORG 100\nLDA NUM\nADD NU\nHLT\nNUM, DEC 3\nNXT, DEC 4\nTMP, HEX 0\nEND";

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items
            .iter()
            .filter(|i| i.kind == CompletionKind::Value)
            .map(|i| i.label.as_str())
            .collect()
    }

    fn keywords(items: &[CompletionItem]) -> Vec<&str> {
        items
            .iter()
            .filter(|i| i.kind == CompletionKind::Keyword)
            .map(|i| i.label.as_str())
            .collect()
    }

    #[test]
    fn operand_filters_labels() {
        let items = complete(DOC, Position::new(2, 6));
        assert_eq!(labels(&items), vec!["NUM"]);
        assert!(keywords(&items).is_empty());
    }

    #[test]
    fn mnemonic_position_keeps_all_labels() {
        let items = complete(DOC, Position::new(3, 2));
        assert_eq!(labels(&items), vec!["NUM", "NXT", "TMP"]);
        assert_eq!(keywords(&items), vec!["HLT"]);
        let hlt = items.iter().find(|i| i.label == "HLT").unwrap();
        assert_eq!(hlt.detail, "Register-reference instruction 0x7001");
        assert_eq!(hlt.documentation, "Halt the computer.");
    }

    #[test]
    fn empty_word_lists_everything() {
        let items = complete(DOC, Position::new(2, 4));
        assert_eq!(labels(&items).len(), 3);
        assert_eq!(keywords(&items).len(), VOCABULARY.len());
    }

    #[test]
    fn substring_and_case() {
        let items = complete("lda", Position::new(0, 3));
        assert_eq!(keywords(&items), vec!["LDA"]);
        let items = complete("ZA", Position::new(0, 2));
        assert_eq!(keywords(&items), vec!["SZA"]);
    }

    #[test]
    fn outside_document() {
        assert!(complete(DOC, Position::new(99, 0)).is_empty());
    }
}
