use arch::{Keyword, Mri, Pseudo, INDIRECT};

/// Characters opening an inline comment, in priority order.
const COMMENT_MARKERS: [char; 3] = ['/', ';', '#'];

// ----------------------------------------------------------------------------
// Line

/// One document line. `code` is the line without its comment; `raw` is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    idx: usize,
    raw: String,
    code: String,
}

/// Split a document into lines, one per editor line, comments removed.
pub fn normalize(text: &str) -> Vec<SourceLine> {
    text.split('\n')
        .enumerate()
        .map(|(idx, raw)| SourceLine::new(idx, raw.strip_suffix('\r').unwrap_or(raw)))
        .collect()
}

impl SourceLine {
    pub fn new(idx: usize, raw: &str) -> Self {
        let code = COMMENT_MARKERS
            .iter()
            .fold(raw, |code, marker| match code.split_once(*marker) {
                Some((before, _)) => before,
                None => code,
            });
        Self {
            idx,
            raw: raw.to_string(),
            code: code.to_string(),
        }
    }

    /// 0-based line index.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// 1-based line number.
    pub fn no(&self) -> usize {
        self.idx + 1
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Blank or fully commented.
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }
}

// ----------------------------------------------------------------------------
// Label / body split

impl SourceLine {
    /// Text before the first comma, if the line declares a label.
    pub fn label(&self) -> Option<&str> {
        self.code.split_once(',').map(|(label, _)| label.trim())
    }

    /// Byte offset where the instruction part starts.
    fn body_start(&self) -> usize {
        self.code.find(',').map(|i| i + 1).unwrap_or(0)
    }

    /// Whitespace separated words of the body, with their column in the line.
    pub fn words(&self) -> Vec<Word<'_>> {
        let start = self.body_start();
        split_words(&self.code[start..])
            .into_iter()
            .map(|(offset, text)| Word {
                text,
                col: self.code[..start + offset].chars().count(),
            })
            .collect()
    }

    pub fn stmt(&self) -> Stmt<'_> {
        let words = self.words();
        // A bare `X,` still declares X and takes a word.
        if words.is_empty() && self.label().is_some() {
            return Stmt::Other;
        }
        Stmt::classify(&words)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    /// Column of the first character, counted in characters.
    pub col: usize,
}

fn split_words(s: &str) -> Vec<(usize, &str)> {
    let mut words = vec![];
    let mut begin = None;
    for (i, c) in s.char_indices() {
        match (c.is_whitespace(), begin) {
            (true, Some(b)) => {
                words.push((b, &s[b..i]));
                begin = None;
            }
            (false, None) => begin = Some(i),
            _ => {}
        }
    }
    if let Some(b) = begin {
        words.push((b, &s[b..]));
    }
    words
}

// ----------------------------------------------------------------------------
// Statement

/// Classification of a line by the first word of its body.
/// Both address walks decide placement from this alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stmt<'a> {
    Blank,
    Org(Option<Word<'a>>),
    End,
    Mri {
        mri: Mri,
        operand: Word<'a>,
        indirect: bool,
    },
    Other,
}

impl<'a> Stmt<'a> {
    fn classify(words: &[Word<'a>]) -> Self {
        let Some(head) = words.first() else {
            return Stmt::Blank;
        };
        match Keyword::parse(head.text) {
            Some(Keyword::Pseudo(Pseudo::ORG)) => Stmt::Org(words.get(1).copied()),
            Some(Keyword::Pseudo(Pseudo::END)) => Stmt::End,
            Some(Keyword::Mri(mri)) => match words.get(1) {
                Some(operand) => Stmt::Mri {
                    mri,
                    operand: *operand,
                    indirect: words.get(2).map(|w| w.text) == Some(INDIRECT),
                },
                None => Stmt::Other,
            },
            _ => Stmt::Other,
        }
    }
}
