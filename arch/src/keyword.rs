use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::op::{Io, Mri, Pseudo, Rri};

/// Indirect addressing marker following an MRI operand.
pub const INDIRECT: &str = "I";

/// Every mnemonic the assembler understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Pseudo(Pseudo),
    Mri(Mri),
    Rri(Rri),
    Io(Io),
}

/// The whole vocabulary, pseudo instructions first.
pub static VOCABULARY: Lazy<Vec<Keyword>> = Lazy::new(|| {
    Pseudo::iter()
        .map(Keyword::Pseudo)
        .chain(Mri::iter().map(Keyword::Mri))
        .chain(Rri::iter().map(Keyword::Rri))
        .chain(Io::iter().map(Keyword::Io))
        .collect()
});

impl Keyword {
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(p) = s.parse::<Pseudo>() {
            return Some(Keyword::Pseudo(p));
        }
        if let Ok(m) = s.parse::<Mri>() {
            return Some(Keyword::Mri(m));
        }
        if let Ok(r) = s.parse::<Rri>() {
            return Some(Keyword::Rri(r));
        }
        s.parse::<Io>().ok().map(Keyword::Io)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Keyword::Pseudo(p) => p.into(),
            Keyword::Mri(m) => m.into(),
            Keyword::Rri(r) => r.into(),
            Keyword::Io(io) => io.into(),
        }
    }

    /// Mnemonics followed by an operand: the MRIs, ORG, DEC and HEX.
    pub fn takes_operand(&self) -> bool {
        !matches!(
            self,
            Keyword::Pseudo(Pseudo::END) | Keyword::Rri(_) | Keyword::Io(_)
        )
    }

    /// Instructions that may skip the one after them.
    pub fn is_skip(&self) -> bool {
        match self {
            Keyword::Mri(m) => *m == Mri::ISZ,
            Keyword::Rri(r) => r.is_skip(),
            _ => false,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Keyword::Pseudo(_) => "Pseudo instruction",
            Keyword::Mri(_) => "Memory-reference instruction",
            Keyword::Rri(_) => "Register-reference instruction",
            Keyword::Io(_) => "Input-output instruction",
        }
    }

    /// Machine word of the instruction, address field zero. Pseudo ops have none.
    pub fn code(&self) -> Option<u16> {
        match self {
            Keyword::Pseudo(_) => None,
            Keyword::Mri(m) => Some(m.code(false)),
            Keyword::Rri(r) => Some(r.code()),
            Keyword::Io(io) => Some(io.code()),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Keyword::Pseudo(p) => match p {
                Pseudo::ORG => "Set the location counter to the hexadecimal address that follows.",
                Pseudo::END => "End of the symbolic program. Following lines are ignored.",
                Pseudo::DEC => "Store the signed decimal literal that follows at the current location.",
                Pseudo::HEX => "Store the hexadecimal literal that follows at the current location.",
            },
            Keyword::Mri(m) => match m {
                Mri::AND => "AND memory word to AC.",
                Mri::ADD => "Add memory word to AC, carry to E.",
                Mri::LDA => "Load memory word to AC.",
                Mri::STA => "Store content of AC in memory.",
                Mri::BUN => "Branch unconditionally.",
                Mri::BSA => "Branch and save return address.",
                Mri::ISZ => "Increment memory word and skip next instruction if zero.",
            },
            Keyword::Rri(r) => match r {
                Rri::CLA => "Clear AC.",
                Rri::CLE => "Clear E.",
                Rri::CMA => "Complement AC.",
                Rri::CME => "Complement E.",
                Rri::CIR => "Circulate right AC and E.",
                Rri::CIL => "Circulate left AC and E.",
                Rri::INC => "Increment AC.",
                Rri::SPA => "Skip next instruction if AC is positive.",
                Rri::SNA => "Skip next instruction if AC is negative.",
                Rri::SZA => "Skip next instruction if AC is zero.",
                Rri::SZE => "Skip next instruction if E is zero.",
                Rri::HLT => "Halt the computer.",
            },
            Keyword::Io(io) => match io {
                Io::INP => "Input character to AC.",
                Io::OUT => "Output character from AC.",
                Io::SKI => "Skip on input flag.",
                Io::SKO => "Skip on output flag.",
                Io::ION => "Interrupt enable on.",
                Io::IOF => "Interrupt enable off.",
            },
        }
    }
}

/// Words a label may not take.
pub fn is_reserved(word: &str) -> bool {
    word == INDIRECT || Keyword::parse(word).is_some()
}
