use num_enum::IntoPrimitive;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

// ----------------------------------------------------------------------------
// Pseudo instructions

/// Assembler directives. They control placement and data, never execute.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Display,
)]
pub enum Pseudo {
    ORG,
    END,
    DEC,
    HEX,
}

// ----------------------------------------------------------------------------
// Memory-reference instructions

/// Instructions taking a memory address operand.
/// The discriminant is the 3-bit opcode field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Display,
    IntoPrimitive,
)]
#[repr(u8)]
pub enum Mri {
    AND,
    ADD,
    LDA,
    STA,
    BUN,
    BSA,
    ISZ,
}

impl Mri {
    /// Instruction word with a zero address field.
    pub fn code(self, indirect: bool) -> u16 {
        let opcode: u8 = self.into();
        let i = if indirect { 0x8000 } else { 0x0000 };
        i | (opcode as u16) << 12
    }

    /// BUN and BSA transfer control instead of touching data.
    pub fn is_branch(self) -> bool {
        matches!(self, Mri::BUN | Mri::BSA)
    }
}

// ----------------------------------------------------------------------------
// Register-reference instructions

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Display,
)]
pub enum Rri {
    CLA,
    CLE,
    CMA,
    CME,
    CIR,
    CIL,
    INC,
    SPA,
    SNA,
    SZA,
    SZE,
    HLT,
}

impl Rri {
    pub fn code(self) -> u16 {
        use Rri::*;
        match self {
            CLA => 0x7800,
            CLE => 0x7400,
            CMA => 0x7200,
            CME => 0x7100,
            CIR => 0x7080,
            CIL => 0x7040,
            INC => 0x7020,
            SPA => 0x7010,
            SNA => 0x7008,
            SZA => 0x7004,
            SZE => 0x7002,
            HLT => 0x7001,
        }
    }

    /// Conditional skips of the next instruction.
    pub fn is_skip(self) -> bool {
        matches!(self, Rri::SPA | Rri::SNA | Rri::SZA | Rri::SZE)
    }
}

// ----------------------------------------------------------------------------
// Input-output instructions

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Display,
)]
pub enum Io {
    INP,
    OUT,
    SKI,
    SKO,
    ION,
    IOF,
}

impl Io {
    pub fn code(self) -> u16 {
        use Io::*;
        match self {
            INP => 0xF800,
            OUT => 0xF400,
            SKI => 0xF200,
            SKO => 0xF100,
            ION => 0xF080,
            IOF => 0xF040,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonics_parse_upper_case_only() {
        assert_eq!("LDA".parse::<Mri>(), Ok(Mri::LDA));
        assert!("lda".parse::<Mri>().is_err());
        assert_eq!("HLT".parse::<Rri>(), Ok(Rri::HLT));
        assert_eq!("IOF".parse::<Io>(), Ok(Io::IOF));
        assert_eq!("ORG".parse::<Pseudo>(), Ok(Pseudo::ORG));
        assert!("HALT".parse::<Rri>().is_err());
    }

    #[test]
    fn mri_words() {
        assert_eq!(Mri::AND.code(false), 0x0000);
        assert_eq!(Mri::LDA.code(false), 0x2000);
        assert_eq!(Mri::LDA.code(true), 0xA000);
        assert_eq!(Mri::ISZ.code(true), 0xE000);
    }

    #[test]
    fn skip_class() {
        assert!(Rri::SZA.is_skip());
        assert!(!Rri::CLA.is_skip());
        assert!(Mri::BSA.is_branch());
        assert!(!Mri::ISZ.is_branch());
    }
}
