pub mod keyword;
pub mod op;
pub mod value;

pub use keyword::{is_reserved, Keyword, INDIRECT, VOCABULARY};
pub use op::{Io, Mri, Pseudo, Rri};
pub use value::{parse_address, parse_decimal, parse_hex, MEMORY_SIZE};
