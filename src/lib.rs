//! # LZW Codec
//!
//! Adaptive dictionary compression with an unbounded codeword space.
//! The encoder and decoder each grow their own dictionary, in lockstep,
//! so the codeword stream is all that has to be stored.
//!
//! ```
//! let codes = lzwcodec::lzw::encode(b"TOBEORNOTTOBEORTOBEORNOT");
//! let expanded = lzwcodec::lzw::decode(&codes).expect("bad stream");
//! assert_eq!(expanded, b"TOBEORNOTTOBEORTOBEORNOT");
//! ```
//!
//! There is no code width limit and no dictionary reset, codewords keep
//! growing for as long as new phrases are found.  Streams from fixed width
//! LZW variants are not compatible.

mod tools;
pub mod lzw;
pub mod codes;

type DYNERR = Box<dyn std::error::Error>;

/// Number of symbols in the alphabet, these are preloaded as codes 0..=255
pub const ALPHABET_SIZE: usize = 256;
/// The first code assigned to a discovered phrase
pub const FIRST_PHRASE_CODE: usize = ALPHABET_SIZE;

/// Codec Errors
#[derive(thiserror::Error,Debug,PartialEq,Eq)]
pub enum Error {
    #[error("no codewords to decode")]
    EmptyInput,
    #[error("invalid codeword {code}, next assignable is {next}")]
    InvalidCodeword {
        code: usize,
        next: usize
    },
    #[error("not a codeword: `{token}`")]
    BadToken {
        token: String
    },
    #[error("file too large")]
    FileTooLarge
}

/// Number base used when codewords are written as text
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Radix {
    Dec,
    Hex
}

impl Radix {
    pub fn base(&self) -> u32 {
        match self {
            Radix::Dec => 10,
            Radix::Hex => 16
        }
    }
}

impl std::str::FromStr for Radix {
    type Err = String;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        match s {
            "dec" => Ok(Self::Dec),
            "hex" => Ok(Self::Hex),
            _ => Err(format!("unknown radix {}",s))
        }
    }
}
