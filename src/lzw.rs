//! LZW Compression
//!
//! The dictionary starts with the 256 single byte phrases and grows by one phrase
//! for every code emitted (except the last).  There is no maximum code width, and
//! the dictionary is never reset, so codes can get arbitrarily large.
//!
//! The decoder runs one step behind the encoder.  When the encoder emits a code in
//! the same step it created it (runs like `aaaa`), the decoder has not bound the code yet,
//! but it can only mean the previous phrase extended by its own first symbol.
//!
//! The codes can be stored as text, see the `codes` module.

use std::io::{Cursor,Read,Write};
use crate::tools::dictionary::{Link,PhraseIndex,PhraseTable};
use crate::{codes,Error,Radix,DYNERR,ALPHABET_SIZE};

/// Options controlling compression
#[derive(Clone)]
pub struct Options {
    /// base of the codes in the compressed file
    pub radix: Radix,
    /// line break after this many codes, 0 means never
    pub codes_per_line: usize,
    /// return error if file is larger
    pub max_file_size: u64
}

pub const STD_OPTIONS: Options = Options {
    radix: Radix::Dec,
    codes_per_line: 16,
    max_file_size: u32::MAX as u64/4
};

impl Options {
    fn text_options(&self) -> codes::Options {
        codes::Options {
            radix: self.radix,
            codes_per_line: self.codes_per_line
        }
    }
}

/// Incremental encoder, each value is one run with its own dictionary.
pub struct Encoder {
    dictionary: PhraseIndex,
    /// code of the longest phrase matched so far
    curr_match: Option<usize>
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            dictionary: PhraseIndex::create(),
            curr_match: None
        }
    }
    /// Try to extend the current match with `sym`.
    /// If the extended phrase is known, it becomes the current match and nothing is emitted.
    /// Otherwise the extended phrase is added to the dictionary, the code of the current
    /// match is returned, and `sym` starts a new match.
    pub fn push(&mut self,sym: u8) -> Option<usize> {
        let search_key = match self.curr_match {
            Some(code) => Link::create(code,sym),
            None => Link::root(sym)
        };
        match self.dictionary.get(&search_key) {
            Some(code) => {
                self.curr_match = Some(code);
                None
            },
            None => {
                let new_code = self.dictionary.insert(search_key);
                log::trace!("add {} linking to {:?}.{}",new_code,search_key.prefix,sym);
                // single symbol phrases are preloaded at their own value
                self.curr_match.replace(sym as usize)
            }
        }
    }
    /// Code for whatever is left in the current match, `None` if no symbols were pushed.
    pub fn finish(self) -> Option<usize> {
        self.curr_match
    }
    /// The code that will be bound to the next new phrase
    pub fn next_code(&self) -> usize {
        self.dictionary.next_code()
    }
    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Incremental decoder, each value is one run with its own dictionary.
/// Once `push` returns an error the stream is bad and the decoder should be dropped.
pub struct Decoder {
    dictionary: PhraseTable,
    /// code of the previous phrase
    prev_code: Option<usize>,
    /// the phrase most recently decoded
    phrase: Vec<u8>
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            dictionary: PhraseTable::create(),
            prev_code: None,
            phrase: Vec::new()
        }
    }
    /// Decode one code, returning the phrase it stands for.
    pub fn push(&mut self,code: usize) -> Result<&[u8],Error> {
        let next = self.dictionary.next_code();
        let prev_code = match self.prev_code {
            Some(c) => c,
            None => {
                // first code has to be a plain symbol
                if code >= ALPHABET_SIZE {
                    log::error!("first code must be a symbol, got {}",code);
                    return Err(Error::InvalidCodeword { code, next });
                }
                self.phrase = vec![code as u8];
                self.prev_code = Some(code);
                return Ok(&self.phrase);
            }
        };
        match self.dictionary.get_string(code) {
            Some(s) => {
                self.phrase = s;
            },
            None if code == next => {
                // code is being defined right now: previous phrase + its first symbol
                let first = self.phrase[0];
                self.phrase.push(first);
            },
            None => {
                log::error!("bad LZW code, expected at most {}, got {}",next,code);
                return Err(Error::InvalidCodeword { code, next });
            }
        }
        let new_code = self.dictionary.insert(prev_code,self.phrase[0]);
        log::trace!("add {} linking to {}.{}",new_code,prev_code,self.phrase[0]);
        self.prev_code = Some(code);
        Ok(&self.phrase)
    }
    /// The code that will be bound to the next new phrase
    pub fn next_code(&self) -> usize {
        self.dictionary.next_code()
    }
    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a slice of symbols as a list of codes.  Empty input gives empty output.
pub fn encode(symbols: &[u8]) -> Vec<usize> {
    let mut coder = Encoder::new();
    let mut ans = Vec::new();
    for sym in symbols {
        if let Some(code) = coder.push(*sym) {
            ans.push(code);
        }
    }
    log::debug!("encoded {} symbols, dictionary has {} entries",symbols.len(),coder.dictionary_len());
    ans.extend(coder.finish());
    ans
}

/// Decode a list of codes.  Any bad code fails the whole call, there is no partial output.
pub fn decode(codes: &[usize]) -> Result<Vec<u8>,Error> {
    if codes.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut decoder = Decoder::new();
    let mut ans = Vec::new();
    for code in codes {
        ans.extend_from_slice(decoder.push(*code)?);
    }
    log::debug!("decoded {} codes, dictionary has {} entries",codes.len(),decoder.dictionary_len());
    Ok(ans)
}

/// Main compression function.
/// `expanded_in` is an object with the `Read` trait, usually `std::fs::File`, or `std::io::Cursor<&[u8]>`.
/// `compressed_out` is an object with the `Write` trait, usually `std::fs::File`, or `std::io::Cursor<Vec<u8>>`.
/// The output is the code list as text.  Returns (in_size,out_size) or error.
pub fn compress<R,W>(expanded_in: &mut R, compressed_out: &mut W, opt: &Options) -> Result<(u64,u64),DYNERR>
where R: Read, W: Write {
    let mut symbols = Vec::new();
    let expanded_length = expanded_in.take(opt.max_file_size + 1).read_to_end(&mut symbols)? as u64;
    if expanded_length > opt.max_file_size {
        return Err(Box::new(Error::FileTooLarge));
    }
    let code_list = encode(&symbols);
    log::debug!("writing {} codes",code_list.len());
    let compressed_length = codes::write_codes(&code_list,compressed_out,&opt.text_options())?;
    compressed_out.flush()?;
    Ok((expanded_length,compressed_length))
}

/// Main decompression function.
/// `compressed_in` is an object with the `Read` trait, holding the code list as text.
/// `expanded_out` is an object with the `Write` trait.
/// Returns (in_size,out_size) or error.
pub fn expand<R,W>(compressed_in: &mut R, expanded_out: &mut W, opt: &Options) -> Result<(u64,u64),DYNERR>
where R: Read, W: Write {
    let mut txt = String::new();
    let compressed_length = compressed_in.take(opt.max_file_size + 1).read_to_string(&mut txt)? as u64;
    if compressed_length > opt.max_file_size {
        return Err(Box::new(Error::FileTooLarge));
    }
    let code_list = codes::parse_codes(&txt,opt.radix)?;
    log::debug!("read {} codes",code_list.len());
    let symbols = decode(&code_list)?;
    expanded_out.write_all(&symbols)?;
    expanded_out.flush()?;
    Ok((compressed_length,symbols.len() as u64))
}

/// Convenience function, calls `compress` with a slice returning a Vec
pub fn compress_slice(slice: &[u8],opt: &Options) -> Result<Vec<u8>,DYNERR> {
    let mut src = Cursor::new(slice);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    compress(&mut src,&mut ans,opt)?;
    Ok(ans.into_inner())
}

/// Convenience function, calls `expand` with a slice returning a Vec
pub fn expand_slice(slice: &[u8],opt: &Options) -> Result<Vec<u8>,DYNERR> {
    let mut src = Cursor::new(slice);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    expand(&mut src,&mut ans,opt)?;
    Ok(ans.into_inner())
}


// *************** TESTS *****************

#[test]
fn encoding_works() {
    // Example adapted from wikipedia, with a full byte alphabet and no stop code
    let test_data = "TOBEORNOTTOBEORTOBEORNOT".as_bytes();
    let expected = [84,79,66,69,79,82,78,79,84,256,258,260,265,259,261,263];
    assert_eq!(encode(test_data),expected);
    assert_eq!(decode(&expected).expect("decoding failed"),test_data);
}

#[test]
fn dictionary_growth() {
    let test_data = "TOBEORNOTTOBEORTOBEORNOT".as_bytes();
    let mut coder = Encoder::new();
    let mut new_phrases = 0;
    for sym in test_data {
        let before = coder.next_code();
        if coder.push(*sym).is_some() {
            // one new phrase per code emitted, numbered consecutively
            assert_eq!(coder.next_code(),before+1);
            new_phrases += 1;
        } else {
            assert_eq!(coder.next_code(),before);
        }
    }
    assert_eq!(new_phrases,15);
    assert_eq!(coder.dictionary_len(),ALPHABET_SIZE + new_phrases);
    assert_eq!(coder.next_code(),271);
    assert_eq!(coder.finish(),Some(263));
}

#[test]
fn decoder_tracks_encoder() {
    let test_data = "TO_BE_OR_NOT_TO_BE_THAT_IS_TO_BE".as_bytes();
    let codes = encode(test_data);
    let mut decoder = Decoder::new();
    for (i,code) in codes.iter().enumerate() {
        decoder.push(*code).expect("decoding failed");
        // decoder has bound one code fewer than it has seen
        assert_eq!(decoder.next_code(),ALPHABET_SIZE + i);
    }
}

#[test]
fn repeated_symbol() {
    // 256 is used before the decoder has bound it
    assert_eq!(encode(b"aaaa"),vec![97,256,97]);
    assert_eq!(decode(&[97,256,97]),Ok(b"aaaa".to_vec()));
    assert_eq!(encode(b"aaaaaaa"),vec![97,256,257,97]);
    assert_eq!(decode(&[97,256,257,97]),Ok(b"aaaaaaa".to_vec()));
    assert_eq!(encode(b"abababab"),vec![97,98,256,258,98]);
    assert_eq!(decode(&[97,98,256,258,98]),Ok(b"abababab".to_vec()));
}

#[test]
fn empty_input() {
    assert_eq!(encode(&[]),Vec::<usize>::new());
    assert_eq!(decode(&[]),Err(Error::EmptyInput));
    assert_eq!(Encoder::new().finish(),None);
}

#[test]
fn single_symbol() {
    assert_eq!(encode(&[0]),vec![0]);
    assert_eq!(encode(&[255]),vec![255]);
    assert_eq!(decode(&[255]),Ok(vec![255]));
}

#[test]
fn bad_codes() {
    assert_eq!(decode(&[97,9999]),Err(Error::InvalidCodeword { code: 9999, next: 256 }));
    assert_eq!(decode(&[97,257]),Err(Error::InvalidCodeword { code: 257, next: 256 }));
    assert_eq!(decode(&[97,98,99,260]),Err(Error::InvalidCodeword { code: 260, next: 258 }));
    // first code cannot refer to a phrase
    assert_eq!(decode(&[256]),Err(Error::InvalidCodeword { code: 256, next: 256 }));
}

#[test]
fn decode_then_encode() {
    let codes = [69,97,114,108,121,32,116,111,32,98,101,100,32,97,
        110,267,101,257,259,261,263,114,105,115,101,32,109,
        97,107,101,115,268,281,269,32,104,272,108,116,104,
        121,44,32,119,292,294,260,269,267,119,278,101,46];
    let expanded = decode(&codes).expect("decoding failed");
    assert_eq!(expanded,"Early to bed and early to rise makes a man healthy, wealthy and wise.".as_bytes());
    assert_eq!(encode(&expanded),codes);
}

#[test]
fn input_is_not_consumed() {
    let codes = vec![97,256,97];
    let first = decode(&codes).expect("decoding failed");
    let second = decode(&codes).expect("decoding failed");
    assert_eq!(codes,vec![97,256,97]);
    assert_eq!(first,second);
}

#[test]
fn compression_works() {
    let mut opt = STD_OPTIONS;
    opt.codes_per_line = 8;
    let compressed = compress_slice("TOBEORNOTTOBEORTOBEORNOT".as_bytes(),&opt).expect("compression failed");
    assert_eq!(String::from_utf8(compressed).unwrap(),"84 79 66 69 79 82 78 79\n84 256 258 260 265 259 261 263\n");
}

#[test]
fn invertibility() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let compressed = compress_slice(test_data,&STD_OPTIONS).expect("compression failed");
    let expanded = expand_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
    assert_eq!(test_data.to_vec(),expanded);
}

#[test]
fn invertibility_hex() {
    let mut opt = STD_OPTIONS;
    opt.radix = Radix::Hex;
    opt.codes_per_line = 0;
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let compressed = compress_slice(test_data,&opt).expect("compression failed");
    assert_eq!(compressed.iter().filter(|b| **b==b'\n').count(),1);
    let expanded = expand_slice(&compressed,&opt).expect("expansion failed");
    assert_eq!(test_data.to_vec(),expanded);
}

#[test]
fn file_size_limit() {
    let mut opt = STD_OPTIONS;
    opt.max_file_size = 4;
    assert!(compress_slice(b"abcd",&opt).is_ok());
    let err = compress_slice(b"abcde",&opt).expect_err("size limit ignored");
    assert_eq!(err.downcast_ref::<Error>(),Some(&Error::FileTooLarge));
}

#[test]
fn empty_stream_fails() {
    assert_eq!(compress_slice(&[],&STD_OPTIONS).expect("compression failed"),Vec::<u8>::new());
    let err = expand_slice(b" \n",&STD_OPTIONS).expect_err("empty stream accepted");
    assert_eq!(err.downcast_ref::<Error>(),Some(&Error::EmptyInput));
}
