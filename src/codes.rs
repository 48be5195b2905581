//! Codeword Text Streams
//!
//! Codewords have no fixed width, so rather than packing bits we write them out
//! as text, separated by whitespace.  This is handy for inspecting the output by eye.

use std::io::Write;
use crate::{Error,Radix};

/// Options controlling the text layout
#[derive(Clone)]
pub struct Options {
    /// base of the written numbers
    pub radix: Radix,
    /// line break after this many codes, 0 means never
    pub codes_per_line: usize
}

pub const STD_OPTIONS: Options = Options {
    radix: Radix::Dec,
    codes_per_line: 16
};

fn format_code(code: usize,radix: Radix) -> String {
    match radix {
        Radix::Dec => code.to_string(),
        Radix::Hex => format!("{:x}",code)
    }
}

/// Write `codes` to `writer`, returns the number of bytes written.
/// Nothing at all is written for an empty slice.
pub fn write_codes<W: Write>(codes: &[usize],writer: &mut W,opt: &Options) -> Result<u64,std::io::Error> {
    let mut count: u64 = 0;
    for (i,code) in codes.iter().enumerate() {
        let sep = match i+1 {
            n if n == codes.len() => "\n",
            n if opt.codes_per_line > 0 && n % opt.codes_per_line == 0 => "\n",
            _ => " "
        };
        let txt = [format_code(*code,opt.radix).as_str(),sep].concat();
        writer.write_all(txt.as_bytes())?;
        count += txt.len() as u64;
    }
    Ok(count)
}

/// Parse whitespace separated codewords
pub fn parse_codes(txt: &str,radix: Radix) -> Result<Vec<usize>,Error> {
    txt.split_ascii_whitespace().map(|tok| {
        usize::from_str_radix(tok,radix.base()).map_err(|_| Error::BadToken {
            token: tok.to_string()
        })
    }).collect()
}

/// Convenience function, calls `write_codes` returning a String
pub fn to_string(codes: &[usize],opt: &Options) -> String {
    let mut ans: Vec<u8> = Vec::new();
    // writing to a Vec cannot fail
    let _ = write_codes(codes,&mut ans,opt);
    String::from_utf8_lossy(&ans).into_owned()
}

#[test]
fn layout() {
    let codes = [84,79,66,69,79,82,78,79,84,256,258,260,265,259,261,263];
    let mut opt = STD_OPTIONS;
    opt.codes_per_line = 8;
    assert_eq!(to_string(&codes,&opt),"84 79 66 69 79 82 78 79\n84 256 258 260 265 259 261 263\n");
    opt.radix = Radix::Hex;
    opt.codes_per_line = 0;
    assert_eq!(to_string(&codes[8..],&opt),"54 100 102 104 109 103 105 107\n");
    assert_eq!(to_string(&[],&opt),"");
}

#[test]
fn parsing() {
    assert_eq!(parse_codes(" 97 256\n\t97\n",Radix::Dec),Ok(vec![97,256,97]));
    assert_eq!(parse_codes("61 100 61",Radix::Hex),Ok(vec![97,256,97]));
    assert_eq!(parse_codes("",Radix::Dec),Ok(vec![]));
    assert_eq!(parse_codes("97 x1 98",Radix::Dec),Err(Error::BadToken { token: "x1".to_string() }));
    assert_eq!(parse_codes("97 -1",Radix::Dec),Err(Error::BadToken { token: "-1".to_string() }));
    assert_eq!(parse_codes("ff",Radix::Dec),Err(Error::BadToken { token: "ff".to_string() }));
}

#[test]
fn layout_parses_back() {
    let codes: Vec<usize> = (0..40).map(|i| i*37).collect();
    for radix in [Radix::Dec,Radix::Hex] {
        let opt = Options { radix, codes_per_line: 7 };
        assert_eq!(parse_codes(&to_string(&codes,&opt),radix),Ok(codes.clone()));
    }
}
