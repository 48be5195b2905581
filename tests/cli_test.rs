use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::path::Path;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const SAM: &str = "I am Sam. Sam I am. I do not like this Sam I am.\n";

fn compress_file(in_path: &Path,out_path: &Path,radix: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("lzwcodec").expect("binary not found")
        .arg("compress")
        .arg("-r").arg(radix)
        .arg("-i").arg(in_path)
        .arg("-o").arg(out_path)
        .assert()
}

fn expand_file(in_path: &Path,out_path: &Path,radix: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("lzwcodec").expect("binary not found")
        .arg("expand")
        .arg("-r").arg(radix)
        .arg("-i").arg(in_path)
        .arg("-o").arg(out_path)
        .assert()
}

fn round_trip(radix: &str) -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("sam.txt");
    let codes_path = temp_dir.path().join("sam.lzw");
    let out_path = temp_dir.path().join("sam_expanded.txt");
    std::fs::write(&in_path,SAM)?;
    compress_file(&in_path,&codes_path,radix)
        .success()
        .stderr(predicate::str::contains("compressed 49 into"));
    expand_file(&codes_path,&out_path,radix)
        .success()
        .stderr(predicate::str::contains("into 49"));
    match (std::fs::read(in_path),std::fs::read(out_path)) {
        (Ok(v1),Ok(v2)) => {
            assert_eq!(v1,v2);
        },
        _ => panic!("unable to compare output with reference")
    }
    Ok(())
}

#[test]
fn decimal_round_trip() -> STDRESULT {
    round_trip("dec")
}

#[test]
fn hex_round_trip() -> STDRESULT {
    round_trip("hex")
}

#[test]
fn codes_are_text() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("aaaa.txt");
    let codes_path = temp_dir.path().join("aaaa.lzw");
    std::fs::write(&in_path,"aaaa")?;
    compress_file(&in_path,&codes_path,"dec").success();
    assert_eq!(std::fs::read_to_string(codes_path)?,"97 256 97\n");
    Ok(())
}

#[test]
fn corrupt_stream_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let codes_path = temp_dir.path().join("bad.lzw");
    let out_path = temp_dir.path().join("bad.txt");
    std::fs::write(&codes_path,"97 9999\n")?;
    expand_file(&codes_path,&out_path,"dec")
        .failure()
        .stderr(predicate::str::contains("InvalidCodeword"));
    assert!(!out_path.exists());
    Ok(())
}

#[test]
fn empty_stream_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let codes_path = temp_dir.path().join("empty.lzw");
    let out_path = temp_dir.path().join("empty.txt");
    std::fs::write(&codes_path,"")?;
    expand_file(&codes_path,&out_path,"dec")
        .failure()
        .stderr(predicate::str::contains("EmptyInput"));
    Ok(())
}
