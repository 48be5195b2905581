use clap::{arg,crate_version,Command};
use lzwcodec::{lzw,Radix};
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const RCH: &str = "unreachable was reached";

fn ok_to_overwrite(path_out: &str) -> bool {
    if let Ok(_f) = std::fs::File::open(path_out) {
        let mut ans = String::new();
        eprint!("{} exists, overwrite? (y/n) ",path_out);
        if std::io::stdin().read_line(&mut ans).is_err() {
            return false;
        }
        return ans.trim_end()=="y" || ans.trim_end()=="Y";
    }
    true
}

fn options(cmd: &clap::ArgMatches) -> Result<lzw::Options,Box<dyn std::error::Error>> {
    let mut opt = lzw::STD_OPTIONS;
    if let Some(radix) = cmd.get_one::<String>("radix") {
        opt.radix = radix.parse::<Radix>()?;
    }
    // only compress takes a width
    if let Ok(Some(n)) = cmd.try_get_one::<usize>("width") {
        opt.codes_per_line = *n;
    }
    Ok(opt)
}

fn main() -> STDRESULT
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let long_help =
"Examples:
---------
Compress:      `lzwcodec compress -i my_expanded -o my_codes.txt`
Expand:        `lzwcodec expand -r hex -i my_codes.txt -o my_expanded`

The compressed file lists the LZW codes as text, there is no limit on code size.";

    let radixes = ["dec","hex"];

    let mut main_cmd = Command::new("lzwcodec")
        .about("Compress and expand with unbounded LZW codes")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .arg(arg!(-r --radix <RADIX> "base of the written codes").value_parser(radixes)
            .required(false))
        .arg(arg!(-w --width <COUNT> "codes per line, 0 for one line")
            .value_parser(clap::value_parser!(usize)).required(false))
        .about("compress a file"));

    main_cmd = main_cmd.subcommand(Command::new("expand")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .arg(arg!(-r --radix <RADIX> "base of the codes being read").value_parser(radixes)
            .required(false))
        .about("expand a file"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let opt = options(cmd)?;
        if !ok_to_overwrite(path_out) {
            eprintln!("abort operation");
            return Ok(());
        }
        let mut in_file = std::fs::File::open(path_in)?;
        let mut out_file = std::io::BufWriter::new(std::fs::File::create(path_out)?);
        let (in_size,out_size) = lzw::compress(&mut in_file,&mut out_file,&opt)?;
        eprintln!("compressed {} into {}",in_size,out_size);
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let opt = options(cmd)?;
        if !ok_to_overwrite(path_out) {
            eprintln!("abort operation");
            return Ok(());
        }
        let mut in_file = std::fs::File::open(path_in)?;
        let (in_size,out_size) = {
            // decode before touching the output, a bad stream leaves no file behind
            let mut expanded: Vec<u8> = Vec::new();
            let sizes = lzw::expand(&mut in_file,&mut expanded,&opt)?;
            std::fs::write(path_out,&expanded)?;
            sizes
        };
        eprintln!("expanded {} into {}",in_size,out_size);
    }

    Ok(())
}
