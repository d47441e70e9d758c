use clap::Parser;
use cssom_lib::CssStyleSheet;
use std::fs;
use std::process;

#[derive(Parser)]
#[command(name = "cssom")]
#[command(about = "Parse a stylesheet and print its canonical CSS text")]
struct Args {
    /// Input CSS file.
    input: String,

    /// Output file; stdout when omitted.
    output: Option<String>,
}

fn main() {
    env_logger::init();

    let args: Args = Args::parse();

    let css_content = match fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading CSS file: {}", e);
            process::exit(1);
        }
    };

    let sheet = CssStyleSheet::parse(&css_content);
    let rendered = sheet.to_css_string();

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &rendered) {
                eprintln!("Error writing output file: {}", e);
                process::exit(1);
            }
        }
        None => print!("{}", rendered),
    }
}
