use anyhow::{Context, Result};
use clap::{arg, command, ArgAction, Command};

use text_huffman::{BitString, CodeTable, CompressedContainer, HuffmanTree};

fn main() -> Result<()> {
    let matches = command!()
        .arg(arg!(-v --verbose "Increase log verbosity (repeatable)").action(ArgAction::Count))
        .subcommand_required(true)
        .subcommand(
            Command::new("compress")
                .about("Compress a UTF-8 text file")
                .arg(arg!(input: <INPUT> "Text file to compress"))
                .arg(arg!(output: <OUTPUT> "Container path to write")),
        )
        .subcommand(
            Command::new("decompress")
                .about("Restore a text file from a container")
                .arg(arg!(input: <INPUT> "Container to read"))
                .arg(arg!(output: <OUTPUT> "Text file to write")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the symbol table stored in a container")
                .arg(arg!(path: <PATH> "Container to read")),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("compress", matches)) => {
            let input = matches.get_one::<String>("input").unwrap();
            let output = matches.get_one::<String>("output").unwrap();
            let report = text_huffman::compress_with_report(input, output)
                .with_context(|| format!("Failed to compress {input}"))?;

            println!(
                "{input}: {} -> {} bytes ({:.1}%), {} distinct symbols, {} payload bits",
                report.input_bytes,
                report.output_bytes,
                report.ratio() * 100.0,
                report.distinct_symbols,
                report.payload_bits
            );
        }
        Some(("decompress", matches)) => {
            let input = matches.get_one::<String>("input").unwrap();
            let output = matches.get_one::<String>("output").unwrap();
            text_huffman::decompress(input, output)
                .with_context(|| format!("Failed to decompress {input}"))?;
        }
        Some(("inspect", matches)) => {
            let path = matches.get_one::<String>("path").unwrap();
            inspect_container(path)?;
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn inspect_container(path: &str) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {path}"))?;
    let container = CompressedContainer::from_bytes(&data)
        .with_context(|| format!("Failed to parse {path}"))?;

    let tree = HuffmanTree::build(&container.frequencies);
    let codes = CodeTable::from_tree(tree.as_ref());

    println!(
        "{} distinct symbols, {} total, tree depth {}",
        container.frequencies.len(),
        container.frequencies.total(),
        tree.as_ref().map_or(0, |tree| tree.depth())
    );
    for (symbol, count) in container.frequencies.iter() {
        println!("{}", format_row(symbol, count, codes.get(symbol)));
    }
    println!(
        "payload: {} bytes, {} padding bits",
        container.packed.bytes.len(),
        container.packed.padding
    );

    Ok(())
}

fn format_row(symbol: char, count: u64, code: Option<&BitString>) -> String {
    let code = code.map(|code| code.to_string()).unwrap_or_default();
    format!("\t{symbol:?}\t{count}\t{code}")
}
