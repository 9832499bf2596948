use std::fs;
use std::io;
use std::path::PathBuf;

use daylog::split_blocks;

#[derive(Clone, Debug, PartialEq, Eq, clap::Parser)]
#[clap(about = "dump a daylog file as numbered record blocks", author)]
pub struct Args {
    #[arg(value_name = "PATH")]
    path: PathBuf,
}

fn main() -> Result<(), io::Error> {
    let args = <Args as clap::Parser>::parse();

    let content = fs::read_to_string(&args.path)?;

    for (i, block) in split_blocks(&content).iter().enumerate() {
        println!("[{}]", i);
        println!("{}", block);
        println!();
    }

    Ok(())
}
