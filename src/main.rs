#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

mod arch;
mod cli;
mod freq;
mod listing;
mod mem;
mod sig;

use std::io;

fn main() -> io::Result<()> {
    cli::main()
}
