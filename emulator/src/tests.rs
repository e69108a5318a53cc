use clap::{CommandFactory, Parser};

use crate::Args;

#[test]
fn defaults() {
    let args = Args::try_parse_from(["emulator", "program.bin"]).unwrap();

    assert_eq!(args.memory_size, libisa::MAX_MEMORY_SIZE);
    assert_eq!(args.max_cycles, None);
    assert!(!args.debug);
}

#[test]
fn debug_help_mentions_shared_stdin() {
    let command = Args::command();
    let debug = command
        .get_arguments()
        .find(|arg| arg.get_id() == "debug")
        .unwrap();

    let help = debug.get_long_help().or(debug.get_help()).unwrap().to_string();
    assert!(help.contains("share stdin"), "{}", help);
}
