//! Parser tests for console command line parsing

use serial_cli_console::console::parser::{parse_line, MAX_ARGS};

#[test]
fn test_parse_simple_command() {
    let cmd = parse_line("help");
    assert_eq!(cmd.command, "help");
    assert_eq!(cmd.arg_count(), 0);
    assert!(!cmd.overflow);
}

#[test]
fn test_parse_command_with_one_arg() {
    let cmd = parse_line("loglevel debug");
    assert_eq!(cmd.command, "loglevel");
    assert_eq!(cmd.arg(0), Some("debug"));
    assert_eq!(cmd.arg(1), None);
}

#[test]
fn test_parse_command_with_max_args() {
    let cmd = parse_line("set baud 9600");
    assert_eq!(cmd.command, "set");
    assert_eq!(cmd.args, [Some("baud"), Some("9600")]);
    assert_eq!(cmd.arg_count(), MAX_ARGS);
    assert!(!cmd.overflow);
}

#[test]
fn test_parse_flags_extra_args() {
    let cmd = parse_line("set a b c");
    assert_eq!(cmd.arg_count(), MAX_ARGS);
    assert!(cmd.overflow);
}

#[test]
fn test_parse_trims_whitespace() {
    let cmd = parse_line("  help \t ticks  ");
    assert_eq!(cmd.command, "help");
    assert_eq!(cmd.arg(0), Some("ticks"));
}

#[test]
fn test_parse_empty_line() {
    assert!(parse_line("").is_blank());
    assert!(parse_line("   ").is_blank());
}

#[test]
fn test_arg_out_of_range() {
    let cmd = parse_line("help");
    assert_eq!(cmd.arg(MAX_ARGS + 3), None);
}
