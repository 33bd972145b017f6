//! Built-in command table
//!
//! A [`CommandProcessor`] with a fixed set of commands. `help` lists one
//! command per output chunk, so a long listing never exceeds the chunk size.

use core::fmt::Write;

use super::error::ConsoleError;
use super::parser::{parse_line, ParsedCommand};
use super::processor::{CommandLine, CommandProcessor, Dispatch, OutputChunk};
use crate::config::VERSION;
use crate::fault::FaultCounters;
use crate::logging::{log_level, set_log_level, LogLevel};

/// Board services the commands need.
#[derive(Clone, Copy)]
pub struct SystemHooks {
    /// Scheduler ticks since boot.
    pub ticks: fn() -> u32,
    /// Restart the device. May not return.
    pub reset: fn(),
}

type Handler = fn(&mut CommandTable<'_>, &ParsedCommand<'_>, &mut OutputChunk) -> Result<Dispatch, ConsoleError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub handler: Handler,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", help: "help: Lists all the registered commands\r\n", handler: cmd_help },
    CommandDescriptor { name: "version", help: "version: Displays firmware version\r\n", handler: cmd_version },
    CommandDescriptor { name: "ticks", help: "ticks: Displays system uptime in ticks\r\n", handler: cmd_ticks },
    CommandDescriptor { name: "cls", help: "cls: Clears the terminal screen\r\n", handler: cmd_cls },
    CommandDescriptor { name: "reset", help: "reset: Resets the device\r\n", handler: cmd_reset },
    CommandDescriptor { name: "loglevel", help: "loglevel [error|warn|info|debug|trace|off]: Shows or sets the log level\r\n", handler: cmd_loglevel },
    CommandDescriptor { name: "stats", help: "stats: Displays overrun and overflow counters\r\n", handler: cmd_stats },
];

/// Look up a command by name
pub fn find_command(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Get all command names
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

/// The default command processor.
pub struct CommandTable<'a> {
    hooks: SystemHooks,
    faults: &'a FaultCounters,
    /// Next entry `help` will print.
    help_cursor: usize,
}

impl<'a> CommandTable<'a> {
    pub const fn new(hooks: SystemHooks, faults: &'a FaultCounters) -> Self {
        Self {
            hooks,
            faults,
            help_cursor: 0,
        }
    }

    fn execute(&mut self, cmd: &ParsedCommand<'_>, out: &mut OutputChunk) -> Result<Dispatch, ConsoleError> {
        if cmd.is_blank() {
            return Ok(Dispatch::Done);
        }
        if cmd.overflow {
            return Err(ConsoleError::TooManyArgs);
        }

        let descriptor = find_command(cmd.command).ok_or(ConsoleError::UnknownCommand)?;
        (descriptor.handler)(self, cmd, out)
    }
}

impl CommandProcessor for CommandTable<'_> {
    fn process(&mut self, line: CommandLine<'_>, out: &mut OutputChunk) -> Dispatch {
        let result = match line.as_str() {
            Some(text) => self.execute(&parse_line(text), out),
            None => Err(ConsoleError::InvalidText),
        };

        match result {
            Ok(dispatch) => dispatch,
            Err(e) => {
                self.help_cursor = 0;
                let _ = write!(out, "{}\r\n", e);
                Dispatch::Done
            }
        }
    }
}

// --- Command Implementations ---

fn cmd_help(table: &mut CommandTable<'_>, cmd: &ParsedCommand<'_>, out: &mut OutputChunk) -> Result<Dispatch, ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        let c = find_command(name).ok_or(ConsoleError::UnknownCommand)?;
        out.push_bytes(c.help.as_bytes());
        return Ok(Dispatch::Done);
    }

    let Some(c) = COMMANDS.get(table.help_cursor) else {
        table.help_cursor = 0;
        return Ok(Dispatch::Done);
    };
    out.push_bytes(c.help.as_bytes());
    table.help_cursor += 1;

    if table.help_cursor < COMMANDS.len() {
        Ok(Dispatch::More)
    } else {
        table.help_cursor = 0;
        Ok(Dispatch::Done)
    }
}

fn cmd_version(_table: &mut CommandTable<'_>, cmd: &ParsedCommand<'_>, out: &mut OutputChunk) -> Result<Dispatch, ConsoleError> {
    no_args(cmd)?;
    let _ = write!(out, "Firmware Version: {}\r\n", VERSION);
    Ok(Dispatch::Done)
}

fn cmd_ticks(table: &mut CommandTable<'_>, cmd: &ParsedCommand<'_>, out: &mut OutputChunk) -> Result<Dispatch, ConsoleError> {
    no_args(cmd)?;
    let _ = write!(out, "System Ticks: {}\r\n", (table.hooks.ticks)());
    Ok(Dispatch::Done)
}

fn cmd_cls(_table: &mut CommandTable<'_>, cmd: &ParsedCommand<'_>, out: &mut OutputChunk) -> Result<Dispatch, ConsoleError> {
    no_args(cmd)?;
    // VT100: erase screen, cursor home
    out.push_bytes(b"\x1b[2J\x1b[H");
    Ok(Dispatch::Done)
}

fn cmd_reset(table: &mut CommandTable<'_>, cmd: &ParsedCommand<'_>, _out: &mut OutputChunk) -> Result<Dispatch, ConsoleError> {
    no_args(cmd)?;
    (table.hooks.reset)();
    Ok(Dispatch::Done)
}

fn cmd_loglevel(_table: &mut CommandTable<'_>, cmd: &ParsedCommand<'_>, out: &mut OutputChunk) -> Result<Dispatch, ConsoleError> {
    match cmd.arg(0) {
        None => {}
        Some(name) if name.eq_ignore_ascii_case("off") => set_log_level(None),
        Some(name) => {
            let level = LogLevel::parse(name).ok_or(ConsoleError::InvalidValue)?;
            set_log_level(Some(level));
        }
    }

    let name = log_level().map(LogLevel::as_str).unwrap_or("OFF");
    let _ = write!(out, "Log level: {}\r\n", name);
    Ok(Dispatch::Done)
}

fn cmd_stats(table: &mut CommandTable<'_>, cmd: &ParsedCommand<'_>, out: &mut OutputChunk) -> Result<Dispatch, ConsoleError> {
    no_args(cmd)?;
    let snap = table.faults.snapshot();
    let _ = write!(
        out,
        "rx overruns: {}\r\ntx overruns: {}\r\ninput overflows: {}\r\nlast: {}\r\n",
        snap.rx_overruns,
        snap.tx_overruns,
        snap.input_overflows,
        snap.last.as_str(),
    );
    Ok(Dispatch::Done)
}

fn no_args(cmd: &ParsedCommand<'_>) -> Result<(), ConsoleError> {
    if cmd.arg_count() == 0 {
        Ok(())
    } else {
        Err(ConsoleError::TooManyArgs)
    }
}
