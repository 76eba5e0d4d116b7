//! Output helpers shared by the subcommands and `main`.

/// File name of the application log inside the log directory.
pub const LOG_FILE_NAME: &str = "rivulex.log";

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}
