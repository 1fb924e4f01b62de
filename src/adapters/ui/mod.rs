pub mod banner;

/// Prints the welcome banner and module overview. Call once at startup, after tracing init.
pub fn init_ui() {
    banner::print_welcome();
}
