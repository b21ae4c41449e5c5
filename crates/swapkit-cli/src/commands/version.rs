//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - swap-test circuit builder",
        style("swapkit").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  swapkit-ir     Circuit IR and swap-test builder");
    println!("  swapkit-qasm3  OpenQASM 3/2 emitter");
    println!("  swapkit-cli    Command-line interface");
    println!();
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
