//! Session header for chat sessions.
//!
//! Prints the application title and a disclaimer naming the endpoint and
//! model behind the replies.

use console::style;

/// Disclaimer shown under the title.
pub fn disclaimer(provider: &str, model: &str) -> String {
    format!("Replies are generated by {model} via {provider}. Accuracy is not guaranteed.")
}

/// Print the header at the start of a chat session.
pub fn print_header(title: &str, provider: &str, model: &str, endpoint: &str) {
    println!();
    println!("  {}", style(title).cyan().bold());
    println!("  {}", style(disclaimer(provider, model)).dim());
    println!();
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Endpoint:").bold(), style(endpoint).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
