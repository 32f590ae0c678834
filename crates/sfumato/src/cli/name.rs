//! Filename preview command handler.

use sfumato::filename::synthesize;

/// Print the filename `keyword` and `description` produce.
pub fn print_name(keyword: &str, description: &str, ext: &str) {
    println!("{}", synthesize(keyword, description, ext.trim_start_matches('.')));
}
