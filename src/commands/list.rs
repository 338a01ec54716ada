use super::Host;
use crate::parsers::Generator;
use std::io::Write;
use strum::IntoEnumIterator;

/// Print every generator name with a short description.
pub fn list_generators<H: Host>(host: &mut H) {
    let width = Generator::iter().map(|g| g.to_string().len()).max().unwrap_or(0);

    let mut out = host.output();
    for generator in Generator::iter() {
        let _ = writeln!(out, "{:<width$}  {}", generator.to_string(), generator.description());
    }
}
