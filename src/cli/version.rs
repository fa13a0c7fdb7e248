//! Version command handler

use std::io::{self, Write};

/// Display version information
pub fn display_version(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "fluxctl {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "  {}", env!("CARGO_PKG_DESCRIPTION"))?;
    writeln!(out, "  License: {}", env!("CARGO_PKG_LICENSE"))
}
