use std::ffi::OsString;
use std::io::Write;

pub const SEPARATOR: &str = "================================================================";

/// Write `vars` as `KEY=VALUE` lines between two separator lines.
pub fn write_env<W, I>(out: &mut W, vars: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (OsString, OsString)>,
{
    writeln!(out, "{SEPARATOR}")?;
    for (key, value) in vars {
        writeln!(out, "{}={}", key.to_string_lossy(), value.to_string_lossy())?;
    }
    writeln!(out, "{SEPARATOR}")?;
    out.flush()
}

/// Dump the live process environment.
pub fn dump_process_env<W: Write>(out: &mut W) -> std::io::Result<()> {
    write_env(out, std::env::vars_os())
}
