use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Read, Stdin, StdoutLock, Write};
use std::path::Path;

use anyhow::{Context, Result};

use mtase_topology::{Structure, read_dssp};

/// Path that selects stdout for file-valued output flags.
pub const STDOUT_PATH: &str = "-";

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Returns `true` if stdin is a terminal (interactive).
pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

pub enum InputSource {
    File(BufReader<File>),
    Stdin(BufReader<Stdin>),
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            InputSource::File(r) => r.read(buf),
            InputSource::Stdin(r) => r.read(buf),
        }
    }
}

impl BufRead for InputSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            InputSource::File(r) => r.fill_buf(),
            InputSource::Stdin(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            InputSource::File(r) => r.consume(amt),
            InputSource::Stdin(r) => r.consume(amt),
        }
    }
}

pub fn open_input(path: Option<&Path>) -> Result<InputSource> {
    match path {
        Some(p) => {
            let file = File::open(p)
                .with_context(|| format!("Failed to open input file: {}", p.display()))?;
            Ok(InputSource::File(BufReader::new(file)))
        }
        None => Ok(InputSource::Stdin(BufReader::new(io::stdin()))),
    }
}

/// Reads the DSSP residue table from `path`, or stdin when `None`.
pub fn read_structure(path: Option<&Path>) -> Result<Structure> {
    let input = open_input(path)?;
    read_dssp(input).with_context(|| format!("Failed to read DSSP input: {}", input_label(path)))
}

/// File name of `path`, or `stdin`.
pub fn input_label(path: Option<&Path>) -> String {
    path.map(|p| {
        p.file_name()
            .unwrap_or(p.as_os_str())
            .to_string_lossy()
            .into_owned()
    })
    .unwrap_or_else(|| "stdin".to_string())
}

pub enum OutputTarget {
    File(BufWriter<File>),
    Stdout(BufWriter<StdoutLock<'static>>),
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::File(w) => w.write(buf),
            OutputTarget::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::File(w) => w.flush(),
            OutputTarget::Stdout(w) => w.flush(),
        }
    }
}

/// Opens `path` for writing; `None` or `-` selects stdout.
pub fn create_output(path: Option<&Path>) -> Result<OutputTarget> {
    match path.filter(|p| !is_stdout_path(p)) {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("Failed to create output file: {}", p.display()))?;
            Ok(OutputTarget::File(BufWriter::new(file)))
        }
        None => Ok(OutputTarget::Stdout(BufWriter::new(io::stdout().lock()))),
    }
}

pub fn is_stdout_path(path: &Path) -> bool {
    path.as_os_str() == STDOUT_PATH
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn dash_means_stdout() {
        assert!(is_stdout_path(Path::new("-")));
        assert!(!is_stdout_path(Path::new("out.json")));
        assert!(matches!(
            create_output(Some(Path::new("-"))).unwrap(),
            OutputTarget::Stdout(_)
        ));
    }

    #[test]
    fn input_labels() {
        assert_eq!(input_label(None), "stdin");
        let path = PathBuf::from("/data/1abc.dssp");
        assert_eq!(input_label(Some(path.as_path())), "1abc.dssp");
    }

    #[test]
    fn missing_input_file_is_reported() {
        let err = read_structure(Some(Path::new("/nonexistent/1abc.dssp"))).unwrap_err();
        assert!(err.to_string().contains("Failed to open input file"));
    }
}
