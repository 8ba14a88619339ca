use std::{
    io::{self, BufRead, BufReader, Read},
    thread::{self, JoinHandle},
};

pub(crate) const STDOUT_LABEL: &str = "backend stdout";
pub(crate) const STDERR_LABEL: &str = "backend stderr";

/// Reads `reader` line by line until EOF and hands each line to `sink`,
/// prefixed with `label`. Returns the number of forwarded lines.
pub(crate) fn forward_lines<R, F>(reader: R, label: &str, sink: F) -> usize
where
    R: Read,
    F: Fn(&str),
{
    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();
    let mut forwarded = 0;

    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buffer);
                sink(&format!(
                    "{label}: {}",
                    line.trim_end_matches(['\r', '\n'])
                ));
                forwarded += 1;
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => {
                sink(&format!("{label}: stream closed with error: {error}"));
                break;
            }
        }
    }

    forwarded
}

pub(crate) fn spawn_forwarder<R, F>(
    reader: R,
    label: &'static str,
    sink: F,
) -> io::Result<JoinHandle<usize>>
where
    R: Read + Send + 'static,
    F: Fn(&str) + Send + 'static,
{
    thread::Builder::new()
        .name(label.replace(' ', "-"))
        .spawn(move || forward_lines(reader, label, sink))
}
